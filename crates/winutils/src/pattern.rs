//! Glob matching of window display titles and the enumeration built on it.
//!
//! Patterns are shell globs (`*`, `?`, `[...]`, `[!...]`) matched
//! case-sensitively against the whole "App - Title" string. A bare pattern is
//! wrapped in `*` on both sides, so `Term` behaves as "contains Term".
//! A backslash makes the next character literal, and `**` is just `*`.

use glob::{MatchOptions, Pattern};
use tracing::{trace, warn};

use crate::{
    ops::WinOps,
    window::{LAYER_DESKTOP, WindowInfo},
};

/// Owners whose windows legitimately have blank titles and are still listed.
pub const BLANK_TITLE_OWNERS: &[&str] = &[
    "Messages",
    "Slack",
    "Discord",
    "Skype",
    "Telegram",
    "WhatsApp",
    "Signal",
];

/// Titles contain no path semantics: `/` and leading `.` are ordinary.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Wrap `raw` in `*` unless it already starts/ends with one.
///
/// An escaped trailing `\*` is a literal star and still gets a wildcard.
pub fn anchor(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    if !raw.starts_with('*') {
        out.push('*');
    }
    out.push_str(raw);
    if !out.ends_with('*') || out.ends_with("\\*") {
        out.push('*');
    }
    out
}

/// Rewrite shell-glob syntax into what [`glob::Pattern`] accepts.
///
/// `glob` rejects `**` outside a whole path component and has no backslash
/// escape. Runs of `*` collapse to one, and an escaped metacharacter becomes
/// a one-character class. Bracket expressions pass through untouched, so an
/// unclosed `[` still fails to compile.
fn to_glob_syntax(pat: &str) -> String {
    let mut out = String::with_capacity(pat.len() + 4);
    let mut chars = pat.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => {
                while chars.next_if_eq(&'*').is_some() {}
                out.push('*');
            }
            '\\' => match chars.next() {
                Some(e @ ('*' | '?' | '[' | ']')) => {
                    out.push('[');
                    out.push(e);
                    out.push(']');
                }
                Some(e) => out.push(e),
                None => out.push('\\'),
            },
            '[' => {
                out.push('[');
                if let Some(neg) = chars.next_if_eq(&'!') {
                    out.push(neg);
                }
                // A leading `]` is a member, not the terminator.
                if let Some(first) = chars.next_if_eq(&']') {
                    out.push(first);
                }
                for m in chars.by_ref() {
                    out.push(m);
                    if m == ']' {
                        break;
                    }
                }
            }
            _ => out.push(c),
        }
    }
    out
}

/// A user-supplied glob plus its anchored, compiled form.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    /// Exactly what the user typed.
    raw: String,
    /// `raw` wrapped in `*` as needed.
    anchored: String,
    /// `None` for match-all (empty raw) and for malformed patterns.
    compiled: Option<Pattern>,
    /// True when compilation failed.
    malformed: bool,
}

impl GlobPattern {
    /// Compile `raw`. A malformed pattern is accepted and matches nothing.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if raw.is_empty() {
            return Self {
                raw,
                anchored: String::new(),
                compiled: None,
                malformed: false,
            };
        }
        let anchored = anchor(&raw);
        let (compiled, malformed) = match Pattern::new(&to_glob_syntax(&anchored)) {
            Ok(p) => (Some(p), false),
            Err(e) => {
                warn!(pattern = %raw, error = %e, "malformed window pattern; nothing will match");
                (None, true)
            }
        };
        Self {
            raw,
            anchored,
            compiled,
            malformed,
        }
    }

    /// The pattern as given, for echoing back to the user.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The `*`-wrapped form actually matched.
    pub fn anchored(&self) -> &str {
        &self.anchored
    }

    /// True for the empty pattern, which matches every eligible window.
    pub fn is_match_all(&self) -> bool {
        self.raw.is_empty()
    }

    /// True when the pattern failed to compile.
    pub fn is_malformed(&self) -> bool {
        self.malformed
    }

    /// Test a display title.
    pub fn matches(&self, text: &str) -> bool {
        if self.is_match_all() {
            return true;
        }
        self.compiled
            .as_ref()
            .is_some_and(|p| p.matches_with(text, MATCH_OPTIONS))
    }
}

/// Whether a snapshot record may be matched at all.
///
/// Requires the desktop layer and an owner name; a blank title is only
/// tolerated for owners in [`BLANK_TITLE_OWNERS`].
pub fn is_eligible(w: &WindowInfo) -> bool {
    if w.layer != LAYER_DESKTOP || w.app.is_empty() {
        return false;
    }
    !w.title.is_empty() || BLANK_TITLE_OWNERS.contains(&w.app.as_str())
}

/// Eligibility plus pattern test. `None` matches every eligible record.
pub fn matches_record(pattern: Option<&GlobPattern>, w: &WindowInfo) -> bool {
    if !is_eligible(w) {
        return false;
    }
    match pattern {
        None => true,
        Some(p) => p.matches(&w.display_title()),
    }
}

/// Lazily yield matching records in snapshot order.
pub fn matching<'a>(
    records: &'a [WindowInfo],
    pattern: Option<&'a GlobPattern>,
) -> impl Iterator<Item = &'a WindowInfo> + 'a {
    records.iter().filter(move |w| {
        let hit = matches_record(pattern, w);
        trace!(app = %w.app, title = %w.title, layer = w.layer, hit, "match");
        hit
    })
}

/// Visit every match and return how many there were.
///
/// The scan is never cut short: callers that only act on the first match
/// still get the true total back.
pub fn enumerate<'a, F>(
    records: &'a [WindowInfo],
    pattern: Option<&'a GlobPattern>,
    mut visit: F,
) -> usize
where
    F: FnMut(&'a WindowInfo),
{
    let mut count = 0;
    for w in matching(records, pattern) {
        visit(w);
        count += 1;
    }
    count
}

/// Snapshot the window list from `ops` and [`enumerate`] it.
pub fn enumerate_windows<O, F>(ops: &O, pattern: Option<&GlobPattern>, mut visit: F) -> usize
where
    O: WinOps + ?Sized,
    F: FnMut(&WindowInfo),
{
    let records = ops.list_windows();
    enumerate(&records, pattern, |w| visit(w))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::geom::Bounds;

    fn rec(app: &str, title: &str, layer: i32) -> WindowInfo {
        WindowInfo {
            pid: 42,
            app: app.into(),
            title: title.into(),
            id: None,
            bounds: Bounds::new(0, 0, 400, 300),
            layer,
        }
    }

    #[test]
    fn anchoring_adds_missing_wildcards() {
        assert_eq!(anchor("term"), "*term*");
        assert_eq!(anchor("*term"), "*term*");
        assert_eq!(anchor("term*"), "*term*");
        assert_eq!(anchor("*"), "*");
        assert_eq!(anchor("a?c"), "*a?c*");
    }

    #[test]
    fn raw_pattern_is_preserved() {
        let p = GlobPattern::new("Term");
        assert_eq!(p.raw(), "Term");
        assert_eq!(p.anchored(), "*Term*");
    }

    #[test]
    fn matching_is_case_sensitive() {
        let records = vec![rec("Terminal", "bash", 0)];
        let lower = GlobPattern::new("term");
        assert_eq!(enumerate(&records, Some(&lower), |_| {}), 0);
        let upper = GlobPattern::new("Term*");
        assert_eq!(upper.anchored(), "*Term*");
        assert_eq!(enumerate(&records, Some(&upper), |_| {}), 1);
    }

    #[test]
    fn question_mark_and_classes() {
        let p = GlobPattern::new("*- ba?h");
        assert!(p.matches("Terminal - bash"));
        let p = GlobPattern::new("[ST]erminal");
        assert!(p.matches("Terminal - zsh"));
        let p = GlobPattern::new("[!T]erminal");
        assert!(!p.matches("Terminal - zsh"));
    }

    #[test]
    fn repeated_stars_behave_as_one() {
        for raw in ["Term**", "**bash", "Term**bash", "Term***"] {
            let p = GlobPattern::new(raw);
            assert!(!p.is_malformed(), "{raw}");
            assert!(p.matches("Terminal - bash"), "{raw}");
        }
        assert!(!GlobPattern::new("Safari**").matches("Terminal - bash"));
    }

    #[test]
    fn backslash_makes_metacharacters_literal() {
        let p = GlobPattern::new(r"a\*b");
        assert!(p.matches("x a*b y"));
        assert!(!p.matches("x aXb y"));
        let p = GlobPattern::new(r"what\?");
        assert!(p.matches("Notes - what?"));
        assert!(!p.matches("Notes - whats"));
        let p = GlobPattern::new(r"\[draft\]");
        assert!(!p.is_malformed());
        assert!(p.matches("Mail - [draft] hello"));
        assert!(!p.matches("Mail - d"));
    }

    #[test]
    fn escaped_trailing_star_is_still_anchored() {
        assert_eq!(anchor(r"5\*"), r"*5\**");
        assert!(GlobPattern::new(r"5\*").matches("Calc - 5*3"));
    }

    #[test]
    fn bracket_members_are_not_rewritten() {
        assert_eq!(to_glob_syntax("*[]*]x*"), "*[]*]x*");
        assert_eq!(to_glob_syntax("a**[!**]"), "a*[!**]");
        assert_eq!(to_glob_syntax(r"\a\"), r"a\");
    }

    #[test]
    fn slashes_and_dots_are_ordinary() {
        let p = GlobPattern::new("src*main.rs");
        assert!(p.matches("Code - ~/src/app/main.rs"));
        let p = GlobPattern::new("Finder - *");
        assert!(p.matches("Finder - .config"));
    }

    #[test]
    fn malformed_pattern_matches_nothing() {
        let records = vec![rec("Terminal", "bash", 0), rec("Safari", "[news", 0)];
        let p = GlobPattern::new("[news");
        assert!(p.is_malformed());
        assert_eq!(enumerate(&records, Some(&p), |_| {}), 0);
    }

    #[test]
    fn empty_pattern_is_match_all() {
        let records = vec![rec("Terminal", "bash", 0), rec("Safari", "Start", 0)];
        let p = GlobPattern::new("");
        assert!(p.is_match_all());
        assert_eq!(enumerate(&records, Some(&p), |_| {}), 2);
        assert_eq!(enumerate(&records, None, |_| {}), 2);
    }

    #[test]
    fn non_desktop_layers_are_excluded() {
        let records = vec![rec("Dock", "Dock", 20), rec("Terminal", "bash", 0)];
        let mut seen = Vec::new();
        let n = enumerate(&records, None, |w| seen.push(w.app.clone()));
        assert_eq!(n, 1);
        assert_eq!(seen, vec!["Terminal".to_string()]);
    }

    #[test]
    fn blank_titles_only_for_allow_listed_owners() {
        let records = vec![
            rec("Messages", "", 0),
            rec("Terminal", "", 0),
            rec("", "orphan", 0),
        ];
        let mut seen = Vec::new();
        enumerate(&records, None, |w| seen.push(w.display_title()));
        assert_eq!(seen, vec!["Messages".to_string()]);
        let p = GlobPattern::new("Messages");
        assert_eq!(enumerate(&records, Some(&p), |_| {}), 1);
    }

    #[test]
    fn enumeration_scans_everything_and_preserves_order() {
        let records = vec![
            rec("Terminal", "one", 0),
            rec("Safari", "two", 0),
            rec("Terminal", "three", 0),
        ];
        let p = GlobPattern::new("Terminal");
        let mut first: Option<&WindowInfo> = None;
        let n = enumerate(&records, Some(&p), |w| {
            if first.is_none() {
                first = Some(w);
            }
        });
        assert_eq!(n, 2);
        assert_eq!(first.map(|w| w.title.as_str()), Some("one"));
    }

    fn record_strategy() -> impl Strategy<Value = WindowInfo> {
        (
            prop::sample::select(vec!["Terminal", "Safari", "Messages", ""]),
            "[a-zA-Z ]{0,8}",
            prop::sample::select(vec![0, 0, 0, 3, 25]),
        )
            .prop_map(|(app, title, layer)| rec(app, &title, layer))
    }

    proptest! {
        #[test]
        fn anchoring_is_idempotent(raw in "[a-z*?]{0,8}") {
            let once = anchor(&raw);
            prop_assert_eq!(anchor(&once), once.clone());
        }

        #[test]
        fn empty_pattern_matches_every_eligible_record(
            records in prop::collection::vec(record_strategy(), 0..12)
        ) {
            let p = GlobPattern::new("");
            let eligible = records.iter().filter(|w| is_eligible(w)).count();
            prop_assert_eq!(enumerate(&records, Some(&p), |_| {}), eligible);
        }

        #[test]
        fn count_equals_visits(
            records in prop::collection::vec(record_strategy(), 0..12),
            raw in "[a-zA-Z*?]{0,4}",
        ) {
            let p = GlobPattern::new(raw);
            let mut visits = 0usize;
            let n = enumerate(&records, Some(&p), |_| visits += 1);
            prop_assert_eq!(n, visits);
        }
    }
}
