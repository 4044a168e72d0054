//! Selection and rendering of the window listing.

use std::io::Write;

use tracing::info;
use winutils::{GlobPattern, WinOps, WindowInfo, enumerate};

use crate::{cli::Cli, error::Result};

/// One text line for `w`.
///
/// Short form is `App - Title - x y w h`; long form prefixes pid, window id
/// (`-` when unknown) and layer.
pub fn format_line(w: &WindowInfo, long: bool) -> String {
    let b = &w.bounds;
    let short = format!(
        "{} - {} {} {} {}",
        w.display_title(),
        b.x,
        b.y,
        b.width,
        b.height
    );
    if long {
        let id = w.id.map_or_else(|| "-".to_string(), |id| id.to_string());
        format!("{}\t{}\t{}\t{}", w.pid, id, w.layer, short)
    } else {
        short
    }
}

/// Print matching windows to `out`; returns whether the tool succeeded.
///
/// Succeeds when anything matched, or when no filter was given at all.
pub fn run<O: WinOps + ?Sized>(ops: &O, cli: &Cli, out: &mut impl Write) -> Result<bool> {
    let pattern = cli
        .pattern
        .as_deref()
        .filter(|p| !p.is_empty())
        .map(GlobPattern::new);
    let records = ops.list_windows();
    let mut hits: Vec<&WindowInfo> = Vec::new();
    let count = enumerate(&records, pattern.as_ref(), |w| {
        if cli.id.is_none_or(|id| w.id == Some(id)) {
            hits.push(w);
        }
    });
    info!(
        total = records.len(),
        pattern_matches = count,
        listed = hits.len(),
        "lswin"
    );

    if cli.json {
        serde_json::to_writer_pretty(&mut *out, &hits)?;
        writeln!(out)?;
    } else {
        for w in &hits {
            writeln!(out, "{}", format_line(w, cli.long))?;
        }
    }
    Ok(!hits.is_empty() || (pattern.is_none() && cli.id.is_none()))
}

#[cfg(test)]
mod tests {
    use winutils::{geom::Bounds, ops::MockWinOps};

    use super::*;

    fn rec(pid: i32, app: &str, title: &str, id: u32, layer: i32) -> WindowInfo {
        WindowInfo {
            pid,
            app: app.into(),
            title: title.into(),
            id: Some(id),
            bounds: Bounds::new(10, 20, 400, 300),
            layer,
        }
    }

    fn ops() -> MockWinOps {
        let ops = MockWinOps::new();
        ops.set_windows(vec![
            rec(1, "Terminal", "bash", 100, 0),
            rec(2, "Safari", "Apple", 200, 0),
            rec(3, "Dock", "Dock", 300, 20),
            rec(4, "Messages", "", 400, 0),
        ]);
        ops
    }

    fn cli(pattern: Option<&str>) -> Cli {
        Cli {
            pattern: pattern.map(str::to_string),
            ..Cli::default()
        }
    }

    fn listing(cli: &Cli) -> (bool, String) {
        let mut buf = Vec::new();
        let ok = run(&ops(), cli, &mut buf).expect("listing");
        (ok, String::from_utf8(buf).expect("utf8"))
    }

    #[test]
    fn short_and_long_lines() {
        let w = rec(1, "Terminal", "bash", 100, 0);
        assert_eq!(format_line(&w, false), "Terminal - bash - 10 20 400 300");
        assert_eq!(
            format_line(&w, true),
            "1\t100\t0\tTerminal - bash - 10 20 400 300"
        );
    }

    #[test]
    fn lists_every_eligible_window_without_pattern() {
        let (ok, out) = listing(&cli(None));
        assert!(ok);
        assert_eq!(
            out.lines().collect::<Vec<_>>(),
            vec![
                "Terminal - bash - 10 20 400 300",
                "Safari - Apple - 10 20 400 300",
                "Messages - 10 20 400 300",
            ]
        );
    }

    #[test]
    fn empty_pattern_is_like_no_pattern() {
        assert_eq!(listing(&cli(Some(""))), listing(&cli(None)));
    }

    #[test]
    fn no_match_fails() {
        let (ok, out) = listing(&cli(Some("term")));
        assert!(!ok);
        assert!(out.is_empty());
        let (ok, out) = listing(&cli(Some("Term")));
        assert!(ok);
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn id_filter() {
        let mut c = cli(None);
        c.id = Some(200);
        let (ok, out) = listing(&c);
        assert!(ok);
        assert!(out.starts_with("Safari - Apple"));
        // Window ids on non-desktop layers are still excluded.
        c.id = Some(300);
        let (ok, _) = listing(&c);
        assert!(!ok);
    }

    #[test]
    fn json_output() {
        let mut c = cli(Some("Safari"));
        c.json = true;
        let (ok, out) = listing(&c);
        assert!(ok);
        assert!(out.contains("\"app\": \"Safari\""));
        assert!(out.contains("\"id\": 200"));
    }
}
