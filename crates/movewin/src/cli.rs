//! Command-line interface definitions for movewin.

use clap::Parser;
use logging::LogArgs;
use winutils::{GlobPattern, MoveRequest, ResolveMode, Selector, WindowId};

use crate::error::{Error, Result};

/// Command-line interface for the `movewin` binary.
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "movewin",
    about = "Move (and optionally resize) the first window matching a pattern",
    override_usage = "movewin [OPTIONS] PATTERN X Y [WIDTH HEIGHT]\n       movewin [OPTIONS] --id ID X Y [WIDTH HEIGHT]",
    version
)]
pub struct Cli {
    /// Logging controls shared across the window tools.
    #[command(flatten)]
    pub log: LogArgs,

    /// Select the window by CGWindowID instead of by pattern.
    #[arg(long, value_name = "ID")]
    pub id: Option<WindowId>,

    /// Among pixel-identical windows, act on the Nth (0-based) when resolving
    /// by geometry.
    #[arg(long, default_value_t = 0, value_name = "N")]
    pub occurrence: usize,

    /// Treat negative X/Y as literal coordinates rather than offsets from the
    /// right/bottom edge of the main display.
    #[arg(long)]
    pub absolute: bool,

    /// How to find the Accessibility window: auto, id or geometry.
    #[arg(long, default_value_t = ResolveMode::Auto, value_name = "MODE")]
    pub resolve: ResolveMode,

    /// PATTERN (unless --id is given), then X Y and optionally WIDTH HEIGHT.
    #[arg(value_name = "ARGS", allow_negative_numbers = true, num_args = 0..)]
    pub args: Vec<String>,
}

fn parse_int(name: &str, s: &str) -> Result<i32> {
    s.trim()
        .parse()
        .map_err(|_| Error::usage(format!("{name} must be an integer, got '{s}'")))
}

impl Cli {
    /// Interpret the positional arguments as a selector and a move request.
    pub fn target(&self) -> Result<(Selector, MoveRequest)> {
        let mut rest = self.args.as_slice();
        let selector = match self.id {
            Some(id) => Selector::Id(id),
            None => {
                let Some((pattern, tail)) = rest.split_first() else {
                    return Err(Error::usage("missing required window title"));
                };
                if pattern.is_empty() {
                    return Err(Error::usage("missing required window title"));
                }
                rest = tail;
                Selector::Pattern(GlobPattern::new(pattern.as_str()))
            }
        };
        let req = match rest {
            [] | [_] => {
                return Err(Error::usage("missing required window x and y coordinates"));
            }
            [x, y] => MoveRequest::new(parse_int("x", x)?, parse_int("y", y)?),
            [_, _, _] => return Err(Error::usage("height is required if width is present")),
            [x, y, w, h, extra @ ..] => {
                if !extra.is_empty() {
                    return Err(Error::usage("too many arguments"));
                }
                MoveRequest::new(parse_int("x", x)?, parse_int("y", y)?)
                    .with_size(parse_int("width", w)?, parse_int("height", h)?)?
            }
        };
        let req = if self.absolute { req.absolute() } else { req };
        Ok((selector, req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("movewin").chain(argv.iter().copied()))
            .expect("valid command line")
    }

    #[test]
    fn pattern_and_position() {
        let (sel, req) = parse(&["Terminal", "10", "20"]).target().expect("target");
        assert!(matches!(sel, Selector::Pattern(p) if p.raw() == "Terminal"));
        assert_eq!(req, MoveRequest::new(10, 20));
    }

    #[test]
    fn negative_offsets_and_size() {
        let (_, req) = parse(&["Safari", "-50", "-50", "800", "600"])
            .target()
            .expect("target");
        assert_eq!((req.x, req.y, req.size), (-50, -50, Some((800, 600))));
        assert!(req.from_edge);
        let (_, req) = parse(&["--absolute", "Safari", "-50", "-50"])
            .target()
            .expect("target");
        assert!(!req.from_edge);
    }

    #[test]
    fn id_selector_takes_only_coordinates() {
        let (sel, req) = parse(&["--id", "42", "0", "25"]).target().expect("target");
        assert!(matches!(sel, Selector::Id(42)));
        assert_eq!(req, MoveRequest::new(0, 25));
    }

    #[test]
    fn usage_errors() {
        let err = |argv: &[&str]| parse(argv).target().err().map(|e| e.to_string());
        assert_eq!(err(&[]), Some("missing required window title".into()));
        assert_eq!(
            err(&["Terminal", "1"]),
            Some("missing required window x and y coordinates".into())
        );
        assert_eq!(
            err(&["Terminal", "1", "2", "3"]),
            Some("height is required if width is present".into())
        );
        assert_eq!(
            err(&["Terminal", "1", "2", "0", "3"]),
            Some("invalid argument: width must be positive integer".into())
        );
        assert_eq!(
            err(&["Terminal", "x", "2"]),
            Some("x must be an integer, got 'x'".into())
        );
    }

    #[test]
    fn resolve_mode_flag() {
        assert_eq!(parse(&["T", "1", "2"]).resolve, ResolveMode::Auto);
        assert_eq!(
            parse(&["--resolve", "geometry", "T", "1", "2"]).resolve,
            ResolveMode::Geometry
        );
    }
}
