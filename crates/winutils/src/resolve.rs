//! Map a window-server record to its live Accessibility window.
//!
//! The two APIs share no handle type. When AX elements can report their
//! CGWindowID the match is exact; otherwise a window is identified by its
//! (title, position, size) triple, which is ambiguous for pixel-identical
//! duplicates and therefore takes an occurrence index.

use std::{fmt, str::FromStr};

use tracing::debug;

use crate::{geom::matches_bounds, ops::WinOps, window::WindowInfo};

/// How AX windows are correlated with snapshot records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Compare CGWindowIDs.
    WindowId,
    /// Compare title, position and size.
    Geometry,
}

impl Strategy {
    /// Choose the best strategy the platform supports.
    pub fn probe<O: WinOps + ?Sized>(ops: &O) -> Self {
        if ops.supports_window_ids() {
            Self::WindowId
        } else {
            Self::Geometry
        }
    }
}

/// User-facing override for [`Strategy`] selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveMode {
    /// Probe the platform once at startup.
    #[default]
    Auto,
    /// Force id correlation.
    Id,
    /// Force the title/position/size heuristic.
    Geometry,
}

impl ResolveMode {
    /// The concrete strategy this mode selects on `ops`.
    pub fn strategy<O: WinOps + ?Sized>(self, ops: &O) -> Strategy {
        match self {
            Self::Auto => Strategy::probe(ops),
            Self::Id => Strategy::WindowId,
            Self::Geometry => Strategy::Geometry,
        }
    }
}

impl FromStr for ResolveMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "id" => Ok(Self::Id),
            "geometry" | "geom" => Ok(Self::Geometry),
            other => Err(format!(
                "unknown resolve mode '{other}' (expected auto, id or geometry)"
            )),
        }
    }
}

impl fmt::Display for ResolveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auto => "auto",
            Self::Id => "id",
            Self::Geometry => "geometry",
        })
    }
}

/// Resolves records to AX windows with a strategy fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolver {
    strategy: Strategy,
}

impl Resolver {
    /// Resolver with a fixed strategy.
    pub const fn new(strategy: Strategy) -> Self {
        Self { strategy }
    }

    /// Probe `ops` once and keep the result.
    pub fn probe<O: WinOps + ?Sized>(ops: &O) -> Self {
        Self::new(Strategy::probe(ops))
    }

    /// The strategy in use.
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Find the AX window for `record`.
    ///
    /// `occurrence` skips that many otherwise-identical candidates under the
    /// geometry strategy; ids are unique so it is ignored there. Returns
    /// `None` when the process exposes no matching window. Candidates that
    /// are not returned are dropped before this returns.
    pub fn resolve<O: WinOps + ?Sized>(
        &self,
        ops: &O,
        record: &WindowInfo,
        occurrence: usize,
    ) -> Option<O::Window> {
        let candidates = ops.ax_windows(record.pid);
        if candidates.is_empty() {
            debug!(pid = record.pid, "resolve: process has no AX windows");
            return None;
        }
        let found = match self.strategy {
            Strategy::WindowId => {
                let Some(id) = record.id else {
                    debug!(pid = record.pid, "resolve: record has no window id");
                    return None;
                };
                candidates
                    .into_iter()
                    .find(|w| ops.ax_window_id(w) == Some(id))
            }
            Strategy::Geometry => candidates
                .into_iter()
                .filter(|w| same_window(ops, w, record))
                .nth(occurrence),
        };
        if found.is_none() {
            debug!(
                pid = record.pid,
                id = ?record.id,
                title = %record.title,
                strategy = ?self.strategy,
                occurrence,
                "resolve: no matching AX window"
            );
        }
        found
    }
}

/// Title, position and size all agree with the snapshot record.
fn same_window<O: WinOps + ?Sized>(ops: &O, w: &O::Window, record: &WindowInfo) -> bool {
    if ops.ax_title(w).unwrap_or_default() != record.title {
        return false;
    }
    match (ops.ax_position(w), ops.ax_size(w)) {
        (Ok(pos), Ok(size)) => matches_bounds(pos, size, &record.bounds),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use std::iter;

    use super::*;
    use crate::{
        geom::{Bounds, CGPoint, CGSize},
        ops::{MockAxWindow, MockWinOps, MockWindow},
    };

    const PID: i32 = 501;

    fn record(id: Option<u32>, title: &str, b: Bounds) -> WindowInfo {
        WindowInfo {
            pid: PID,
            app: "TextEdit".into(),
            title: title.into(),
            id,
            bounds: b,
            layer: 0,
        }
    }

    fn ax(id: Option<u32>, title: &str, b: Bounds) -> MockAxWindow {
        MockAxWindow::new(id, title, b.origin(), b.size())
    }

    #[test]
    fn probe_follows_capability() {
        let ops = MockWinOps::new();
        assert_eq!(Resolver::probe(&ops).strategy(), Strategy::WindowId);
        ops.set_supports_window_ids(false);
        assert_eq!(Resolver::probe(&ops).strategy(), Strategy::Geometry);
        assert_eq!(ResolveMode::Id.strategy(&ops), Strategy::WindowId);
        assert_eq!(ResolveMode::Auto.strategy(&ops), Strategy::Geometry);
    }

    #[test]
    fn resolve_mode_parses() {
        assert_eq!("auto".parse::<ResolveMode>(), Ok(ResolveMode::Auto));
        assert_eq!("ID".parse::<ResolveMode>(), Ok(ResolveMode::Id));
        assert_eq!("geometry".parse::<ResolveMode>(), Ok(ResolveMode::Geometry));
        assert!("fuzzy".parse::<ResolveMode>().is_err());
    }

    #[test]
    fn id_strategy_matches_by_window_id() {
        let ops = MockWinOps::new();
        let b = Bounds::new(10, 10, 300, 200);
        ops.set_ax_windows(
            PID,
            vec![ax(Some(11), "Same", b), ax(Some(12), "Same", b)],
        );
        let r = Resolver::new(Strategy::WindowId);
        let got = r.resolve(&ops, &record(Some(12), "Same", b), 0);
        assert_eq!(got, Some(MockWindow { pid: PID, index: 1 }));
        assert_eq!(r.resolve(&ops, &record(Some(99), "Same", b), 0), None);
        assert_eq!(r.resolve(&ops, &record(None, "Same", b), 0), None);
    }

    #[test]
    fn geometry_distinguishes_same_title_by_bounds() {
        let ops = MockWinOps::new();
        let a = Bounds::new(0, 25, 600, 400);
        let b = Bounds::new(200, 300, 600, 400);
        ops.set_ax_windows(PID, vec![ax(None, "Untitled", a), ax(None, "Untitled", b)]);
        let r = Resolver::new(Strategy::Geometry);
        assert_eq!(
            r.resolve(&ops, &record(None, "Untitled", b), 0),
            Some(MockWindow { pid: PID, index: 1 })
        );
        assert_eq!(
            r.resolve(&ops, &record(None, "Untitled", a), 0),
            Some(MockWindow { pid: PID, index: 0 })
        );
    }

    #[test]
    fn geometry_tolerates_fractional_ax_values() {
        let ops = MockWinOps::new();
        let b = Bounds::new(100, 50, 640, 480);
        ops.set_ax_windows(
            PID,
            vec![MockAxWindow::new(
                None,
                "Doc",
                CGPoint::new(100.5, 50.25),
                CGSize::new(640.0, 480.75),
            )],
        );
        let r = Resolver::new(Strategy::Geometry);
        assert!(r.resolve(&ops, &record(None, "Doc", b), 0).is_some());
    }

    #[test]
    fn geometry_occurrence_selects_among_duplicates() {
        let ops = MockWinOps::new();
        let b = Bounds::new(40, 40, 500, 500);
        let n = 3;
        ops.set_ax_windows(
            PID,
            iter::once(ax(None, "Other", b))
                .chain((0..n).map(|_| ax(None, "Untitled", b)))
                .collect(),
        );
        let r = Resolver::new(Strategy::Geometry);
        let rec = record(None, "Untitled", b);
        let mut seen = Vec::new();
        for k in 0..n {
            let w = r.resolve(&ops, &rec, k).expect("candidate");
            assert!(!seen.contains(&w));
            seen.push(w);
        }
        assert_eq!(seen.len(), n);
        assert_eq!(r.resolve(&ops, &rec, n), None);
        assert_eq!(r.resolve(&ops, &rec, n + 5), None);
    }

    #[test]
    fn no_ax_windows_is_none() {
        let ops = MockWinOps::new();
        let r = Resolver::new(Strategy::Geometry);
        let b = Bounds::new(0, 0, 10, 10);
        assert_eq!(r.resolve(&ops, &record(Some(1), "x", b), 0), None);
    }
}
