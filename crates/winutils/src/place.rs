//! Move and resize a single window.

use tracing::{debug, info};

use crate::{
    error::{Error, Result},
    geom::{CGPoint, CGSize, point_eq, size_eq},
    ops::WinOps,
    pattern::{GlobPattern, is_eligible, matching},
    resolve::Resolver,
    screen::Display,
    window::{WindowId, WindowInfo},
};

/// Requested geometry for a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    /// Requested left edge, or right-edge offset when negative.
    pub x: i32,
    /// Requested top edge, or bottom-edge offset when negative.
    pub y: i32,
    /// New width and height; `None` keeps the current size.
    pub size: Option<(i32, i32)>,
    /// Treat negative coordinates as offsets from the right/bottom edge of
    /// the main display.
    pub from_edge: bool,
}

impl MoveRequest {
    /// Move to `(x, y)`, keeping the current size.
    pub const fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            size: None,
            from_edge: true,
        }
    }

    /// Also resize; both dimensions must be positive.
    pub fn with_size(mut self, width: i32, height: i32) -> Result<Self> {
        if width <= 0 {
            return Err(Error::InvalidArgument("width must be positive integer".into()));
        }
        if height <= 0 {
            return Err(Error::InvalidArgument("height must be positive integer".into()));
        }
        self.size = Some((width, height));
        Ok(self)
    }

    /// Interpret negative coordinates literally.
    pub const fn absolute(mut self) -> Self {
        self.from_edge = false;
        self
    }

    fn requested_size(&self) -> Option<CGSize> {
        self.size.map(|(w, h)| CGSize::new(f64::from(w), f64::from(h)))
    }
}

/// Where the window's top-left corner should go for a window of `size`.
///
/// With `from_edge`, a negative x is measured from the display's right edge
/// to the window's right edge, and likewise for y and the bottom edge.
pub fn target_origin(display: &Display, req: &MoveRequest, size: CGSize) -> CGPoint {
    let f = &display.frame;
    let x = f64::from(req.x);
    let y = f64::from(req.y);
    let x = if req.from_edge && req.x < 0 {
        f.right() - size.width + x
    } else {
        x
    };
    let y = if req.from_edge && req.y < 0 {
        f.bottom() - size.height + y
    } else {
        y
    };
    CGPoint::new(x, y)
}

/// Result of [`move_window`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// At least one attribute was written.
    Moved {
        /// The position was written.
        position: bool,
        /// The size was written.
        size: bool,
    },
    /// The window was already where it was asked to be.
    Unchanged,
    /// No AX window corresponds to the record.
    Unresolved,
}

impl MoveOutcome {
    /// True when the window now has the requested geometry.
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Unresolved)
    }
}

/// Resolve `record` and bring it to the requested geometry.
///
/// Position is written before size, and each is written only if the current
/// AX value differs. The AX handle is released before returning.
pub fn move_window<O: WinOps + ?Sized>(
    ops: &O,
    resolver: &Resolver,
    record: &WindowInfo,
    req: &MoveRequest,
    occurrence: usize,
) -> Result<MoveOutcome> {
    let Some(win) = resolver.resolve(ops, record, occurrence) else {
        return Ok(MoveOutcome::Unresolved);
    };
    let cur_pos = ops.ax_position(&win)?;
    let cur_size = ops.ax_size(&win)?;
    let want_size = req.requested_size();
    let target = target_origin(&ops.main_display(), req, want_size.unwrap_or(cur_size));

    let mut position = false;
    if !point_eq(cur_pos, target) {
        debug!(from = ?cur_pos, to = ?target, "move_window: set position");
        ops.ax_set_position(&win, target)?;
        position = true;
    }
    let mut size = false;
    if let Some(want) = want_size {
        if !size_eq(cur_size, want) {
            debug!(from = ?cur_size, to = ?want, "move_window: set size");
            ops.ax_set_size(&win, want)?;
            size = true;
        }
    }

    let outcome = if position || size {
        MoveOutcome::Moved { position, size }
    } else {
        MoveOutcome::Unchanged
    };
    info!(app = %record.app, title = %record.title, ?outcome, "move_window");
    Ok(outcome)
}

/// How the target window is chosen.
#[derive(Debug, Clone)]
pub enum Selector {
    /// Glob against "App - Title".
    Pattern(GlobPattern),
    /// Exact CGWindowID.
    Id(WindowId),
}

/// Every eligible record the selector picks, in snapshot order.
pub fn select<'a>(records: &'a [WindowInfo], selector: &'a Selector) -> Vec<&'a WindowInfo> {
    match selector {
        Selector::Pattern(p) => matching(records, Some(p)).collect(),
        Selector::Id(id) => records
            .iter()
            .filter(|w| is_eligible(w) && w.id == Some(*id))
            .collect(),
    }
}
