//! winutils: enumerate, match and manipulate macOS windows.
//!
//! The window server (`CGWindowListCopyWindowInfo`) tells us which windows
//! exist; the Accessibility API is how they are moved. The two share no
//! handle type, so the pieces here are:
//!
//! - [`list_windows`]: snapshot of on-screen windows in z-order.
//! - [`display_title`] and [`GlobPattern`]: "App - Title" strings and the
//!   shell-glob matching applied to them by [`enumerate`].
//! - [`Resolver`]: find the AX window behind a snapshot record, by window id
//!   when the platform allows it, otherwise by title and geometry.
//! - [`WinOps`]: the platform seam, with position/size accessors.
//! - [`place`] and [`bounce`]: the move and bounce behaviours.
//!
//! All mutating operations require Accessibility permission.

#[cfg(target_os = "macos")]
mod ax;
#[cfg(target_os = "macos")]
mod ax_private;
pub mod bounce;
#[cfg(target_os = "macos")]
mod cfutil;
mod error;
pub mod geom;
pub mod ops;
pub mod pattern;
pub mod place;
pub mod resolve;
pub mod screen;
mod title;
mod window;

#[cfg(target_os = "macos")]
pub use ax::AXElem;
pub use error::{Error, Result};
pub use ops::{RealWinOps, WinOps};
pub use pattern::{GlobPattern, enumerate, enumerate_windows, matching};
pub use place::{MoveOutcome, MoveRequest, Selector, move_window};
pub use resolve::{ResolveMode, Resolver, Strategy};
pub use screen::{Display, main_display};
pub use title::display_title;
pub use window::{LAYER_DESKTOP, WindowId, WindowInfo, list_windows};

/// Fail with [`Error::Permission`] unless the process may use Accessibility.
pub fn ax_check<O: WinOps + ?Sized>(ops: &O) -> Result<()> {
    if ops.ax_trusted() {
        Ok(())
    } else {
        Err(Error::Permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::MockWinOps;

    #[test]
    fn ax_check_follows_trust() {
        let ops = MockWinOps::new();
        assert_eq!(ax_check(&ops), Ok(()));
        ops.set_trusted(false);
        assert_eq!(ax_check(&ops), Err(Error::Permission));
        assert!(ops.calls().is_empty());
    }
}
