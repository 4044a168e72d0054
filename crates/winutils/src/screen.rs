//! Main display geometry.

use crate::geom::Rect;

/// Menu bar height used when AppKit cannot tell us.
pub const DEFAULT_MENU_BAR: f64 = 22.0;

/// Main display frame in global top-left-origin coordinates, plus the height
/// of the menu bar along its top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Display {
    /// Display bounds.
    pub frame: Rect,
    /// Menu bar height along the top edge.
    pub menu_bar: f64,
}

impl Display {
    /// Construct a display description.
    pub const fn new(frame: Rect, menu_bar: f64) -> Self {
        Self { frame, menu_bar }
    }
}

#[cfg(target_os = "macos")]
pub use self::macos::main_display;

/// Main display; zero-sized off macOS.
#[cfg(not(target_os = "macos"))]
pub fn main_display() -> Display {
    Display::new(Rect::new(0.0, 0.0, 0.0, 0.0), DEFAULT_MENU_BAR)
}

#[cfg(target_os = "macos")]
mod macos {
    use core_graphics::display::CGDisplay;
    use objc2_app_kit::NSScreen;
    use objc2_foundation::MainThreadMarker;
    use tracing::debug;

    use super::{DEFAULT_MENU_BAR, Display};
    use crate::geom::Rect;

    /// Height of the menu bar on the main screen, measured as the gap between
    /// the top of the screen frame and the top of its visible frame.
    fn menu_bar_height() -> Option<f64> {
        let mtm = MainThreadMarker::new()?;
        let screen = NSScreen::mainScreen(mtm)?;
        let frame = screen.frame();
        let visible = screen.visibleFrame();
        // Cocoa frames are bottom-left origin; the menu bar sits above the
        // visible frame's max Y.
        let h = (frame.origin.y + frame.size.height) - (visible.origin.y + visible.size.height);
        (h >= 0.0).then_some(h)
    }

    /// Main display frame and menu bar height.
    pub fn main_display() -> Display {
        let b = CGDisplay::main().bounds();
        let frame = Rect::new(b.origin.x, b.origin.y, b.size.width, b.size.height);
        let menu_bar = menu_bar_height().unwrap_or_else(|| {
            debug!("main_display: AppKit screen unavailable; assuming default menu bar");
            DEFAULT_MENU_BAR
        });
        Display::new(frame, menu_bar)
    }
}
