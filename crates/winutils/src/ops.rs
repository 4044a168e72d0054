//! The platform seam: everything the tools need from the window server and
//! the Accessibility API, behind one trait.

use crate::{
    Result as WinResult,
    geom::{CGPoint, CGSize},
    screen::Display,
    window::{WindowId, WindowInfo},
};

/// Trait abstraction over window operations to improve testability.
pub trait WinOps {
    /// Live Accessibility handle for one window. Dropping it releases it.
    type Window;

    /// Whether this process may use the Accessibility API.
    fn ax_trusted(&self) -> bool;
    /// Snapshot of on-screen windows in native z-order.
    fn list_windows(&self) -> Vec<WindowInfo>;
    /// Capability probe: can AX windows be correlated with window ids?
    fn supports_window_ids(&self) -> bool;
    /// Top-level AX windows of `pid`; empty when none are accessible.
    fn ax_windows(&self, pid: i32) -> Vec<Self::Window>;
    /// CGWindowID behind an AX window, when the platform can tell.
    fn ax_window_id(&self, win: &Self::Window) -> Option<WindowId>;
    /// `AXTitle` of the window.
    fn ax_title(&self, win: &Self::Window) -> Option<String>;
    /// Top-left corner in global coordinates.
    fn ax_position(&self, win: &Self::Window) -> WinResult<CGPoint>;
    /// Move the top-left corner to `pos`.
    fn ax_set_position(&self, win: &Self::Window, pos: CGPoint) -> WinResult<()>;
    /// Current window size.
    fn ax_size(&self, win: &Self::Window) -> WinResult<CGSize>;
    /// Resize the window.
    fn ax_set_size(&self, win: &Self::Window, size: CGSize) -> WinResult<()>;
    /// Geometry of the main display.
    fn main_display(&self) -> Display;
}

#[cfg(target_os = "macos")]
pub use self::real::RealWinOps;

#[cfg(target_os = "macos")]
mod real {
    use super::WinOps;
    use crate::{
        Result as WinResult,
        ax::{
            self, ATTR_POSITION, ATTR_SIZE, ATTR_TITLE, AXElem, ax_get_point, ax_get_size,
            ax_get_string, ax_set_point, ax_set_size,
        },
        ax_private,
        geom::{CGPoint, CGSize},
        screen::{self, Display},
        window::{self, WindowId, WindowInfo},
    };

    /// Production implementation of WinOps delegating to crate functions.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct RealWinOps;

    impl WinOps for RealWinOps {
        type Window = AXElem;

        fn ax_trusted(&self) -> bool {
            permissions::accessibility_ok()
        }
        fn list_windows(&self) -> Vec<WindowInfo> {
            window::list_windows()
        }
        fn supports_window_ids(&self) -> bool {
            ax_private::window_ids_available()
        }
        fn ax_windows(&self, pid: i32) -> Vec<AXElem> {
            ax::ax_windows_or_empty(pid)
        }
        fn ax_window_id(&self, win: &AXElem) -> Option<WindowId> {
            ax_private::window_id_for_ax_element(win.as_ptr())
        }
        fn ax_title(&self, win: &AXElem) -> Option<String> {
            ax_get_string(win, ATTR_TITLE)
        }
        fn ax_position(&self, win: &AXElem) -> WinResult<CGPoint> {
            ax_get_point(win, ATTR_POSITION)
        }
        fn ax_set_position(&self, win: &AXElem, pos: CGPoint) -> WinResult<()> {
            ax_set_point(win, ATTR_POSITION, pos)
        }
        fn ax_size(&self, win: &AXElem) -> WinResult<CGSize> {
            ax_get_size(win, ATTR_SIZE)
        }
        fn ax_set_size(&self, win: &AXElem, size: CGSize) -> WinResult<()> {
            ax_set_size(win, ATTR_SIZE, size)
        }
        fn main_display(&self) -> Display {
            screen::main_display()
        }
    }
}

#[cfg(not(target_os = "macos"))]
pub use self::unsupported::RealWinOps;

#[cfg(not(target_os = "macos"))]
mod unsupported {
    use super::WinOps;
    use crate::{
        Result as WinResult,
        geom::{CGPoint, CGSize},
        screen::{self, Display},
        window::{self, WindowId, WindowInfo},
    };

    /// Stand-in for platforms without a window server: no windows, no AX.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct RealWinOps;

    /// Uninhabited: no AX window can exist here.
    #[derive(Debug)]
    pub enum NoWindow {}

    impl WinOps for RealWinOps {
        type Window = NoWindow;

        fn ax_trusted(&self) -> bool {
            permissions::accessibility_ok()
        }
        fn list_windows(&self) -> Vec<WindowInfo> {
            window::list_windows()
        }
        fn supports_window_ids(&self) -> bool {
            false
        }
        fn ax_windows(&self, _pid: i32) -> Vec<NoWindow> {
            Vec::new()
        }
        fn ax_window_id(&self, win: &NoWindow) -> Option<WindowId> {
            match *win {}
        }
        fn ax_title(&self, win: &NoWindow) -> Option<String> {
            match *win {}
        }
        fn ax_position(&self, win: &NoWindow) -> WinResult<CGPoint> {
            match *win {}
        }
        fn ax_set_position(&self, win: &NoWindow, _pos: CGPoint) -> WinResult<()> {
            match *win {}
        }
        fn ax_size(&self, win: &NoWindow) -> WinResult<CGSize> {
            match *win {}
        }
        fn ax_set_size(&self, win: &NoWindow, _size: CGSize) -> WinResult<()> {
            match *win {}
        }
        fn main_display(&self) -> Display {
            screen::main_display()
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use self::mock::{MockAxWindow, MockWindow, MockWinOps};

#[cfg(any(test, feature = "test-utils"))]
mod mock {
    use std::{
        collections::HashMap,
        sync::{
            Arc,
            atomic::{AtomicBool, Ordering},
        },
    };

    use parking_lot::Mutex;

    use super::WinOps;
    use crate::{
        Error, Result as WinResult,
        geom::{CGPoint, CGSize, Rect},
        screen::Display,
        window::{WindowId, WindowInfo},
    };

    /// Accessibility-side state of one fake window.
    #[derive(Debug, Clone, PartialEq)]
    pub struct MockAxWindow {
        /// Reported window id, if any.
        pub id: Option<WindowId>,
        /// `AXTitle`.
        pub title: String,
        /// `AXPosition`.
        pub pos: CGPoint,
        /// `AXSize`.
        pub size: CGSize,
    }

    impl MockAxWindow {
        /// Construct a fake AX window.
        pub fn new(id: Option<WindowId>, title: &str, pos: CGPoint, size: CGSize) -> Self {
            Self {
                id,
                title: title.to_string(),
                pos,
                size,
            }
        }
    }

    /// Handle into [`MockWinOps`]: owning pid plus index in its AX window list.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MockWindow {
        /// Owning process.
        pub pid: i32,
        /// Position in the process's AX window list.
        pub index: usize,
    }

    /// Simple mock implementation for tests (enabled with `test-utils` feature).
    #[derive(Clone)]
    pub struct MockWinOps {
        calls: Arc<Mutex<Vec<String>>>,
        windows: Arc<Mutex<Vec<WindowInfo>>>,
        ax: Arc<Mutex<HashMap<i32, Vec<MockAxWindow>>>>,
        display: Arc<Mutex<Display>>,
        ids_supported: Arc<AtomicBool>,
        trusted: Arc<AtomicBool>,
        fail_writes: Arc<AtomicBool>,
    }

    impl Default for MockWinOps {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockWinOps {
        /// Empty window list, a 1920x1080 display, ids supported, trusted.
        pub fn new() -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                windows: Arc::new(Mutex::new(Vec::new())),
                ax: Arc::new(Mutex::new(HashMap::new())),
                display: Arc::new(Mutex::new(Display::new(
                    Rect::new(0.0, 0.0, 1920.0, 1080.0),
                    25.0,
                ))),
                ids_supported: Arc::new(AtomicBool::new(true)),
                trusted: Arc::new(AtomicBool::new(true)),
                fail_writes: Arc::new(AtomicBool::new(false)),
            }
        }
        /// Replace the window-server snapshot.
        pub fn set_windows(&self, wins: Vec<WindowInfo>) {
            *self.windows.lock() = wins;
        }
        /// Replace the AX windows of `pid`.
        pub fn set_ax_windows(&self, pid: i32, wins: Vec<MockAxWindow>) {
            self.ax.lock().insert(pid, wins);
        }
        /// Current AX state behind a handle.
        pub fn ax_window(&self, win: MockWindow) -> Option<MockAxWindow> {
            self.ax.lock().get(&win.pid)?.get(win.index).cloned()
        }
        /// Replace the main display.
        pub fn set_display(&self, display: Display) {
            *self.display.lock() = display;
        }
        /// Toggle the window-id capability probe.
        pub fn set_supports_window_ids(&self, v: bool) {
            self.ids_supported.store(v, Ordering::SeqCst);
        }
        /// Grant or revoke Accessibility trust.
        pub fn set_trusted(&self, v: bool) {
            self.trusted.store(v, Ordering::SeqCst);
        }
        /// Make every attribute write fail.
        pub fn set_fail_writes(&self, v: bool) {
            self.fail_writes.store(v, Ordering::SeqCst);
        }
        /// Recorded operation names, in order.
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }
        /// Whether an operation named `s` was recorded.
        pub fn calls_contains(&self, s: &str) -> bool {
            self.calls.lock().iter().any(|x| x == s)
        }
        fn note(&self, s: &str) {
            self.calls.lock().push(s.to_string());
        }
        fn read<T>(&self, win: &MockWindow, f: impl FnOnce(&MockAxWindow) -> T) -> WinResult<T> {
            self.ax
                .lock()
                .get(&win.pid)
                .and_then(|v| v.get(win.index))
                .map(f)
                .ok_or(Error::WindowGone)
        }
        fn write(&self, win: &MockWindow, f: impl FnOnce(&mut MockAxWindow)) -> WinResult<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(Error::AxCode(-25200));
            }
            let mut g = self.ax.lock();
            let w = g
                .get_mut(&win.pid)
                .and_then(|v| v.get_mut(win.index))
                .ok_or(Error::WindowGone)?;
            f(w);
            Ok(())
        }
    }

    impl WinOps for MockWinOps {
        type Window = MockWindow;

        fn ax_trusted(&self) -> bool {
            self.trusted.load(Ordering::SeqCst)
        }
        fn list_windows(&self) -> Vec<WindowInfo> {
            self.note("list_windows");
            self.windows.lock().clone()
        }
        fn supports_window_ids(&self) -> bool {
            self.ids_supported.load(Ordering::SeqCst)
        }
        fn ax_windows(&self, pid: i32) -> Vec<MockWindow> {
            self.note("ax_windows");
            let n = self.ax.lock().get(&pid).map_or(0, Vec::len);
            (0..n).map(|index| MockWindow { pid, index }).collect()
        }
        fn ax_window_id(&self, win: &MockWindow) -> Option<WindowId> {
            self.read(win, |w| w.id).ok().flatten()
        }
        fn ax_title(&self, win: &MockWindow) -> Option<String> {
            self.read(win, |w| w.title.clone()).ok()
        }
        fn ax_position(&self, win: &MockWindow) -> WinResult<CGPoint> {
            self.read(win, |w| w.pos)
        }
        fn ax_set_position(&self, win: &MockWindow, pos: CGPoint) -> WinResult<()> {
            self.note("set_position");
            self.write(win, |w| w.pos = pos)
        }
        fn ax_size(&self, win: &MockWindow) -> WinResult<CGSize> {
            self.read(win, |w| w.size)
        }
        fn ax_set_size(&self, win: &MockWindow, size: CGSize) -> WinResult<()> {
            self.note("set_size");
            self.write(win, |w| w.size = size)
        }
        fn main_display(&self) -> Display {
            *self.display.lock()
        }
    }
}
