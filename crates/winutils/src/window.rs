use serde::Serialize;

use crate::geom::Bounds;

/// Alias for CoreGraphics CGWindowID (kCGWindowNumber).
pub type WindowId = u32;

/// Layer of ordinary application windows; everything else is system chrome.
pub const LAYER_DESKTOP: i32 = 0;

/// One entry of the window-server snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowInfo {
    /// Owning process id.
    pub pid: i32,
    /// Owning application name (`kCGWindowOwnerName`); empty when absent.
    pub app: String,
    /// Window title (`kCGWindowName`); empty when absent or hidden.
    pub title: String,
    /// `kCGWindowNumber`, when the window server reports one.
    pub id: Option<WindowId>,
    /// Integer bounds in global top-left-origin coordinates.
    pub bounds: Bounds,
    /// `kCGWindowLayer`.
    pub layer: i32,
}

impl WindowInfo {
    /// "App - Title" as used for pattern matching.
    pub fn display_title(&self) -> String {
        crate::title::display_title(&self.app, &self.title)
    }
}

#[cfg(target_os = "macos")]
pub use self::macos::list_windows;

/// Snapshot of on-screen windows; always empty off macOS.
#[cfg(not(target_os = "macos"))]
pub fn list_windows() -> Vec<WindowInfo> {
    tracing::debug!("list_windows: window server unavailable on this platform");
    Vec::new()
}

#[cfg(target_os = "macos")]
mod macos {
    use std::ffi::c_void;

    use core_foundation::{
        array::{CFArray, CFArrayGetCount, CFArrayGetValueAtIndex},
        base::{CFGetTypeID, CFTypeRef, TCFType},
        dictionary::{CFDictionaryGetTypeID, CFDictionaryRef},
    };
    use core_graphics::window as cgw;
    use tracing::{trace, warn};

    use super::WindowInfo;
    use crate::cfutil::{dict_get_bounds, dict_get_i32, dict_get_string};

    #[link(name = "CoreGraphics", kind = "framework")]
    unsafe extern "C" {
        fn CGWindowListCopyWindowInfo(option: u32, relativeToWindow: u32) -> CFTypeRef; // CFArrayRef
    }

    const K_CG_WINDOW_LIST_OPTION_ON_SCREEN_ONLY: u32 = 1 << 0;
    const K_CG_WINDOW_LIST_OPTION_EXCLUDE_DESKTOP_ELEMENTS: u32 = 1 << 4;
    const K_CG_NULL_WINDOW_ID: u32 = 0;

    /// Snapshot on-screen windows in the window server's front-to-back order.
    ///
    /// Records on every layer are returned; callers filter. A failed query
    /// yields an empty list.
    pub fn list_windows() -> Vec<WindowInfo> {
        trace!("list_windows");
        let mut out = Vec::new();
        unsafe {
            let arr_ref = CGWindowListCopyWindowInfo(
                K_CG_WINDOW_LIST_OPTION_ON_SCREEN_ONLY
                    | K_CG_WINDOW_LIST_OPTION_EXCLUDE_DESKTOP_ELEMENTS,
                K_CG_NULL_WINDOW_ID,
            );
            if arr_ref.is_null() {
                warn!("list_windows: CGWindowListCopyWindowInfo returned null");
                return out;
            }
            let arr: CFArray<*const c_void> = CFArray::wrap_under_create_rule(arr_ref as _);
            for i in 0..CFArrayGetCount(arr.as_concrete_TypeRef()) {
                let item = CFArrayGetValueAtIndex(arr.as_concrete_TypeRef(), i) as CFTypeRef;
                if item.is_null() || CFGetTypeID(item) != CFDictionaryGetTypeID() {
                    continue;
                }
                let d = item as CFDictionaryRef;
                let Some(pid) = dict_get_i32(d, cgw::kCGWindowOwnerPID) else {
                    trace!(index = i, "list_windows: entry without owner pid");
                    continue;
                };
                let id = dict_get_i32(d, cgw::kCGWindowNumber)
                    .filter(|n| *n > 0)
                    .map(|n| n as u32);
                out.push(WindowInfo {
                    pid,
                    app: dict_get_string(d, cgw::kCGWindowOwnerName).unwrap_or_default(),
                    title: dict_get_string(d, cgw::kCGWindowName).unwrap_or_default(),
                    id,
                    bounds: dict_get_bounds(d, cgw::kCGWindowBounds).unwrap_or_default(),
                    layer: dict_get_i32(d, cgw::kCGWindowLayer).unwrap_or(0),
                });
            }
        }
        trace!(count = out.len(), "list_windows: done");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_title_uses_owner_and_title() {
        let w = WindowInfo {
            pid: 1,
            app: "Terminal".into(),
            title: "bash".into(),
            id: Some(7),
            bounds: Bounds::new(0, 0, 400, 300),
            layer: LAYER_DESKTOP,
        };
        assert_eq!(w.display_title(), "Terminal - bash");
    }
}
