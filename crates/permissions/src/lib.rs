//! Simple, macOS-only permission checks for the window tools.
//!
//! This crate exposes a minimal API to query whether the process may drive
//! other applications' windows (Accessibility) and read their titles
//! (Screen Recording). It returns booleans and never prompts: the tools print
//! a message and exit when a required permission is missing.
//!
//! Notes
//! - `accessibility_ok()` gates every move/resize.
//! - `screen_recording_ok()` only affects listings: without it the window
//!   server reports blank titles for other processes' windows.
//! - On platforms other than macOS every check returns `false`.
//!
//! All calls are fast and side‑effect free.

#[cfg(target_os = "macos")]
#[link(name = "ApplicationServices", kind = "framework")]
unsafe extern "C" {
    fn AXIsProcessTrusted() -> bool;
    fn CGPreflightScreenCaptureAccess() -> bool;
}

/// Check if the process is trusted to use the Accessibility API.
#[cfg(target_os = "macos")]
pub fn accessibility_ok() -> bool {
    unsafe { AXIsProcessTrusted() }
}

/// Check if the process is trusted to use the Accessibility API.
#[cfg(not(target_os = "macos"))]
pub fn accessibility_ok() -> bool {
    false
}

/// Check if the application has the "Screen Recording" permission.
///
/// Returns `true` when the process is allowed to see window titles in
/// `CGWindowListCopyWindowInfo`, and `false` otherwise.
#[cfg(target_os = "macos")]
pub fn screen_recording_ok() -> bool {
    unsafe { CGPreflightScreenCaptureAccess() }
}

/// Check if the application has the "Screen Recording" permission.
#[cfg(not(target_os = "macos"))]
pub fn screen_recording_ok() -> bool {
    false
}

/// Current permission status for the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionsStatus {
    /// Accessibility (AX) permission; `true` if granted.
    pub accessibility_ok: bool,
    /// Screen Recording permission; `true` if granted.
    pub screen_recording_ok: bool,
}

/// Query both permissions at once.
pub fn check_permissions() -> PermissionsStatus {
    PermissionsStatus {
        accessibility_ok: accessibility_ok(),
        screen_recording_ok: screen_recording_ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_agrees_with_individual_checks() {
        let s = check_permissions();
        assert_eq!(s.accessibility_ok, accessibility_ok());
        assert_eq!(s.screen_recording_ok, screen_recording_ok());
    }
}
