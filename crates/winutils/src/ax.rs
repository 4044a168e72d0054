//! Accessibility (AX) element access: per-process window lists and the
//! position/size/title attributes of individual windows.

use std::{cell::RefCell, collections::HashMap, ffi::c_void, ptr, thread_local};

use core_foundation::{
    array::{CFArray, CFArrayGetCount, CFArrayGetValueAtIndex},
    base::{CFRelease, CFRetain, CFTypeRef, TCFType},
    string::{CFString, CFStringRef},
};
use tracing::{debug, trace};

use crate::{
    error::{Error, Result},
    geom::{CGPoint, CGSize},
};

#[link(name = "ApplicationServices", kind = "framework")]
unsafe extern "C" {
    fn AXUIElementCreateApplication(pid: i32) -> *mut c_void;
    fn AXUIElementCopyAttributeValue(
        element: *mut c_void,
        attr: CFStringRef,
        value: *mut CFTypeRef,
    ) -> i32;
    fn AXUIElementSetAttributeValue(element: *mut c_void, attr: CFStringRef, value: CFTypeRef)
    -> i32;

    // AXValue helpers for CGPoint/CGSize
    fn AXValueCreate(theType: i32, valuePtr: *const c_void) -> CFTypeRef;
    fn AXValueGetValue(theValue: CFTypeRef, theType: i32, valuePtr: *mut c_void) -> bool;
}

// AXValue type constants (per Apple docs)
const K_AX_VALUE_CGPOINT_TYPE: i32 = 1;
const K_AX_VALUE_CGSIZE_TYPE: i32 = 2;
// AX error for invalid UI element (window closed / stale reference)
const K_AX_ERROR_INVALID_UI_ELEMENT: i32 = -25202;

pub(crate) const ATTR_WINDOWS: &str = "AXWindows";
pub(crate) const ATTR_TITLE: &str = "AXTitle";
pub(crate) const ATTR_POSITION: &str = "AXPosition";
pub(crate) const ATTR_SIZE: &str = "AXSize";

/// RAII guard that releases a retained AX element on drop.
///
/// Every AX handle handed out by this crate is one of these, so it is
/// released on all exit paths.
#[derive(Debug)]
pub struct AXElem(*mut c_void);

impl AXElem {
    /// Take ownership of an element returned by a `Create`/`Copy` call.
    #[inline]
    fn from_create(ptr: *mut c_void) -> Option<Self> {
        if ptr.is_null() { None } else { Some(Self(ptr)) }
    }

    /// Retain an element borrowed from a container (e.g. an `AXWindows` array).
    #[inline]
    fn retain_from_borrowed(ptr: *mut c_void) -> Option<Self> {
        if ptr.is_null() {
            return None;
        }
        unsafe { CFRetain(ptr as CFTypeRef) };
        Some(Self(ptr))
    }

    #[inline]
    pub(crate) fn as_ptr(&self) -> *mut c_void {
        self.0
    }
}

impl Drop for AXElem {
    fn drop(&mut self) {
        unsafe { CFRelease(self.0 as CFTypeRef) };
    }
}

thread_local! {
    static ATTR_STRINGS: RefCell<HashMap<&'static str, CFString>> = RefCell::new(HashMap::new());
}

pub(crate) fn cfstr(name: &'static str) -> CFStringRef {
    // Return a stable CFStringRef for known attribute/action names. This avoids
    // relying on toll‑free bridging of static strings, which can trip pointer
    // authentication on recent macOS versions when CoreFoundation treats the
    // input as an Objective‑C NSString internally.
    ATTR_STRINGS.with(|cell| {
        let mut m = cell.borrow_mut();
        let s = m.entry(name).or_insert_with(|| CFString::new(name));
        s.as_concrete_TypeRef()
    })
}

fn copy_attr(element: *mut c_void, attr: &'static str) -> Result<CFTypeRef> {
    let mut v: CFTypeRef = ptr::null_mut();
    let err = unsafe { AXUIElementCopyAttributeValue(element, cfstr(attr), &mut v) };
    if err != 0 {
        if err == K_AX_ERROR_INVALID_UI_ELEMENT {
            return Err(Error::WindowGone);
        }
        return Err(Error::AxCode(err));
    }
    if v.is_null() {
        return Err(Error::Unsupported);
    }
    Ok(v)
}

pub(crate) fn ax_get_point(element: &AXElem, attr: &'static str) -> Result<CGPoint> {
    let v = copy_attr(element.as_ptr(), attr)?;
    let mut p = CGPoint { x: 0.0, y: 0.0 };
    let ok =
        unsafe { AXValueGetValue(v, K_AX_VALUE_CGPOINT_TYPE, &mut p as *mut _ as *mut c_void) };
    unsafe { CFRelease(v) };
    if !ok {
        return Err(Error::Unsupported);
    }
    Ok(p)
}

pub(crate) fn ax_get_size(element: &AXElem, attr: &'static str) -> Result<CGSize> {
    let v = copy_attr(element.as_ptr(), attr)?;
    let mut s = CGSize {
        width: 0.0,
        height: 0.0,
    };
    let ok = unsafe { AXValueGetValue(v, K_AX_VALUE_CGSIZE_TYPE, &mut s as *mut _ as *mut c_void) };
    unsafe { CFRelease(v) };
    if !ok {
        return Err(Error::Unsupported);
    }
    Ok(s)
}

pub(crate) fn ax_get_string(element: &AXElem, attr: &'static str) -> Option<String> {
    let v = copy_attr(element.as_ptr(), attr).ok()?;
    let s = unsafe { CFString::wrap_under_create_rule(v as _) };
    Some(s.to_string())
}

fn set_value(element: &AXElem, attr: &'static str, v: CFTypeRef) -> Result<()> {
    if v.is_null() {
        return Err(Error::Unsupported);
    }
    let err = unsafe { AXUIElementSetAttributeValue(element.as_ptr(), cfstr(attr), v) };
    unsafe { CFRelease(v) };
    match err {
        0 => Ok(()),
        K_AX_ERROR_INVALID_UI_ELEMENT => Err(Error::WindowGone),
        code => Err(Error::AxCode(code)),
    }
}

pub(crate) fn ax_set_point(element: &AXElem, attr: &'static str, p: CGPoint) -> Result<()> {
    let v = unsafe { AXValueCreate(K_AX_VALUE_CGPOINT_TYPE, &p as *const _ as *const c_void) };
    set_value(element, attr, v)
}

pub(crate) fn ax_set_size(element: &AXElem, attr: &'static str, s: CGSize) -> Result<()> {
    let v = unsafe { AXValueCreate(K_AX_VALUE_CGSIZE_TYPE, &s as *const _ as *const c_void) };
    set_value(element, attr, v)
}

/// Top-level AX windows of `pid`, each retained independently of the
/// application element and the `AXWindows` array.
pub(crate) fn ax_windows(pid: i32) -> Result<Vec<AXElem>> {
    let app = AXElem::from_create(unsafe { AXUIElementCreateApplication(pid) })
        .ok_or(Error::AppElement(pid))?;
    let wins_ref = copy_attr(app.as_ptr(), ATTR_WINDOWS)?;
    let arr = unsafe { CFArray::<*const c_void>::wrap_under_create_rule(wins_ref as _) };
    let n = unsafe { CFArrayGetCount(arr.as_concrete_TypeRef()) };
    let mut out = Vec::with_capacity(n.max(0) as usize);
    for i in 0..n {
        let w = unsafe { CFArrayGetValueAtIndex(arr.as_concrete_TypeRef(), i) } as *mut c_void;
        if let Some(elem) = AXElem::retain_from_borrowed(w) {
            out.push(elem);
        }
    }
    trace!(pid, count = out.len(), "ax_windows");
    Ok(out)
}

/// Like [`ax_windows`], but an unreadable window list is just empty.
pub(crate) fn ax_windows_or_empty(pid: i32) -> Vec<AXElem> {
    ax_windows(pid).unwrap_or_else(|e| {
        debug!(pid, error = %e, "ax_windows: no accessible windows");
        Vec::new()
    })
}
