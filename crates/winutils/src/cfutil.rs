use core_foundation::{
    base::{CFGetTypeID, CFTypeRef, TCFType},
    dictionary::{CFDictionaryGetTypeID, CFDictionaryGetValue, CFDictionaryRef},
    number::CFNumber,
    string::{CFString, CFStringRef},
};

use crate::geom::Bounds;

/// Borrow a CFStringRef and convert to Rust String.
pub(crate) fn cfstring_to_string(s: CFStringRef) -> String {
    // SAFETY: CFStringRef obtained from system APIs; wrap under get rule.
    let cf = unsafe { CFString::wrap_under_get_rule(s) };
    cf.to_string()
}

/// Borrowed dictionary value for `key`, or null.
fn dict_value(dict: CFDictionaryRef, key: CFStringRef) -> CFTypeRef {
    unsafe { CFDictionaryGetValue(dict, key as *const core::ffi::c_void) }
}

/// Get a String value for the given CFDictionary key.
///
/// Values that are present but not strings are treated as absent.
pub(crate) fn dict_get_string(dict: CFDictionaryRef, key: CFStringRef) -> Option<String> {
    let value = dict_value(dict, key);
    if value.is_null() || unsafe { CFGetTypeID(value) } != CFString::type_id() {
        return None;
    }
    Some(cfstring_to_string(value as CFStringRef))
}

/// Get a 32-bit integer from CFDictionary for the given key.
pub(crate) fn dict_get_i32(dict: CFDictionaryRef, key: CFStringRef) -> Option<i32> {
    dict_get_f64(dict, key).map(|v| v as i32)
}

/// Get an f64 from CFDictionary for the given key.
pub(crate) fn dict_get_f64(dict: CFDictionaryRef, key: CFStringRef) -> Option<f64> {
    let value = dict_value(dict, key);
    if value.is_null() || unsafe { CFGetTypeID(value) } != CFNumber::type_id() {
        return None;
    }
    let n = unsafe { CFNumber::wrap_under_get_rule(value as _) };
    n.to_f64()
}

/// Read a `kCGWindowBounds`-style sub-dictionary (`X`, `Y`, `Width`,
/// `Height`), truncating each component to an integer.
pub(crate) fn dict_get_bounds(dict: CFDictionaryRef, key: CFStringRef) -> Option<Bounds> {
    let value = dict_value(dict, key);
    if value.is_null() || unsafe { CFGetTypeID(value) != CFDictionaryGetTypeID() } {
        return None;
    }
    let inner = value as CFDictionaryRef;
    let get = |name: &'static str| {
        let k = CFString::from_static_string(name);
        dict_get_i32(inner, k.as_concrete_TypeRef()).unwrap_or(0)
    };
    Some(Bounds::new(get("X"), get("Y"), get("Width"), get("Height")))
}
