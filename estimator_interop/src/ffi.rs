use std::ffi::{c_char, CStr};

/// Borrows a caller-owned buffer, or `None` for a null pointer.
///
/// # Safety
/// A non-null `data` must point to `len` readable, initialized `f32`s that
/// stay valid and unaliased by writers for `'a`.
pub(crate) unsafe fn as_slice<'a>(data: *const f32, len: usize) -> Option<&'a [f32]> {
    if data.is_null() {
        return None;
    }
    Some(unsafe { std::slice::from_raw_parts(data, len) })
}

/// # Safety
/// A non-null `data` must point to `len` writable `f32`s that nothing else
/// accesses for `'a`.
pub(crate) unsafe fn as_slice_mut<'a>(data: *mut f32, len: usize) -> Option<&'a mut [f32]> {
    if data.is_null() {
        return None;
    }
    Some(unsafe { std::slice::from_raw_parts_mut(data, len) })
}

/// # Safety
/// A non-null `s` must point to a NUL-terminated string.
pub(crate) unsafe fn as_str<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(s) }.to_str().ok()
}
