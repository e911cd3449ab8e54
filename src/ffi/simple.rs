//! Scalar addition and version query.

use std::ffi::c_char;

use crate::arith;
use crate::ffi::status;

static VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");

/// Adds `x` and `y`, writing the sum to `out`.
///
/// # Safety
/// - `out` must be a valid, writable pointer to an `i64`, or null
///
/// # Returns
/// 0 on success, 1 if `out` is null, 2 on overflow. `out` is untouched on
/// failure.
#[no_mangle]
pub unsafe extern "C" fn zn_placeholder(x: i64, y: i64, out: *mut i64) -> i32 {
    if out.is_null() {
        return status::NULL_POINTER;
    }

    match arith::placeholder(x, y) {
        Ok(sum) => {
            *out = sum;
            status::OK
        }
        Err(e) => e.code(),
    }
}

/// Returns the library version as a static NUL-terminated string.
/// The pointer must not be freed.
#[no_mangle]
pub extern "C" fn zn_version() -> *const c_char {
    VERSION.as_ptr() as *const c_char
}
