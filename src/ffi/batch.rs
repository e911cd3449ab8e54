//! Element-wise addition over caller-owned buffers.

use std::slice;

use crate::arith::{self, BatchAdder};
use crate::error::Result;
use crate::ffi::status;

/// Adds `xs[i] + ys[i]` for `i` in `0..len`, writing into `out`.
///
/// # Safety
/// - `xs`, `ys` must point to `len` readable `i64`s
/// - `out` must point to `len` writable `i64`s and must not alias `xs`/`ys`
///
/// # Returns
/// 0 on success, 1 on a null pointer, 2 on overflow. `out` is only written on
/// success. `len == 0` succeeds without reading any pointer.
#[no_mangle]
pub unsafe extern "C" fn zn_placeholder_batch(
    xs: *const i64,
    ys: *const i64,
    len: usize,
    out: *mut i64,
) -> i32 {
    run_batch(xs, ys, len, out, arith::placeholder_batch)
}

/// Same as `zn_placeholder_batch`, running on the adder's thread pool.
///
/// # Safety
/// - `adder` must be a valid pointer returned by `zn_adder_create()`
/// - buffer requirements are those of `zn_placeholder_batch`
#[no_mangle]
pub unsafe extern "C" fn zn_adder_add(
    adder: *const BatchAdder,
    xs: *const i64,
    ys: *const i64,
    len: usize,
    out: *mut i64,
) -> i32 {
    if adder.is_null() {
        return status::NULL_POINTER;
    }

    let adder = &*adder;
    run_batch(xs, ys, len, out, |xs, ys| adder.add(xs, ys))
}

unsafe fn run_batch<F>(xs: *const i64, ys: *const i64, len: usize, out: *mut i64, add: F) -> i32
where
    F: FnOnce(&[i64], &[i64]) -> Result<Vec<i64>>,
{
    if len == 0 {
        return status::OK;
    }
    if xs.is_null() || ys.is_null() || out.is_null() {
        return status::NULL_POINTER;
    }

    let xs = slice::from_raw_parts(xs, len);
    let ys = slice::from_raw_parts(ys, len);

    match add(xs, ys) {
        Ok(sums) => {
            slice::from_raw_parts_mut(out, len).copy_from_slice(&sums);
            status::OK
        }
        Err(e) => e.code(),
    }
}
