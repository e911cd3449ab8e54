//! Batch adder creation, destruction, and pool size queries.

use crate::arith::BatchAdder;

/// Creates a batch adder with `threads` workers and returns an opaque pointer.
///
/// # Returns
/// A pointer to a new BatchAdder, or null if the thread pool could not be
/// built. 0 threads is treated as 1.
///
/// # Safety
/// The returned pointer must eventually be freed with `zn_adder_destroy()`.
#[no_mangle]
pub extern "C" fn zn_adder_create(threads: u32) -> *mut BatchAdder {
    match BatchAdder::new(threads as usize) {
        Ok(adder) => Box::into_raw(Box::new(adder)),
        Err(e) => {
            tracing::warn!(error = %e, "zn_adder_create failed");
            std::ptr::null_mut()
        }
    }
}

/// Destroys a batch adder and joins its pool.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `zn_adder_create()`, or null
/// - `ptr` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn zn_adder_destroy(ptr: *mut BatchAdder) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

/// Gets the number of worker threads of an adder.
///
/// # Safety
/// - `ptr` must be a valid pointer to a BatchAdder, or null
///
/// # Returns
/// The pool size, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn zn_adder_threads(ptr: *const BatchAdder) -> u32 {
    if ptr.is_null() {
        return 0;
    }
    u32::try_from((*ptr).threads()).unwrap_or(u32::MAX)
}
