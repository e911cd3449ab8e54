//! C ABI for hosts that load the library directly instead of through Python.
//!
//! All functions are marked with `#[no_mangle]` and use `extern "C"`.
//! They are thin wrappers over `arith` that handle null checks, pointer safety
//! and conversion of [`Error`](crate::error::Error) into status codes.

pub mod batch;
pub mod lifecycle;
pub mod simple;

pub use batch::{zn_adder_add, zn_placeholder_batch};
pub use lifecycle::{zn_adder_create, zn_adder_destroy, zn_adder_threads};
pub use simple::{zn_placeholder, zn_version};

/// Status codes returned by fallible exports.
pub mod status {
    pub const OK: i32 = 0;
    pub const NULL_POINTER: i32 = 1;
    pub const OVERFLOW: i32 = 2;
    pub const LENGTH_MISMATCH: i32 = 3;
    pub const THREAD_POOL: i32 = 4;
}
