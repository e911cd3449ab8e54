//! Core arithmetic.
//!
//! This module holds the actual logic. The C ABI in `ffi/` and the Python
//! module in `python.rs` are thin wrappers around it.

pub mod batch;
pub mod scalar;

pub use batch::{placeholder_batch, BatchAdder, PARALLEL_THRESHOLD};
pub use scalar::placeholder;
