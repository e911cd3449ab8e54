//! Zato Native - native extension library for the Zato Python stack
//!
//! The library is built as a Python extension module (feature `python`) and
//! also exports a plain C ABI for hosts that load it directly.

pub mod arith;
pub mod config;
pub mod error;
pub mod ffi;
pub mod logging;
#[cfg(feature = "python")]
mod python;

pub use arith::{placeholder, placeholder_batch, BatchAdder};
pub use config::NativeConfig;
pub use error::{Error, Result};
