//! Error type shared by the Rust, C and Python surfaces.

use thiserror::Error;

/// Errors produced by the arithmetic operations and their support code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("integer overflow adding {x} and {y}")]
    Overflow { x: i64, y: i64 },

    #[error("length mismatch: left has {left} elements, right has {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("failed to build thread pool: {0}")]
    ThreadPool(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Status code reported across the C ABI. 0 and 1 are reserved for
    /// success and null pointer.
    pub fn code(&self) -> i32 {
        match self {
            Error::Overflow { .. } => 2,
            Error::LengthMismatch { .. } => 3,
            Error::ThreadPool(_) => 4,
        }
    }
}

#[cfg(feature = "python")]
impl From<Error> for pyo3::PyErr {
    fn from(err: Error) -> Self {
        use pyo3::exceptions::{PyOverflowError, PyRuntimeError, PyValueError};

        let msg = err.to_string();
        match err {
            Error::Overflow { .. } => PyOverflowError::new_err(msg),
            Error::LengthMismatch { .. } => PyValueError::new_err(msg),
            Error::ThreadPool(_) => PyRuntimeError::new_err(msg),
        }
    }
}
