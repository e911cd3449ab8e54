//! Scalar addition.

use crate::error::{Error, Result};

/// Add two signed 64-bit integers.
///
/// The sum is checked: an out-of-range result is reported as
/// [`Error::Overflow`] rather than wrapping.
#[inline]
pub fn placeholder(x: i64, y: i64) -> Result<i64> {
    x.checked_add(y).ok_or_else(|| {
        tracing::debug!(x, y, "placeholder overflow");
        Error::Overflow { x, y }
    })
}
