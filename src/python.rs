//! Python module `zato_native`.
//!
//! Argument conversion is left to PyO3: non-integers raise `TypeError` and
//! integers outside the i64 range raise `OverflowError` before any code here
//! runs.

use std::sync::OnceLock;

use pyo3::prelude::*;

use crate::arith::{self, BatchAdder};
use crate::config::NativeConfig;
use crate::error::Result;
use crate::logging;

static CONFIG: OnceLock<NativeConfig> = OnceLock::new();
static ADDER: OnceLock<BatchAdder> = OnceLock::new();

/// Environment is read once per process; logging is installed before any
/// rejected value is reported.
fn module_config() -> &'static NativeConfig {
    CONFIG.get_or_init(|| {
        let (config, rejected) = NativeConfig::resolve_env();
        logging::init_with_rejected(&config, &rejected);
        config
    })
}

fn shared_adder() -> Result<&'static BatchAdder> {
    if let Some(adder) = ADDER.get() {
        return Ok(adder);
    }
    let adder = BatchAdder::new(module_config().threads)?;
    // A racing thread may have won; its pool is used and ours is dropped
    Ok(ADDER.get_or_init(|| adder))
}

/// Return x + y. Raises OverflowError if the sum does not fit in 64 bits.
#[pyfunction]
fn placeholder(x: i64, y: i64) -> PyResult<i64> {
    Ok(arith::placeholder(x, y)?)
}

/// Return [x + y for x, y in zip(xs, ys)]. Raises ValueError if the lengths
/// differ and OverflowError if any sum does not fit in 64 bits.
#[pyfunction]
fn placeholder_batch(py: Python<'_>, xs: Vec<i64>, ys: Vec<i64>) -> PyResult<Vec<i64>> {
    let sums = py.allow_threads(|| shared_adder().and_then(|adder| adder.add(&xs, &ys)))?;
    Ok(sums)
}

#[pymodule]
fn zato_native(m: &Bound<'_, PyModule>) -> PyResult<()> {
    module_config();

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add_function(wrap_pyfunction!(placeholder, m)?)?;
    m.add_function(wrap_pyfunction!(placeholder_batch, m)?)?;
    Ok(())
}
