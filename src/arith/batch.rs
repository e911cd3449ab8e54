//! Element-wise addition over slices, optionally on a dedicated thread pool.

use rayon::prelude::*;

use crate::error::{Error, Result};

/// Inputs shorter than this are added on the calling thread.
pub const PARALLEL_THRESHOLD: usize = 4096;

/// Add `xs[i] + ys[i]` for every index.
///
/// Fails on a length mismatch, or with the overflow at the lowest failing
/// index. No partial result is returned.
pub fn placeholder_batch(xs: &[i64], ys: &[i64]) -> Result<Vec<i64>> {
    check_lengths(xs, ys)?;
    collect_sums(xs.iter().zip(ys).map(|(&x, &y)| x.checked_add(y)).collect(), xs, ys)
}

/// Batch adder owning its own rayon pool, so host threads are never
/// borrowed from the global pool.
pub struct BatchAdder {
    pool: rayon::ThreadPool,
    threads: usize,
}

impl BatchAdder {
    /// Build an adder with `threads` workers. 0 is treated as 1.
    pub fn new(threads: usize) -> Result<Self> {
        let threads = threads.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("zato-native-{i}"))
            .build()
            .map_err(|e| Error::ThreadPool(e.to_string()))?;

        tracing::debug!(threads, "batch adder created");
        Ok(BatchAdder { pool, threads })
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Same contract as [`placeholder_batch`].
    pub fn add(&self, xs: &[i64], ys: &[i64]) -> Result<Vec<i64>> {
        if xs.len() < PARALLEL_THRESHOLD {
            return placeholder_batch(xs, ys);
        }
        check_lengths(xs, ys)?;

        tracing::trace!(len = xs.len(), threads = self.threads, "parallel batch");
        let sums = self.pool.install(|| {
            xs.par_iter()
                .zip(ys.par_iter())
                .map(|(&x, &y)| x.checked_add(y))
                .collect::<Vec<_>>()
        });
        collect_sums(sums, xs, ys)
    }
}

fn check_lengths(xs: &[i64], ys: &[i64]) -> Result<()> {
    if xs.len() != ys.len() {
        return Err(Error::LengthMismatch {
            left: xs.len(),
            right: ys.len(),
        });
    }
    Ok(())
}

fn collect_sums(sums: Vec<Option<i64>>, xs: &[i64], ys: &[i64]) -> Result<Vec<i64>> {
    match sums.iter().position(Option::is_none) {
        Some(i) => {
            tracing::debug!(index = i, x = xs[i], y = ys[i], "batch overflow");
            Err(Error::Overflow { x: xs[i], y: ys[i] })
        }
        None => Ok(sums.into_iter().flatten().collect()),
    }
}
