// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Multi-threaded fan-out for the product kernels.
//!
//! Output positions are split into contiguous ranges, at most one per
//! worker. The ranges are filled in place on the rayon pool with
//! `par_chunks_mut`, and the finished buffer comes back to the caller over
//! a channel. If the fan-out panics or misses its deadline, the product is
//! recomputed on the calling thread.
//!
//! Every output element is computed by the same kernel with the same
//! summation order whether it runs here or sequentially, so the parallel
//! and sequential results are bit-identical.

use super::matmul_op::{vec_mat_columns, vec_mat_dims, Contraction};
use crate::{Shape, Tensor, TensorError};
use crossbeam_channel::RecvTimeoutError;
use rayon::prelude::*;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

/// Hard cap on worker threads per fan-out.
pub const MAX_WORKERS: usize = 8;

/// Tuning for the parallel product path.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Whether fan-out is allowed at all.
    pub enabled: bool,
    /// Products with fewer output values than this run sequentially.
    pub min_outputs: usize,
    /// Worker count. `None` means one per available core.
    pub max_threads: Option<usize>,
    /// Deadline for the whole fan-out, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_outputs: 100,
            max_threads: None,
            timeout_ms: 1000,
        }
    }
}

impl ParallelConfig {
    /// A configuration that never fans out.
    pub fn sequential() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Resolves the worker count, capped at [`MAX_WORKERS`].
    pub fn resolve_threads(&self) -> usize {
        self.max_threads
            .unwrap_or_else(rayon::current_num_threads)
            .clamp(1, MAX_WORKERS)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    fn should_fan_out(&self, outputs: usize) -> bool {
        self.enabled && outputs >= self.min_outputs && self.resolve_threads() > 1
    }
}

/// [`vec_mat`](super::vec_mat) with the output columns spread across
/// the rayon pool.
pub fn vec_mat_parallel(
    vector: &[f64],
    matrix: &[f64],
    config: &ParallelConfig,
) -> Result<Vec<f64>, TensorError> {
    let (n, m) = vec_mat_dims(vector, matrix)?;
    if !config.should_fan_out(m) {
        return Ok(vec_mat_columns(vector, matrix, n, m, 0..m));
    }

    let vector: Arc<[f64]> = Arc::from(vector);
    let matrix: Arc<[f64]> = Arc::from(matrix);
    let (v, w) = (Arc::clone(&vector), Arc::clone(&matrix));
    let fanned = fan_out(m, 1, config, move |cols| vec_mat_columns(&v, &w, n, m, cols));
    Ok(fanned.unwrap_or_else(|| vec_mat_columns(&vector, &matrix, n, m, 0..m)))
}

/// [`matmul_shaped`](super::matmul_shaped) with output rows spread across
/// the rayon pool.
pub fn matmul_parallel(
    lhs: &Tensor,
    lhs_shape: &Shape,
    rhs: &Tensor,
    rhs_shape: &Shape,
    config: &ParallelConfig,
) -> Result<Tensor, TensorError> {
    let plan = Arc::new(Contraction::plan(lhs, lhs_shape, rhs, rhs_shape)?);
    let (rows, cols) = (plan.rows, plan.cols);
    if !config.should_fan_out(rows * cols) {
        return Ok(plan.finish(plan.compute_rows(0..rows)));
    }

    let worker_plan = Arc::clone(&plan);
    let fanned = fan_out(rows, cols, config, move |range| worker_plan.compute_rows(range));
    let flat = fanned.unwrap_or_else(|| plan.compute_rows(0..rows));
    Ok(plan.finish(flat))
}

/// Runs `kernel` over `units` output units split into contiguous ranges.
///
/// `kernel(range)` must return exactly `range.len() * unit_len` values.
/// Returns `None` if the fan-out could not complete; the caller then falls
/// back to computing sequentially.
fn fan_out<K>(units: usize, unit_len: usize, config: &ParallelConfig, kernel: K) -> Option<Vec<f64>>
where
    K: Fn(Range<usize>) -> Vec<f64> + Send + Sync + 'static,
{
    let len = units * unit_len;
    if len == 0 {
        return Some(Vec::new());
    }
    let workers = config.resolve_threads().min(units).max(1);
    let chunk = units.div_ceil(workers).max(1);
    let (tx, rx) = crossbeam_channel::bounded::<Vec<f64>>(1);

    tracing::debug!(units, workers, chunk, "fan-out started");
    rayon::spawn(move || {
        let filled = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut out = vec![0.0; len];
            out.par_chunks_mut(chunk * unit_len)
                .enumerate()
                .for_each(|(i, slot)| {
                    let start = i * chunk;
                    let end = (start + chunk).min(units);
                    for (dst, value) in slot.iter_mut().zip(kernel(start..end)) {
                        *dst = value;
                    }
                });
            out
        }));
        // A dropped sender tells the caller the fan-out failed.
        if let Ok(out) = filled {
            let _ = tx.send(out);
        }
    });

    match rx.recv_timeout(config.timeout()) {
        Ok(out) => Some(out),
        Err(RecvTimeoutError::Timeout) => {
            tracing::warn!(timeout_ms = config.timeout_ms, "fan-out timed out; running sequentially");
            None
        }
        Err(RecvTimeoutError::Disconnected) => {
            tracing::warn!("fan-out panicked; running sequentially");
            None
        }
    }
}
