// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The [`UpdateRule`] trait and its implementations.

pub mod adam;
pub mod sgd;

use crate::OptimizerState;

/// A gradient-descent update over flat parameter buffers.
///
/// Rules are pure: they read the previous state and return a new one.
/// Callers guarantee `weights.len() == grads.len()`.
pub trait UpdateRule: Send + Sync {
    /// Human-readable name of this rule.
    fn name(&self) -> &str;

    /// Computes updated weights and the state to hand back to the caller.
    fn step(
        &self,
        weights: &[f64],
        grads: &[f64],
        lr: f64,
        prev: &OptimizerState,
    ) -> (Vec<f64>, OptimizerState);
}
