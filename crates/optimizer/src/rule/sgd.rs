// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Plain stochastic gradient descent: `w - lr·g`, with no state kept
//! between calls.

use crate::rule::UpdateRule;
use crate::OptimizerState;

#[derive(Debug, Clone, Copy, Default)]
pub struct Sgd;

impl Sgd {
    pub fn new() -> Self {
        Self
    }
}

impl UpdateRule for Sgd {
    fn name(&self) -> &str {
        "sgd"
    }

    fn step(
        &self,
        weights: &[f64],
        grads: &[f64],
        lr: f64,
        _prev: &OptimizerState,
    ) -> (Vec<f64>, OptimizerState) {
        let updated = weights.iter().zip(grads).map(|(w, g)| w - lr * g).collect();
        (updated, OptimizerState::None)
    }
}
