// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Shape-checked weight and bias updates.

use serde::Serialize;
use tensor_core::{Shape, Tensor};

use crate::config::{OptimizerConfig, OptimizerKind};
use crate::error::OptimError;
use crate::rule::adam::Adam;
use crate::rule::sgd::Sgd;
use crate::rule::UpdateRule;
use crate::OptimizerState;

/// Learning rate used when the caller supplies zero or nothing usable.
pub const DEFAULT_LEARNING_RATE: f64 = 0.01;

/// Updated weights paired with the state for the next call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightUpdate {
    pub weights: Tensor,
    pub state: OptimizerState,
}

/// Applies one optimizer step to `weights`.
///
/// Weights and gradients must be regular tensors with the same dimension
/// vector. The result keeps the weights' original shape.
pub fn update_weights(
    weights: &Tensor,
    grads: &Tensor,
    kind: OptimizerKind,
    lr: f64,
    config: &OptimizerConfig,
) -> Result<WeightUpdate, OptimError> {
    let (w, g, shape) = paired(weights, grads)?;

    let rule: Box<dyn UpdateRule> = match kind {
        OptimizerKind::Sgd => Box::new(Sgd::new()),
        OptimizerKind::Adam => Box::new(Adam::new(config.beta1, config.beta2)),
    };
    let (updated, state) = rule.step(&w, &g, lr, &config.state);
    tracing::trace!(
        rule = rule.name(),
        params = updated.len(),
        state = state.kind(),
        "optimizer step"
    );

    Ok(WeightUpdate {
        weights: Tensor::from_flat(&updated, shape.dims()),
        state,
    })
}

/// Plain gradient step on a bias tensor: `b - lr·g`.
pub fn update_bias(bias: &Tensor, grad: &Tensor, lr: f64) -> Result<Tensor, OptimError> {
    let (b, g, shape) = paired(bias, grad)?;
    let (updated, _) = Sgd::new().step(&b, &g, lr, &OptimizerState::None);
    Ok(Tensor::from_flat(&updated, shape.dims()))
}

fn paired(params: &Tensor, grads: &Tensor) -> Result<(Vec<f64>, Vec<f64>, Shape), OptimError> {
    if !params.is_regular() {
        return Err(OptimError::Ragged { which: "parameter" });
    }
    if !grads.is_regular() {
        return Err(OptimError::Ragged { which: "gradient" });
    }
    let (ps, gs) = (params.shape(), grads.shape());
    if ps != gs {
        return Err(OptimError::DimensionMismatch {
            params: ps,
            grads: gs,
        });
    }
    Ok((params.flatten(), grads.flatten(), ps))
}
