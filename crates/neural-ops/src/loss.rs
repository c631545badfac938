// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Losses and their gradients.
//!
//! Losses descend paired prediction/target tensors together. At each level
//! a pair of scalars yields the pointwise loss; a pair of equal-length
//! sequences yields the mean of their children when every child reduced to
//! a number, and keeps the structure otherwise. A length mismatch, or a
//! scalar paired with a sequence, contributes zero. Whatever structure
//! survives to the top is averaged over its leaves.
//!
//! Gradients instead require identical dimension vectors, work on the
//! flattened pair, and come back in the prediction's shape.

use crate::NeuralError;
use tensor_core::Tensor;

/// Probability clamp for binary cross-entropy.
pub const BCE_EPSILON: f64 = 1e-15;

/// Default Huber transition point.
pub const DEFAULT_HUBER_DELTA: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Loss {
    /// Mean squared error.
    Mse,
    /// Binary cross-entropy over probabilities.
    BinaryCrossEntropy,
    /// Quadratic inside `|d| ≤ delta`, linear outside.
    Huber { delta: f64 },
}

impl Loss {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mse => "mse",
            Self::BinaryCrossEntropy => "bce",
            Self::Huber { .. } => "huber",
        }
    }

    /// Loss of a single prediction against its target.
    pub fn pointwise(&self, pred: f64, actual: f64) -> f64 {
        match *self {
            Self::Mse => {
                let d = pred - actual;
                d * d
            }
            Self::BinaryCrossEntropy => {
                let p = pred.clamp(BCE_EPSILON, 1.0 - BCE_EPSILON);
                -(actual * p.ln() + (1.0 - actual) * (1.0 - p).ln())
            }
            Self::Huber { delta } => {
                let d = (pred - actual).abs();
                if d <= delta {
                    0.5 * d * d
                } else {
                    delta * (d - 0.5 * delta)
                }
            }
        }
    }

    /// Derivative of the loss for one element of an `n`-element batch.
    ///
    /// Cross-entropy uses the softmax-fused form `pred - actual`.
    pub fn derivative(&self, pred: f64, actual: f64, n: usize) -> f64 {
        let d = pred - actual;
        match *self {
            Self::Mse => 2.0 * d / n as f64,
            Self::BinaryCrossEntropy => d,
            Self::Huber { delta } => {
                if d.abs() <= delta {
                    d
                } else {
                    delta * d.signum()
                }
            }
        }
    }
}

/// Computes the scalar loss between `pred` and `actual`.
///
/// Never fails: structural mismatches contribute zero, and an empty input
/// has zero loss.
pub fn loss(kind: Loss, pred: &Tensor, actual: &Tensor) -> f64 {
    match reduce(kind, pred, actual) {
        Tensor::Scalar(x) => x,
        structured => mean(&structured.flatten()),
    }
}

fn reduce(kind: Loss, pred: &Tensor, actual: &Tensor) -> Tensor {
    match (pred, actual) {
        (Tensor::Scalar(p), Tensor::Scalar(a)) => Tensor::Scalar(kind.pointwise(*p, *a)),
        (Tensor::Seq(ps), Tensor::Seq(actuals)) => {
            if ps.len() != actuals.len() {
                return Tensor::Scalar(0.0);
            }
            let children: Vec<Tensor> = ps
                .iter()
                .zip(actuals)
                .map(|(p, a)| reduce(kind, p, a))
                .collect();
            let numeric: Option<Vec<f64>> = children.iter().map(Tensor::as_scalar).collect();
            match numeric {
                Some(values) => Tensor::Scalar(mean(&values)),
                None => Tensor::Seq(children),
            }
        }
        _ => Tensor::Scalar(0.0),
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Gradient of `kind` with respect to `pred`, shaped like `pred`.
///
/// # Errors
/// - [`NeuralError::Domain`] if either operand is a bare scalar or ragged.
/// - [`NeuralError::DimensionMismatch`] if the dimension vectors differ.
pub fn gradient(kind: Loss, pred: &Tensor, actual: &Tensor) -> Result<Tensor, NeuralError> {
    let op = "loss_gradient";
    if pred.is_scalar() || actual.is_scalar() {
        return Err(NeuralError::Domain {
            op,
            detail: "operands must be sequences".into(),
        });
    }
    if !pred.is_regular() || !actual.is_regular() {
        return Err(NeuralError::Domain {
            op,
            detail: "ragged operand".into(),
        });
    }
    let (pred_shape, actual_shape) = (pred.shape(), actual.shape());
    if pred_shape != actual_shape {
        return Err(NeuralError::DimensionMismatch {
            op,
            lhs: pred_shape,
            rhs: actual_shape,
        });
    }
    let p = pred.flatten();
    let a = actual.flatten();
    let n = p.len();
    let grads: Vec<f64> = p
        .iter()
        .zip(&a)
        .map(|(&pi, &ai)| kind.derivative(pi, ai, n))
        .collect();
    Ok(Tensor::from_flat(&grads, pred_shape.dims()))
}
