// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Magnitude-based pruning.
//!
//! Neurons are the top-level elements of a weight or activation tensor.
//! A neuron's score is the mean absolute value of its leaves (a bare
//! scalar neuron scores its absolute value).

use crate::NeuralError;
use tensor_core::{canonical, Tensor};

pub const DEFAULT_WEIGHT_THRESHOLD: f64 = 0.5;
pub const DEFAULT_ACTIVATION_THRESHOLD: f64 = 0.1;

/// Which side of the layer an activation-pruning report refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PruningMode {
    Output,
    Input,
}

impl PruningMode {
    /// `0` selects output pruning, anything else input pruning.
    pub fn from_code(code: f64) -> Self {
        if code == 0.0 {
            Self::Output
        } else {
            Self::Input
        }
    }
}

/// Normalizes a user threshold: absolute value, clamped to `[0, 1]`.
pub fn clamp_threshold(threshold: f64) -> f64 {
    if threshold.is_nan() {
        0.0
    } else {
        threshold.abs().min(1.0)
    }
}

fn neuron_score(neuron: &Tensor) -> f64 {
    match neuron {
        Tensor::Scalar(x) => x.abs(),
        Tensor::Seq(_) => {
            let leaves = neuron.flatten();
            if leaves.is_empty() {
                0.0
            } else {
                leaves.iter().map(|x| x.abs()).sum::<f64>() / leaves.len() as f64
            }
        }
    }
}

fn pruning_ratio(pruned: usize, total: usize) -> String {
    format!("{:.4}", pruned as f64 / total as f64)
}

fn neurons<'a>(op: &'static str, tensor: &'a Tensor) -> Result<&'a [Tensor], NeuralError> {
    tensor.as_seq().ok_or_else(|| NeuralError::Domain {
        op,
        detail: "expected a sequence of neurons".into(),
    })
}

/// Zeroes every leaf whose magnitude is below `threshold`.
pub fn weight_pruning(weights: &Tensor, threshold: f64) -> Tensor {
    weights.map(|x| if x.abs() >= threshold { x } else { 0.0 })
}

/// Report produced by [`activation_pruning`].
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationPruningReport {
    pub pruned_indices: Vec<usize>,
    pub pruned_count: usize,
    pub total_neurons: usize,
    /// Fraction pruned, formatted with four decimals.
    pub pruning_ratio: String,
    pub mode: PruningMode,
}

/// Reports the neurons whose mean absolute activation is below `threshold`.
///
/// Nothing is modified; the caller decides what to do with the indices.
pub fn activation_pruning(
    activations: &Tensor,
    threshold: f64,
    mode: PruningMode,
) -> Result<ActivationPruningReport, NeuralError> {
    let neurons = neurons("activation_pruning", activations)?;
    let pruned_indices: Vec<usize> = neurons
        .iter()
        .enumerate()
        .filter(|(_, n)| neuron_score(n) < threshold)
        .map(|(i, _)| i)
        .collect();
    Ok(ActivationPruningReport {
        pruned_count: pruned_indices.len(),
        total_neurons: neurons.len(),
        pruning_ratio: pruning_ratio(pruned_indices.len(), neurons.len()),
        pruned_indices,
        mode,
    })
}

/// Importance of a single neuron in [`structured_pruning`].
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NeuronScore {
    pub index: usize,
    /// Composite score: half weight score, half activation score.
    #[serde(serialize_with = "canonical::serialize_number")]
    pub score: f64,
    #[serde(serialize_with = "canonical::serialize_number")]
    pub weight_score: f64,
    #[serde(serialize_with = "canonical::serialize_number")]
    pub activation_score: f64,
}

/// Result of [`structured_pruning`].
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredPruningReport {
    pub pruned_weights: Tensor,
    pub pruned_neurons: Vec<NeuronScore>,
    pub pruned_count: usize,
    pub total_neurons: usize,
    pub pruning_ratio: String,
    #[serde(serialize_with = "canonical::serialize_number")]
    pub weight_threshold: f64,
    #[serde(serialize_with = "canonical::serialize_number")]
    pub activation_threshold: f64,
}

/// Zeroes whole neurons whose weight score falls below `weight_threshold`
/// or whose activation score falls below `activation_threshold`.
///
/// # Errors
/// Returns [`NeuralError::Domain`] if either tensor is a bare scalar and
/// [`NeuralError::LengthMismatch`] if they hold different neuron counts.
pub fn structured_pruning(
    weights: &Tensor,
    activations: &Tensor,
    weight_threshold: f64,
    activation_threshold: f64,
) -> Result<StructuredPruningReport, NeuralError> {
    let op = "structured_pruning";
    let w = neurons(op, weights)?;
    let a = neurons(op, activations)?;
    if w.len() != a.len() {
        return Err(NeuralError::LengthMismatch {
            op,
            lhs: w.len(),
            rhs: a.len(),
        });
    }

    let mut pruned_neurons = Vec::new();
    let mut pruned = Vec::with_capacity(w.len());
    for (index, (wn, an)) in w.iter().zip(a).enumerate() {
        let weight_score = neuron_score(wn);
        let activation_score = neuron_score(an);
        if weight_score < weight_threshold || activation_score < activation_threshold {
            pruned_neurons.push(NeuronScore {
                index,
                score: 0.5 * weight_score + 0.5 * activation_score,
                weight_score,
                activation_score,
            });
            pruned.push(wn.map(|_| 0.0));
        } else {
            pruned.push(wn.clone());
        }
    }

    tracing::debug!(
        pruned = pruned_neurons.len(),
        total = w.len(),
        "structured pruning"
    );

    Ok(StructuredPruningReport {
        pruned_weights: Tensor::Seq(pruned),
        pruned_count: pruned_neurons.len(),
        total_neurons: w.len(),
        pruning_ratio: pruning_ratio(pruned_neurons.len(), w.len()),
        pruned_neurons,
        weight_threshold,
        activation_threshold,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_pruning() {
        let w = Tensor::from(vec![vec![0.1, -0.6], vec![0.5, -0.49]]);
        assert_eq!(
            weight_pruning(&w, 0.5),
            Tensor::from(vec![vec![0.0, -0.6], vec![0.5, 0.0]])
        );
    }

    #[test]
    fn test_clamp_threshold() {
        assert_eq!(clamp_threshold(-0.3), 0.3);
        assert_eq!(clamp_threshold(4.0), 1.0);
        assert_eq!(clamp_threshold(f64::NAN), 0.0);
    }

    #[test]
    fn test_activation_report() {
        let acts = Tensor::Seq(vec![
            Tensor::vector(&[0.0, 0.1]),
            Tensor::vector(&[1.0, -1.0]),
            Tensor::Scalar(-0.05),
        ]);
        let r = activation_pruning(&acts, 0.1, PruningMode::Output).unwrap();
        assert_eq!(r.pruned_indices, vec![0, 2]);
        assert_eq!(r.total_neurons, 3);
        assert_eq!(r.pruning_ratio, "0.6667");
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(
            json,
            r#"{"prunedIndices":[0,2],"prunedCount":2,"totalNeurons":3,"pruningRatio":"0.6667","mode":"output"}"#
        );
    }

    #[test]
    fn test_activation_report_rejects_scalar() {
        assert!(activation_pruning(&Tensor::Scalar(1.0), 0.1, PruningMode::Input).is_err());
    }

    #[test]
    fn test_structured_pruning_zeroes_neurons() {
        let w = Tensor::from(vec![vec![0.9, 0.8], vec![0.1, 0.2], vec![0.7, 0.9]]);
        let a = Tensor::from(vec![vec![0.5], vec![0.5], vec![0.0]]);
        let r = structured_pruning(&w, &a, 0.5, 0.1).unwrap();
        assert_eq!(
            r.pruned_weights,
            Tensor::from(vec![vec![0.9, 0.8], vec![0.0, 0.0], vec![0.0, 0.0]])
        );
        let indices: Vec<usize> = r.pruned_neurons.iter().map(|n| n.index).collect();
        assert_eq!(indices, vec![1, 2]);
        assert!((r.pruned_neurons[0].score - 0.325).abs() < 1e-12);
        assert_eq!(r.pruning_ratio, "0.6667");
    }

    #[test]
    fn test_structured_pruning_count_mismatch() {
        let w = Tensor::from(vec![vec![1.0], vec![1.0]]);
        let a = Tensor::from(vec![vec![1.0]]);
        assert!(matches!(
            structured_pruning(&w, &a, 0.5, 0.1),
            Err(NeuralError::LengthMismatch { .. })
        ));
    }
}
