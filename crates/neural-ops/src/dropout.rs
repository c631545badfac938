// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Dropout variants over flat vectors.
//!
//! Rates are clamped to `[0, 1]`. Each element is kept independently with
//! probability `1 - rate`.

use rand::Rng;
use tensor_core::canonical;

/// SELU negative saturation value used by alpha dropout.
pub const SELU_ALPHA: f64 = -1.758_099_340_847_376_6;
/// SELU scale used by alpha dropout.
pub const SELU_SCALE: f64 = 1.050_700_987_355_480_5;

/// Output of [`dropout_with_mask`].
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MaskedDropout {
    #[serde(serialize_with = "canonical::serialize_numbers")]
    pub output: Vec<f64>,
    /// `1` where the element was kept, `0` where it was dropped.
    pub mask: Vec<u8>,
}

fn clamp_rate(rate: f64) -> f64 {
    if rate.is_nan() {
        0.0
    } else {
        rate.clamp(0.0, 1.0)
    }
}

/// Training-mode dropout: survivors are scaled by `1 / (1 - rate)`.
pub fn dropout_train<R: Rng + ?Sized>(values: &[f64], rate: f64, rng: &mut R) -> Vec<f64> {
    dropout_with_mask(values, rate, rng).output
}

/// Inference-mode dropout: the identity.
pub fn dropout_eval(values: &[f64]) -> Vec<f64> {
    values.to_vec()
}

/// Training-mode dropout that also reports which elements were kept.
pub fn dropout_with_mask<R: Rng + ?Sized>(values: &[f64], rate: f64, rng: &mut R) -> MaskedDropout {
    let keep = 1.0 - clamp_rate(rate);
    let mut output = Vec::with_capacity(values.len());
    let mut mask = Vec::with_capacity(values.len());
    for &x in values {
        if rng.gen::<f64>() < keep {
            output.push(x / keep);
            mask.push(1);
        } else {
            output.push(0.0);
            mask.push(0);
        }
    }
    MaskedDropout { output, mask }
}

/// Alpha dropout for self-normalizing networks.
///
/// Kept elements map to `a·x + b`; dropped elements map to the constant
/// `a·α' + b`, with `a` and `b` chosen from the keep probability so the
/// activations keep their mean and variance. A zero rate, or an empty
/// input, returns the input unchanged.
pub fn alpha_dropout<R: Rng + ?Sized>(values: &[f64], rate: f64, rng: &mut R) -> Vec<f64> {
    let rate = clamp_rate(rate);
    if values.is_empty() || rate == 0.0 {
        return values.to_vec();
    }
    let keep = 1.0 - rate;
    let alpha_prime = -SELU_ALPHA * SELU_SCALE;
    let a = (keep + alpha_prime * alpha_prime * keep * (1.0 - keep)).sqrt();
    let b = -a * alpha_prime * (1.0 - keep);
    values
        .iter()
        .map(|&x| {
            if rng.gen::<f64>() < keep {
                a * x + b
            } else {
                a * alpha_prime + b
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_eval_is_identity() {
        let v = vec![1.5, -2.0, 0.0, 7.25];
        assert_eq!(dropout_eval(&v), v);
    }

    #[test]
    fn test_zero_rate_keeps_everything() {
        let mut rng = StdRng::seed_from_u64(7);
        let v = vec![1.0, 2.0, 3.0];
        assert_eq!(dropout_train(&v, 0.0, &mut rng), v);
    }

    #[test]
    fn test_full_rate_drops_everything() {
        let mut rng = StdRng::seed_from_u64(7);
        let out = dropout_with_mask(&[1.0, 2.0, 3.0], 1.0, &mut rng);
        assert_eq!(out.output, vec![0.0; 3]);
        assert_eq!(out.mask, vec![0; 3]);
    }

    #[test]
    fn test_mask_consistent_with_output() {
        let mut rng = StdRng::seed_from_u64(42);
        let v: Vec<f64> = (1..=200).map(f64::from).collect();
        let out = dropout_with_mask(&v, 0.5, &mut rng);
        for ((x, y), m) in v.iter().zip(&out.output).zip(&out.mask) {
            if *m == 1 {
                assert_eq!(*y, x * 2.0);
            } else {
                assert_eq!(*y, 0.0);
            }
        }
        let kept = out.mask.iter().filter(|&&m| m == 1).count();
        assert!(kept > 50 && kept < 150, "kept {kept}");
    }

    #[test]
    fn test_rate_is_clamped() {
        let mut rng = StdRng::seed_from_u64(1);
        let v = vec![4.0, 5.0];
        assert_eq!(dropout_train(&v, -3.0, &mut rng), v);
    }

    #[test]
    fn test_alpha_dropout_zero_rate_passthrough() {
        let mut rng = StdRng::seed_from_u64(3);
        let v = vec![0.3, -0.7];
        assert_eq!(alpha_dropout(&v, 0.0, &mut rng), v);
        assert!(alpha_dropout(&[], 0.5, &mut rng).is_empty());
    }

    #[test]
    fn test_alpha_dropout_dropped_value_is_constant() {
        let mut rng = StdRng::seed_from_u64(9);
        let out = alpha_dropout(&[10.0; 64], 1.0, &mut rng);
        let first = out[0];
        assert!(out.iter().all(|&y| y == first));
    }

    #[test]
    fn test_masked_serialization() {
        let out = MaskedDropout {
            output: vec![2.0, 0.0],
            mask: vec![1, 0],
        };
        assert_eq!(
            serde_json::to_string(&out).unwrap(),
            r#"{"output":[2,0],"mask":[1,0]}"#
        );
    }
}
