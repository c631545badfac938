// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Random perturbation of tensor leaves, as used by evolutionary training.

use rand::Rng;
use tensor_core::Tensor;

pub const DEFAULT_STRENGTH: f64 = 1.0;
pub const DEFAULT_PROBABILITY: f64 = 0.1;

/// Perturbs each leaf with probability `probability` by a uniform offset
/// in `[-strength, strength)`. Structure is preserved.
pub fn random_variation<R: Rng + ?Sized>(
    tensor: &Tensor,
    strength: f64,
    probability: f64,
    rng: &mut R,
) -> Tensor {
    tensor.map(|x| {
        if rng.gen::<f64>() < probability {
            x + (rng.gen::<f64>() * 2.0 - 1.0) * strength
        } else {
            x
        }
    })
}
