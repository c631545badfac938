// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Fixed-point quantization and decimal precision limiting.

use tensor_core::Tensor;

pub const DEFAULT_BITS: u32 = 8;
pub const MAX_BITS: u32 = 32;
pub const DEFAULT_DECIMALS: u32 = 2;
/// Beyond this many decimals `10^d` stops being exact in an `f64`.
pub const MAX_DECIMALS: u32 = 15;

/// Rounds half-way cases towards positive infinity (`-2.5 → -2`).
pub fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Quantizes every leaf to a signed `bits`-bit fixed-point grid.
///
/// With `scale = 2^(bits-1)`, each value becomes `round(x·scale) / scale`,
/// clamped to `[-2^(bits-1), 2^(bits-1) - 1]`. `bits` is clamped to
/// `[1, 32]`.
pub fn quantize(tensor: &Tensor, bits: u32) -> Tensor {
    let bits = bits.clamp(1, MAX_BITS);
    let scale = 2f64.powi(bits as i32 - 1);
    let (min, max) = (-scale, scale - 1.0);
    tensor.map(|x| (round_half_up(x * scale) / scale).clamp(min, max))
}

/// Rounds every leaf to `decimals` decimal places.
///
/// `decimals` is capped at [`MAX_DECIMALS`].
pub fn limit_precision(tensor: &Tensor, decimals: u32) -> Tensor {
    let factor = 10f64.powi(decimals.min(MAX_DECIMALS) as i32);
    tensor.map(|x| round_half_up(x * factor) / factor)
}
