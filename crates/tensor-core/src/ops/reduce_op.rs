// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Innermost-axis reductions.

use crate::Tensor;

/// Sums each innermost group of a gradient tensor.
///
/// A sequence whose elements are all sequences is reduced element by
/// element; any other sequence collapses to the sum of its leaves. A bare
/// scalar passes through unchanged. For a batch `[[g, ...], ...]` this
/// yields one summed value per row.
pub fn bias_gradient(tensor: &Tensor) -> Tensor {
    match tensor {
        Tensor::Scalar(x) => Tensor::Scalar(*x),
        Tensor::Seq(items) if items.iter().all(|t| !t.is_scalar()) => {
            Tensor::Seq(items.iter().map(bias_gradient).collect())
        }
        Tensor::Seq(_) => Tensor::Scalar(tensor.flatten().iter().sum()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_sums_to_scalar() {
        assert_eq!(
            bias_gradient(&Tensor::vector(&[1.0, 2.0, 3.0])),
            Tensor::Scalar(6.0)
        );
    }

    #[test]
    fn test_matrix_sums_rows() {
        let g = Tensor::from(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(bias_gradient(&g), Tensor::vector(&[3.0, 7.0]));
    }

    #[test]
    fn test_scalar_passthrough() {
        assert_eq!(bias_gradient(&Tensor::Scalar(2.5)), Tensor::Scalar(2.5));
    }

    #[test]
    fn test_mixed_level_sums_everything() {
        let g = Tensor::Seq(vec![Tensor::Scalar(1.0), Tensor::vector(&[2.0, 3.0])]);
        assert_eq!(bias_gradient(&g), Tensor::Scalar(6.0));
    }
}
