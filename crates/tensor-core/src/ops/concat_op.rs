// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Merge and split along axis 0.

use crate::Tensor;

/// Concatenates `second` onto `first` along axis 0.
///
/// Both operands must be sequences of equal rank whose dimensions agree on
/// every axis but the first. Otherwise `first` is returned unchanged.
pub fn merge(first: &Tensor, second: &Tensor) -> Tensor {
    match (first, second) {
        (Tensor::Seq(a), Tensor::Seq(b))
            if first.shape().is_concat_compatible(&second.shape()) =>
        {
            let mut items = Vec::with_capacity(a.len() + b.len());
            items.extend(a.iter().cloned());
            items.extend(b.iter().cloned());
            Tensor::Seq(items)
        }
        _ => {
            tracing::debug!(
                lhs = %first.shape(),
                rhs = %second.shape(),
                "merge operands incompatible; returning first operand"
            );
            first.clone()
        }
    }
}

/// Extracts the sub-tensor at `index` along axis 0.
///
/// An out-of-range index, or a scalar input, returns the input unchanged.
pub fn split(tensor: &Tensor, index: usize) -> Tensor {
    match tensor {
        Tensor::Seq(items) => items.get(index).cloned().unwrap_or_else(|| tensor.clone()),
        Tensor::Scalar(_) => tensor.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_matrices() {
        let a = Tensor::from(vec![vec![1.0, 2.0]]);
        let b = Tensor::from(vec![vec![3.0, 4.0], vec![5.0, 6.0]]);
        assert_eq!(
            merge(&a, &b),
            Tensor::from(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]])
        );
    }

    #[test]
    fn test_merge_incompatible_returns_first() {
        let a = Tensor::from(vec![vec![1.0, 2.0]]);
        let b = Tensor::from(vec![vec![3.0, 4.0, 5.0]]);
        assert_eq!(merge(&a, &b), a);
        assert_eq!(merge(&a, &Tensor::vector(&[1.0, 2.0])), a);
    }

    #[test]
    fn test_merge_then_split_recovers_rows() {
        let a = Tensor::vector(&[1.0, 2.0]);
        let b = Tensor::vector(&[3.0]);
        let m = merge(&a, &b);
        assert_eq!(split(&m, 2), Tensor::Scalar(3.0));
    }

    #[test]
    fn test_split_out_of_range() {
        let t = Tensor::from(vec![vec![1.0], vec![2.0]]);
        assert_eq!(split(&t, 1), Tensor::vector(&[2.0]));
        assert_eq!(split(&t, 7), t);
        assert_eq!(split(&Tensor::Scalar(3.0), 0), Tensor::Scalar(3.0));
    }
}
