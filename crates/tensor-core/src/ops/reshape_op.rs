// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Reshape and construction.

use crate::{Tensor, TensorError};

/// Reshapes `tensor` into a matrix with the given `[rows, cols]`.
///
/// Leaves are taken in depth-first order. Only two-dimensional targets are
/// supported.
///
/// # Errors
/// - [`TensorError::InvalidArgument`] if `target` is not exactly two
///   positive dimensions.
/// - [`TensorError::ElementCountMismatch`] if the leaf count differs from
///   `rows × cols`.
pub fn reshape(tensor: &Tensor, target: &[usize]) -> Result<Tensor, TensorError> {
    let [rows, cols] = target else {
        return Err(TensorError::InvalidArgument {
            op: "reshape",
            detail: format!("target must have 2 dimensions, got {}", target.len()),
        });
    };
    if *rows == 0 || *cols == 0 {
        return Err(TensorError::InvalidArgument {
            op: "reshape",
            detail: "target dimensions must be positive".into(),
        });
    }
    let flat = tensor.flatten();
    let expected = rows * cols;
    if flat.len() != expected {
        return Err(TensorError::ElementCountMismatch {
            op: "reshape",
            expected,
            actual: flat.len(),
        });
    }
    Ok(Tensor::from_flat(&flat, target))
}

/// Builds a tensor of the given dimensions with every leaf set to `fill`.
///
/// # Errors
/// Returns [`TensorError::InvalidArgument`] if `dims` is empty, contains a
/// zero, or describes more elements than fit in memory addressing.
pub fn create(dims: &[usize], fill: f64) -> Result<Tensor, TensorError> {
    if dims.is_empty() || dims.contains(&0) {
        return Err(TensorError::InvalidArgument {
            op: "create",
            detail: format!("dimensions must be non-empty and positive, got {dims:?}"),
        });
    }
    let count = dims
        .iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or_else(|| TensorError::InvalidArgument {
            op: "create",
            detail: format!("element count overflows for {dims:?}"),
        })?;
    Ok(Tensor::from_flat(&vec![fill; count], dims))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reshape_vector_to_matrix() {
        let t = Tensor::vector(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let r = reshape(&t, &[3, 2]).unwrap();
        assert_eq!(
            r,
            Tensor::from(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]])
        );
    }

    #[test]
    fn test_reshape_count_mismatch() {
        let t = Tensor::vector(&[1.0, 2.0, 3.0]);
        assert!(matches!(
            reshape(&t, &[2, 2]),
            Err(TensorError::ElementCountMismatch { expected: 4, actual: 3, .. })
        ));
    }

    #[test]
    fn test_reshape_rejects_bad_targets() {
        let t = Tensor::vector(&[1.0, 2.0]);
        assert!(reshape(&t, &[2]).is_err());
        assert!(reshape(&t, &[0, 2]).is_err());
        assert!(reshape(&t, &[1, 1, 2]).is_err());
    }

    #[test]
    fn test_create_filled() {
        let t = create(&[2, 3], 1.5).unwrap();
        assert_eq!(t.shape().dims(), &[2, 3]);
        assert!(t.flatten().iter().all(|&x| x == 1.5));
    }

    #[test]
    fn test_create_rejects_zero_dim() {
        assert!(create(&[2, 0], 1.0).is_err());
        assert!(create(&[], 1.0).is_err());
    }
}
