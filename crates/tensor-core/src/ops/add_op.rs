// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Elementwise addition.

use super::matmul_op::checked_flatten;
use crate::{Shape, Tensor, TensorError};

/// Adds two tensors elementwise, using caller-supplied dimension vectors.
///
/// The dimension vectors must be identical and both operands must hold
/// exactly as many leaves as those dimensions describe. The result takes
/// the shared shape.
///
/// # Errors
/// Returns [`TensorError::ShapeMismatch`] for differing dimension vectors
/// and [`TensorError::ElementCountMismatch`] when the data does not fill
/// the declared shape.
pub fn add_shaped(
    lhs: &Tensor,
    lhs_shape: &Shape,
    rhs: &Tensor,
    rhs_shape: &Shape,
) -> Result<Tensor, TensorError> {
    if lhs_shape != rhs_shape {
        return Err(TensorError::ShapeMismatch {
            op: "add",
            lhs: lhs_shape.clone(),
            rhs: rhs_shape.clone(),
        });
    }
    let a = checked_flatten("add", lhs, lhs_shape)?;
    let b = checked_flatten("add", rhs, rhs_shape)?;
    let sum: Vec<f64> = a.iter().zip(&b).map(|(x, y)| x + y).collect();
    Ok(Tensor::from_flat(&sum, lhs_shape.dims()))
}

/// [`add_shaped`] with shapes inferred from the operands.
pub fn add(lhs: &Tensor, rhs: &Tensor) -> Result<Tensor, TensorError> {
    if !lhs.is_regular() || !rhs.is_regular() {
        return Err(TensorError::InvalidArgument {
            op: "add",
            detail: "ragged operand".into(),
        });
    }
    add_shaped(lhs, &lhs.shape(), rhs, &rhs.shape())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_matrices() {
        let a = Tensor::from(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = Tensor::from(vec![vec![10.0, 20.0], vec![30.0, 40.0]]);
        assert_eq!(
            add(&a, &b).unwrap(),
            Tensor::from(vec![vec![11.0, 22.0], vec![33.0, 44.0]])
        );
    }

    #[test]
    fn test_add_length_mismatch() {
        let a = Tensor::vector(&[1.0, 2.0]);
        let b = Tensor::vector(&[1.0, 2.0, 3.0]);
        assert!(matches!(add(&a, &b), Err(TensorError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_add_scalars() {
        let r = add(&Tensor::Scalar(1.5), &Tensor::Scalar(2.0)).unwrap();
        assert_eq!(r, Tensor::Scalar(3.5));
    }

    #[test]
    fn test_add_ragged_rejected() {
        let a = Tensor::from(vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(add(&a, &a).is_err());
    }

    #[test]
    fn test_add_shaped_reshapes_flat_data() {
        let a = Tensor::vector(&[1.0, 2.0, 3.0, 4.0]);
        let shape = Shape::matrix(2, 2);
        let r = add_shaped(&a, &shape, &a, &shape).unwrap();
        assert_eq!(r, Tensor::from(vec![vec![2.0, 4.0], vec![6.0, 8.0]]));
    }
}
