// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Two-axis transpose.

use super::matmul_op::checked_flatten;
use crate::{Tensor, TensorError};

/// Swaps axes `axis1` and `axis2` of a regular tensor.
///
/// Element `[.., i, .., j, ..]` of the input lands at `[.., j, .., i, ..]`
/// of the output. Identical axes, or an axis beyond the tensor's rank,
/// leave the input unchanged.
///
/// # Errors
/// - [`TensorError::ExpectedSequence`] for a bare scalar.
/// - [`TensorError::InvalidArgument`] for a ragged tensor, even when its
///   leaf count happens to fill the first-path shape.
pub fn transpose(tensor: &Tensor, axis1: usize, axis2: usize) -> Result<Tensor, TensorError> {
    if tensor.is_scalar() {
        return Err(TensorError::ExpectedSequence { op: "transpose" });
    }
    if !tensor.is_regular() {
        return Err(TensorError::InvalidArgument {
            op: "transpose",
            detail: "ragged operand".into(),
        });
    }
    let shape = tensor.shape();
    if axis1 == axis2 {
        return Ok(tensor.clone());
    }
    let Some(out_shape) = shape.swap_axes(axis1, axis2) else {
        tracing::debug!(%shape, axis1, axis2, "transpose axis out of range; returning input");
        return Ok(tensor.clone());
    };
    let flat = checked_flatten("transpose", tensor, &shape)?;

    let in_strides = shape.strides();
    let out_strides = out_shape.strides();
    let mut out = vec![0.0; flat.len()];
    for (dst, slot) in out.iter_mut().enumerate() {
        let mut rem = dst;
        let mut src = 0;
        for (axis, &stride) in out_strides.iter().enumerate() {
            let idx = rem / stride;
            rem %= stride;
            let in_axis = if axis == axis1 {
                axis2
            } else if axis == axis2 {
                axis1
            } else {
                axis
            };
            src += idx * in_strides[in_axis];
        }
        *slot = flat[src];
    }
    Ok(Tensor::from_flat(&out, out_shape.dims()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transpose_matrix() {
        let t = Tensor::from(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let r = transpose(&t, 0, 1).unwrap();
        assert_eq!(
            r,
            Tensor::from(vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]])
        );
    }

    #[test]
    fn test_transpose_is_involution() {
        let t = Tensor::Seq(vec![
            Tensor::from(vec![vec![1.0, 2.0, 3.0, 4.0], vec![5.0, 6.0, 7.0, 8.0]]),
            Tensor::from(vec![vec![9.0, 10.0, 11.0, 12.0], vec![13.0, 14.0, 15.0, 16.0]]),
        ]);
        let once = transpose(&t, 0, 2).unwrap();
        assert_eq!(once.shape().dims(), &[4, 2, 2]);
        assert_eq!(transpose(&once, 0, 2).unwrap(), t);
    }

    #[test]
    fn test_transpose_3d_element_mapping() {
        // input [2, 3, 4], element [a][b][c] = 100a + 10b + c
        let t = Tensor::Seq(
            (0..2)
                .map(|a| {
                    Tensor::from(
                        (0..3)
                            .map(|b| (0..4).map(|c| (100 * a + 10 * b + c) as f64).collect())
                            .collect::<Vec<Vec<f64>>>(),
                    )
                })
                .collect(),
        );
        let r = transpose(&t, 1, 2).unwrap();
        assert_eq!(r.shape().dims(), &[2, 4, 3]);
        // r[1][3][2] == t[1][2][3] == 123
        let leaf = &r.as_seq().unwrap()[1].as_seq().unwrap()[3].as_seq().unwrap()[2];
        assert_eq!(leaf.as_scalar(), Some(123.0));
    }

    #[test]
    fn test_transpose_noop_cases() {
        let t = Tensor::from(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(transpose(&t, 1, 1).unwrap(), t);
        assert_eq!(transpose(&t, 0, 5).unwrap(), t);
    }

    #[test]
    fn test_transpose_ragged_rejected() {
        // four leaves fill the first-path shape [2, 2], but the last row nests deeper
        let t = Tensor::Seq(vec![
            Tensor::vector(&[1.0, 2.0]),
            Tensor::Seq(vec![Tensor::Scalar(3.0), Tensor::vector(&[4.0])]),
        ]);
        assert!(matches!(
            transpose(&t, 0, 1),
            Err(TensorError::InvalidArgument { op: "transpose", .. })
        ));
        assert!(transpose(&t, 1, 1).is_err());
    }

    #[test]
    fn test_transpose_scalar_rejected() {
        assert!(transpose(&Tensor::Scalar(1.0), 0, 1).is_err());
    }
}
