// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Products: vector × matrix, the dense forward pass, and general
//! contraction of a `[..., K]` tensor with a `[K, N]` matrix.

use crate::{Shape, Tensor, TensorError};
use std::ops::Range;

/// Multiplies a length-`n` vector with a flat `n × m` matrix.
///
/// `m` is inferred as `matrix.len() / n`. Output element `j` is
/// `Σ_i vector[i] · matrix[i·m + j]`.
///
/// # Errors
/// Returns [`TensorError::InvalidArgument`] if the vector is empty or the
/// matrix length is not a multiple of the vector length.
///
/// # Examples
/// ```
/// use tensor_core::ops::vec_mat;
/// let y = vec_mat(&[1.0, 2.0], &[1.0, 2.0, 3.0, 4.0]).unwrap();
/// assert_eq!(y, vec![7.0, 10.0]);
/// ```
pub fn vec_mat(vector: &[f64], matrix: &[f64]) -> Result<Vec<f64>, TensorError> {
    let (n, m) = vec_mat_dims(vector, matrix)?;
    Ok(vec_mat_columns(vector, matrix, n, m, 0..m))
}

pub(crate) fn vec_mat_dims(vector: &[f64], matrix: &[f64]) -> Result<(usize, usize), TensorError> {
    let n = vector.len();
    if n == 0 {
        return Err(TensorError::InvalidArgument {
            op: "vec_mat",
            detail: "vector is empty".into(),
        });
    }
    if matrix.len() % n != 0 {
        return Err(TensorError::InvalidArgument {
            op: "vec_mat",
            detail: format!(
                "matrix of {} values is not a multiple of vector length {n}",
                matrix.len()
            ),
        });
    }
    Ok((n, matrix.len() / n))
}

/// Computes output columns `cols` of a vector-matrix product.
///
/// Every column is summed over `i` in ascending order, so any partition of
/// the columns gives bit-identical results.
pub(crate) fn vec_mat_columns(
    vector: &[f64],
    matrix: &[f64],
    n: usize,
    m: usize,
    cols: Range<usize>,
) -> Vec<f64> {
    cols.map(|j| (0..n).map(|i| vector[i] * matrix[i * m + j]).sum())
        .collect()
}

/// Dense layer forward pass: `output[j] = Σ_i input[i] · weights[i·m + j]`.
///
/// The weight buffer is zero-padded or truncated to exactly
/// `input.len() × output_size` values first.
///
/// # Errors
/// Returns [`TensorError::InvalidArgument`] for an empty input or a zero
/// output size.
pub fn dense_forward(
    input: &[f64],
    weights: &[f64],
    output_size: usize,
) -> Result<Vec<f64>, TensorError> {
    let n = input.len();
    if n == 0 || output_size == 0 {
        return Err(TensorError::InvalidArgument {
            op: "dense_forward",
            detail: format!("input length {n}, output size {output_size}"),
        });
    }
    let needed = n * output_size;
    let mut padded = weights[..weights.len().min(needed)].to_vec();
    padded.resize(needed, 0.0);
    Ok(vec_mat_columns(input, &padded, n, output_size, 0..output_size))
}

// ── Contraction ────────────────────────────────────────────────

/// A validated contraction of `lhs` (`[..., K]`) with `rhs` (`[K, N]`).
///
/// All leading axes of `lhs` are treated as a batch of rows.
#[derive(Debug)]
pub(crate) struct Contraction {
    lhs: Vec<f64>,
    rhs: Vec<f64>,
    pub(crate) rows: usize,
    k: usize,
    pub(crate) cols: usize,
    out_shape: Shape,
}

impl Contraction {
    pub(crate) fn plan(
        lhs: &Tensor,
        lhs_shape: &Shape,
        rhs: &Tensor,
        rhs_shape: &Shape,
    ) -> Result<Self, TensorError> {
        if !lhs_shape.is_contractible_with(rhs_shape) {
            return Err(TensorError::ShapeMismatch {
                op: "matmul",
                lhs: lhs_shape.clone(),
                rhs: rhs_shape.clone(),
            });
        }
        let lhs_flat = checked_flatten("matmul", lhs, lhs_shape)?;
        let rhs_flat = checked_flatten("matmul", rhs, rhs_shape)?;

        let k = rhs_shape.dims()[0];
        let cols = rhs_shape.last().unwrap_or(0);
        if rhs_flat.len() != k * cols {
            // rhs has interior axes that are not unit-sized
            return Err(TensorError::ShapeMismatch {
                op: "matmul",
                lhs: lhs_shape.clone(),
                rhs: rhs_shape.clone(),
            });
        }
        let rows = if k == 0 { 0 } else { lhs_flat.len() / k };

        let mut out_dims = lhs_shape.dims().to_vec();
        if let Some(last) = out_dims.last_mut() {
            *last = cols;
        }

        Ok(Self {
            lhs: lhs_flat,
            rhs: rhs_flat,
            rows,
            k,
            cols,
            out_shape: Shape::new(out_dims),
        })
    }

    /// Computes the output rows in `rows`, row-major.
    pub(crate) fn compute_rows(&self, rows: Range<usize>) -> Vec<f64> {
        let (k, n) = (self.k, self.cols);
        let mut out = Vec::with_capacity(rows.len() * n);
        for i in rows {
            let a_row = &self.lhs[i * k..(i + 1) * k];
            for j in 0..n {
                out.push((0..k).map(|t| a_row[t] * self.rhs[t * n + j]).sum());
            }
        }
        out
    }

    pub(crate) fn finish(&self, flat: Vec<f64>) -> Tensor {
        Tensor::from_flat(&flat, self.out_shape.dims())
    }
}

pub(crate) fn checked_flatten(
    op: &'static str,
    tensor: &Tensor,
    shape: &Shape,
) -> Result<Vec<f64>, TensorError> {
    let flat = tensor.flatten();
    if flat.len() != shape.num_elements() {
        return Err(TensorError::ElementCountMismatch {
            op,
            expected: shape.num_elements(),
            actual: flat.len(),
        });
    }
    Ok(flat)
}

/// Contracts the last axis of `lhs` with the first axis of `rhs`, using
/// caller-supplied dimension vectors.
///
/// `lhs` is `[d0, ..., K]` and `rhs` is `[K, N]`; the result has the
/// dimensions of `lhs` with the last one replaced by `N`. Leaves are read
/// in row-major order, so the data only has to hold the right number of
/// values, not the nesting the shape describes.
///
/// # Errors
/// Returns [`TensorError::ShapeMismatch`] if either operand has rank < 2
/// or the inner dimensions differ, and
/// [`TensorError::ElementCountMismatch`] if the data does not fill its shape.
pub fn matmul_shaped(
    lhs: &Tensor,
    lhs_shape: &Shape,
    rhs: &Tensor,
    rhs_shape: &Shape,
) -> Result<Tensor, TensorError> {
    let plan = Contraction::plan(lhs, lhs_shape, rhs, rhs_shape)?;
    let flat = plan.compute_rows(0..plan.rows);
    Ok(plan.finish(flat))
}

/// [`matmul_shaped`] with shapes inferred from the operands.
pub fn matmul(lhs: &Tensor, rhs: &Tensor) -> Result<Tensor, TensorError> {
    matmul_shaped(lhs, &lhs.shape(), rhs, &rhs.shape())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_mat_basic() {
        // [1, 2] · [[1, 2], [3, 4]] = [7, 10]
        let y = vec_mat(&[1.0, 2.0], &[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(y, vec![7.0, 10.0]);
    }

    #[test]
    fn test_vec_mat_rejects_ragged_matrix() {
        assert!(vec_mat(&[1.0, 2.0], &[1.0, 2.0, 3.0]).is_err());
        assert!(vec_mat(&[], &[1.0]).is_err());
    }

    #[test]
    fn test_vec_mat_empty_matrix() {
        assert_eq!(vec_mat(&[1.0], &[]).unwrap(), Vec::<f64>::new());
    }

    #[test]
    fn test_dense_forward_pads_weights() {
        // weights [1, 2, 3] padded to 2×2 = [[1, 2], [3, 0]]
        let y = dense_forward(&[1.0, 1.0], &[1.0, 2.0, 3.0], 2).unwrap();
        assert_eq!(y, vec![4.0, 2.0]);
    }

    #[test]
    fn test_dense_forward_truncates_weights() {
        let y = dense_forward(&[2.0], &[1.0, 2.0, 3.0, 4.0], 2).unwrap();
        assert_eq!(y, vec![2.0, 4.0]);
    }

    #[test]
    fn test_dense_forward_zero_outputs() {
        assert!(dense_forward(&[1.0], &[1.0], 0).is_err());
        assert!(dense_forward(&[], &[1.0], 1).is_err());
    }

    #[test]
    fn test_matmul_2x3_times_3x2() {
        // A = [[1, 2, 3], [4, 5, 6]]
        // B = [[7, 8], [9, 10], [11, 12]]
        // C = [[58, 64], [139, 154]]
        let a = Tensor::from(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let b = Tensor::from(vec![vec![7.0, 8.0], vec![9.0, 10.0], vec![11.0, 12.0]]);
        let c = matmul(&a, &b).unwrap();
        assert_eq!(c, Tensor::from(vec![vec![58.0, 64.0], vec![139.0, 154.0]]));
    }

    #[test]
    fn test_matmul_identity() {
        let a = Tensor::from(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let eye = Tensor::from(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        assert_eq!(matmul(&a, &eye).unwrap(), a);
    }

    #[test]
    fn test_matmul_batched_leading_axes() {
        // [2, 1, 2] × [2, 1] → [2, 1, 1]
        let a = Tensor::Seq(vec![
            Tensor::from(vec![vec![1.0, 2.0]]),
            Tensor::from(vec![vec![3.0, 4.0]]),
        ]);
        let b = Tensor::from(vec![vec![1.0], vec![1.0]]);
        let c = matmul(&a, &b).unwrap();
        assert_eq!(c.shape().dims(), &[2, 1, 1]);
        assert_eq!(c.flatten(), vec![3.0, 7.0]);
    }

    #[test]
    fn test_matmul_flat_data_with_explicit_shapes() {
        let a = Tensor::vector(&[1.0, 2.0, 3.0, 4.0]);
        let b = Tensor::vector(&[1.0, 0.0, 0.0, 1.0]);
        let c = matmul_shaped(&a, &Shape::matrix(2, 2), &b, &Shape::matrix(2, 2)).unwrap();
        assert_eq!(c, Tensor::from(vec![vec![1.0, 2.0], vec![3.0, 4.0]]));
    }

    #[test]
    fn test_matmul_shape_mismatch() {
        let a = Tensor::from(vec![vec![0.0; 3]; 2]);
        let b = Tensor::from(vec![vec![0.0; 2]; 4]); // 4 != 3
        assert!(matches!(
            matmul(&a, &b),
            Err(TensorError::ShapeMismatch { op: "matmul", .. })
        ));
    }

    #[test]
    fn test_matmul_rejects_rank_one() {
        let a = Tensor::vector(&[1.0, 2.0]);
        let b = Tensor::from(vec![vec![1.0], vec![1.0]]);
        assert!(matmul(&a, &b).is_err());
    }

    #[test]
    fn test_matmul_count_mismatch() {
        let a = Tensor::vector(&[1.0, 2.0, 3.0]);
        let b = Tensor::vector(&[1.0, 0.0, 0.0, 1.0]);
        let err = matmul_shaped(&a, &Shape::matrix(2, 2), &b, &Shape::matrix(2, 2)).unwrap_err();
        assert!(matches!(err, TensorError::ElementCountMismatch { expected: 4, actual: 3, .. }));
    }
}
