// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The nested tensor value.
//!
//! A [`Tensor`] is either a single number or an ordered sequence of tensors.
//! Nothing forces siblings to share a shape: a ragged value such as
//! `[[1, 2], [3]]` is representable, and operations that need regularity
//! check for it explicitly (see [`Tensor::is_regular`]).

use crate::Shape;

/// A scalar or an arbitrarily nested sequence of scalars.
#[derive(Debug, Clone, PartialEq)]
pub enum Tensor {
    Scalar(f64),
    Seq(Vec<Tensor>),
}

impl Tensor {
    /// The empty sequence `[]`.
    pub fn empty() -> Self {
        Tensor::Seq(Vec::new())
    }

    /// A rank-1 tensor from a slice of numbers.
    pub fn vector(values: &[f64]) -> Self {
        Tensor::Seq(values.iter().copied().map(Tensor::Scalar).collect())
    }

    /// Returns `true` for a bare scalar.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Tensor::Scalar(_))
    }

    /// Returns `true` for the empty sequence.
    pub fn is_empty_seq(&self) -> bool {
        matches!(self, Tensor::Seq(items) if items.is_empty())
    }

    /// The scalar value, if this is a scalar.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Tensor::Scalar(x) => Some(*x),
            Tensor::Seq(_) => None,
        }
    }

    /// The children, if this is a sequence.
    pub fn as_seq(&self) -> Option<&[Tensor]> {
        match self {
            Tensor::Scalar(_) => None,
            Tensor::Seq(items) => Some(items),
        }
    }

    /// Number of direct children (0 for a scalar).
    pub fn len(&self) -> usize {
        match self {
            Tensor::Scalar(_) => 0,
            Tensor::Seq(items) => items.len(),
        }
    }

    /// Returns `true` if there are no direct children.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The dimension vector obtained by walking first children.
    pub fn shape(&self) -> Shape {
        Shape::of(self)
    }

    /// All leaf values in depth-first order.
    pub fn flatten(&self) -> Vec<f64> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<f64>) {
        match self {
            Tensor::Scalar(x) => out.push(*x),
            Tensor::Seq(items) => {
                for item in items {
                    item.collect_leaves(out);
                }
            }
        }
    }

    /// Number of leaf values.
    pub fn num_leaves(&self) -> usize {
        match self {
            Tensor::Scalar(_) => 1,
            Tensor::Seq(items) => items.iter().map(Tensor::num_leaves).sum(),
        }
    }

    /// Rebuilds a nested tensor from a flat buffer and a dimension vector.
    ///
    /// The buffer is consumed in row-major order. An empty dimension vector
    /// yields a scalar (the first element). If the buffer is shorter than the
    /// dimensions require, trailing groups come out short; callers that need
    /// an exact fit check `num_elements()` first.
    pub fn from_flat(flat: &[f64], dims: &[usize]) -> Tensor {
        match dims {
            [] => match flat.first() {
                Some(x) => Tensor::Scalar(*x),
                None => Tensor::empty(),
            },
            [n] => Tensor::vector(&flat[..(*n).min(flat.len())]),
            [n, rest @ ..] => {
                let group: usize = rest.iter().product();
                let items = (0..*n)
                    .map(|i| {
                        let start = (i * group).min(flat.len());
                        let end = ((i + 1) * group).min(flat.len());
                        Tensor::from_flat(&flat[start..end], rest)
                    })
                    .collect();
                Tensor::Seq(items)
            }
        }
    }

    /// Applies `f` to every leaf, preserving structure.
    pub fn map<F: FnMut(f64) -> f64>(&self, mut f: F) -> Tensor {
        self.map_leaves(&mut f)
    }

    fn map_leaves<F: FnMut(f64) -> f64>(&self, f: &mut F) -> Tensor {
        match self {
            Tensor::Scalar(x) => Tensor::Scalar(f(*x)),
            Tensor::Seq(items) => Tensor::Seq(items.iter().map(|t| t.map_leaves(f)).collect()),
        }
    }

    /// Returns `true` if siblings at every level share the same shape,
    /// i.e. the tensor is a proper hyper-rectangle.
    pub fn is_regular(&self) -> bool {
        match self {
            Tensor::Scalar(_) => true,
            Tensor::Seq(items) => {
                let Some(first) = items.first() else {
                    return true;
                };
                let expected = first.shape();
                items
                    .iter()
                    .all(|item| item.is_regular() && item.shape() == expected)
            }
        }
    }

    /// Wraps this tensor in one more level of nesting: `x` becomes `[x]`.
    pub fn wrapped(self) -> Tensor {
        Tensor::Seq(vec![self])
    }
}

impl From<f64> for Tensor {
    fn from(x: f64) -> Self {
        Tensor::Scalar(x)
    }
}

impl From<Vec<f64>> for Tensor {
    fn from(values: Vec<f64>) -> Self {
        Tensor::Seq(values.into_iter().map(Tensor::Scalar).collect())
    }
}

impl From<Vec<Vec<f64>>> for Tensor {
    fn from(rows: Vec<Vec<f64>>) -> Self {
        Tensor::Seq(rows.into_iter().map(Tensor::from).collect())
    }
}

impl From<Vec<Tensor>> for Tensor {
    fn from(items: Vec<Tensor>) -> Self {
        Tensor::Seq(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(rows: Vec<Vec<f64>>) -> Tensor {
        Tensor::from(rows)
    }

    #[test]
    fn test_shape_walks_first_child() {
        let x = t(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]);
        assert_eq!(x.shape().dims(), &[3, 2]);
    }

    #[test]
    fn test_flatten_depth_first() {
        let x = Tensor::Seq(vec![
            Tensor::Scalar(1.0),
            Tensor::from(vec![2.0, 3.0]),
            Tensor::Seq(vec![Tensor::from(vec![4.0])]),
        ]);
        assert_eq!(x.flatten(), vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(x.num_leaves(), 4);
    }

    #[test]
    fn test_from_flat_inverts_flatten() {
        let x = Tensor::Seq(vec![
            t(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]),
            t(vec![vec![7.0, 8.0, 9.0], vec![10.0, 11.0, 12.0]]),
        ]);
        let rebuilt = Tensor::from_flat(&x.flatten(), x.shape().dims());
        assert_eq!(rebuilt, x);
    }

    #[test]
    fn test_from_flat_scalar_dims() {
        assert_eq!(Tensor::from_flat(&[7.0], &[]), Tensor::Scalar(7.0));
        assert_eq!(Tensor::from_flat(&[], &[]), Tensor::empty());
    }

    #[test]
    fn test_from_flat_short_buffer() {
        let x = Tensor::from_flat(&[1.0, 2.0, 3.0], &[2, 2]);
        assert_eq!(x, t(vec![vec![1.0, 2.0], vec![3.0]]));
    }

    #[test]
    fn test_map_preserves_structure() {
        let x = t(vec![vec![1.0, -2.0], vec![3.0, -4.0]]);
        let y = x.map(|v| v.max(0.0));
        assert_eq!(y, t(vec![vec![1.0, 0.0], vec![3.0, 0.0]]));
    }

    #[test]
    fn test_map_with_state() {
        let x = Tensor::from(vec![0.0, 0.0, 0.0]);
        let mut counter = 0.0;
        let y = x.map(|_| {
            counter += 1.0;
            counter
        });
        assert_eq!(y, Tensor::from(vec![1.0, 2.0, 3.0]));
    }

    #[test]
    fn test_is_regular() {
        assert!(t(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).is_regular());
        assert!(!t(vec![vec![1.0, 2.0], vec![3.0]]).is_regular());
        assert!(!Tensor::Seq(vec![Tensor::Scalar(1.0), Tensor::from(vec![2.0])]).is_regular());
        assert!(Tensor::empty().is_regular());
        assert!(Tensor::Scalar(1.0).is_regular());
    }

    #[test]
    fn test_accessors() {
        let x = Tensor::from(vec![1.0, 2.0]);
        assert_eq!(x.len(), 2);
        assert!(x.as_scalar().is_none());
        assert_eq!(x.as_seq().map(<[Tensor]>::len), Some(2));
        assert!(Tensor::empty().is_empty_seq());
        assert!(!Tensor::Scalar(0.0).is_empty_seq());
        assert_eq!(Tensor::Scalar(2.0).wrapped(), Tensor::from(vec![2.0]));
    }
}
