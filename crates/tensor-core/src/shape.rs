// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Dimension vectors and stride utilities.

use crate::Tensor;
use std::fmt;

/// The dimension vector of a [`Tensor`], outermost level first.
///
/// A shape is derived by walking the first child at each nesting level,
/// so it describes a tensor faithfully only when that tensor is regular
/// (see [`Tensor::is_regular`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    /// Creates a new shape from the given dimensions.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::Shape;
    /// let s = Shape::new(vec![2, 3, 4]);
    /// assert_eq!(s.rank(), 3);
    /// assert_eq!(s.num_elements(), 24);
    /// ```
    pub fn new(dims: Vec<usize>) -> Self {
        Self { dims }
    }

    /// Creates a scalar shape (rank 0).
    pub fn scalar() -> Self {
        Self { dims: vec![] }
    }

    /// Creates a 1-D shape.
    pub fn vector(len: usize) -> Self {
        Self { dims: vec![len] }
    }

    /// Creates a 2-D shape (matrix).
    pub fn matrix(rows: usize, cols: usize) -> Self {
        Self {
            dims: vec![rows, cols],
        }
    }

    /// Computes the dimension vector of `tensor`.
    ///
    /// Appends the length at each level while descending into the first
    /// child, stopping at the first scalar. A bare scalar has the empty
    /// shape; an empty sequence has shape `[0]`.
    pub fn of(tensor: &Tensor) -> Self {
        let mut dims = Vec::new();
        let mut current = tensor;
        while let Tensor::Seq(items) = current {
            dims.push(items.len());
            match items.first() {
                Some(first) => current = first,
                None => break,
            }
        }
        Self { dims }
    }

    /// Returns the number of dimensions (rank).
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Returns the total number of elements.
    ///
    /// For a scalar shape (rank 0), returns 1.
    pub fn num_elements(&self) -> usize {
        self.dims.iter().product()
    }

    /// Returns the dimensions as a slice.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Returns the size of a specific dimension, or `None` if out of bounds.
    pub fn dim(&self, index: usize) -> Option<usize> {
        self.dims.get(index).copied()
    }

    /// Returns the size of the innermost dimension.
    pub fn last(&self) -> Option<usize> {
        self.dims.last().copied()
    }

    /// Computes row-major (C-order) strides for this shape.
    ///
    /// The stride for dimension `i` is the number of elements to skip
    /// in the flat buffer to advance one step along that dimension.
    pub fn strides(&self) -> Vec<usize> {
        let rank = self.dims.len();
        if rank == 0 {
            return vec![];
        }
        let mut strides = vec![0usize; rank];
        strides[rank - 1] = 1;
        for i in (0..rank - 1).rev() {
            strides[i] = strides[i + 1] * self.dims[i + 1];
        }
        strides
    }

    /// Returns a copy of this shape with axes `a` and `b` exchanged.
    ///
    /// Returns `None` if either axis is out of range.
    pub fn swap_axes(&self, a: usize, b: usize) -> Option<Shape> {
        if a >= self.rank() || b >= self.rank() {
            return None;
        }
        let mut dims = self.dims.clone();
        dims.swap(a, b);
        Some(Shape { dims })
    }

    /// Returns `true` if the shapes agree on every axis except the first.
    ///
    /// This is the precondition for concatenation along axis 0.
    pub fn is_concat_compatible(&self, other: &Shape) -> bool {
        self.rank() == other.rank() && self.dims.get(1..) == other.dims.get(1..)
    }

    /// Returns `true` if the shapes are compatible for a contraction:
    /// `self` is `[..., K]` and `other` is `[K, ..., N]`, both rank ≥ 2.
    pub fn is_contractible_with(&self, other: &Shape) -> bool {
        if self.rank() < 2 || other.rank() < 2 {
            return false;
        }
        self.dims[self.rank() - 1] == other.dims[0]
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{d}")?;
        }
        write!(f, "]")
    }
}

/// Convenience: `Shape::from(vec![2, 3])`.
impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Self::new(dims)
    }
}

/// Convenience: `Shape::from(&[2, 3][..])`.
impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Self::new(dims.to_vec())
    }
}
