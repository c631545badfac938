// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the numeric function library.

use tensor_core::{Shape, TensorError};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NeuralError {
    /// Two flat vectors have different lengths.
    #[error("{op}: length mismatch ({lhs} vs {rhs})")]
    LengthMismatch {
        op: &'static str,
        lhs: usize,
        rhs: usize,
    },

    /// Paired tensors have different dimension vectors.
    #[error("{op}: dimension mismatch ({lhs} vs {rhs})")]
    DimensionMismatch {
        op: &'static str,
        lhs: Shape,
        rhs: Shape,
    },

    /// The operation has nothing to work on.
    #[error("{op}: empty input")]
    Empty { op: &'static str },

    /// The input is valid but outside the function's domain.
    #[error("{op}: {detail}")]
    Domain { op: &'static str, detail: String },

    #[error(transparent)]
    Tensor(#[from] TensorError),
}
