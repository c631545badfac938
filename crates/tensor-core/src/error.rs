// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for tensor operations.

use crate::{ParseDiagnostic, Shape};

/// Errors that can occur during tensor operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TensorError {
    /// Two tensors have incompatible shapes for the requested operation.
    #[error("incompatible shapes for {op}: {lhs} vs {rhs}")]
    ShapeMismatch {
        op: &'static str,
        lhs: Shape,
        rhs: Shape,
    },

    /// The number of leaf values does not match what the shape requires.
    #[error("element count mismatch in {op}: expected {expected}, got {actual}")]
    ElementCountMismatch {
        op: &'static str,
        expected: usize,
        actual: usize,
    },

    /// An argument is outside the operation's domain (empty vector,
    /// zero-sized output, wrong target rank, ...).
    #[error("invalid argument for {op}: {detail}")]
    InvalidArgument { op: &'static str, detail: String },

    /// The operation needs a sequence but was handed a bare scalar.
    #[error("{op} expects a sequence, got a scalar")]
    ExpectedSequence { op: &'static str },

    /// Strict parsing of textual input failed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseDiagnostic),
}
