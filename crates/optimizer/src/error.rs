// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for optimizer updates.

use tensor_core::Shape;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OptimError {
    /// Parameters and gradients have different dimension vectors.
    #[error("parameter shape {params} does not match gradient shape {grads}")]
    DimensionMismatch { params: Shape, grads: Shape },

    /// Parameters or gradients are not a regular tensor.
    #[error("{which} tensor is ragged")]
    Ragged { which: &'static str },
}
