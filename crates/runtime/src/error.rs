// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the operation dispatcher.

/// Errors that can occur while dispatching a call.
///
/// Callers of [`Runtime::call`](crate::Runtime::call) never see these; they
/// get the operation's sentinel text instead.
/// [`Runtime::call_detailed`](crate::Runtime::call_detailed) returns both.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// No operation is registered under this name.
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),

    /// The call supplied more arguments than the operation accepts.
    #[error("'{op}' takes {expected} arguments, got {actual}")]
    Arity {
        op: &'static str,
        expected: usize,
        actual: usize,
    },

    /// An argument was present but unusable (bad mode label, bad dims, ...).
    #[error("'{op}': {detail}")]
    InvalidArgument { op: &'static str, detail: String },

    #[error("tensor error: {0}")]
    Tensor(#[from] tensor_core::TensorError),

    #[error("numeric error: {0}")]
    Neural(#[from] neural_ops::NeuralError),

    #[error("optimizer error: {0}")]
    Optimizer(#[from] optimizer::OptimError),

    #[error("encoding error: {0}")]
    Encoding(#[from] encoding::EncodingError),

    /// Rendering a result failed.
    #[error("serialisation error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The operation panicked; the panic was contained.
    #[error("'{op}' panicked: {message}")]
    Panicked { op: &'static str, message: String },

    /// The blocking task running an async call failed to complete.
    #[error("task error: {0}")]
    Task(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}
