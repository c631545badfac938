// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the encoding helpers.

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EncodingError {
    /// Nothing to encode.
    #[error("{op}: empty input")]
    Empty { op: &'static str },

    /// A dictionary argument did not parse to an object.
    #[error("{op}: expected a dictionary, got {found}")]
    NotAnObject { op: &'static str, found: String },

    /// A key or value list did not parse to an array.
    #[error("{op}: expected an array, got {found}")]
    NotAnArray { op: &'static str, found: String },
}
