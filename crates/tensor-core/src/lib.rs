// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tensor-core
//!
//! Nested tensor values and the shape machinery every other crate in the
//! workspace builds on.
//!
//! This crate provides:
//! - [`Tensor`]: a tagged union of `Scalar(f64)` and `Seq(Vec<Tensor>)`,
//!   walked by exhaustive pattern matching instead of runtime type checks.
//! - [`Shape`]: the dimension vector of a regular tensor, with row-major
//!   strides.
//! - [`parse`]: the value parser: a strict entry point returning a
//!   [`ParseDiagnostic`], and a lenient boundary adapter that never fails.
//! - [`canonical`]: the canonical JSON-like text form exchanged at the
//!   system boundary.
//! - [`ops`]: the tensor operator set: vector-matrix product, dense
//!   forward pass, elementwise add, contraction, reshape, two-axis transpose,
//!   merge/split along axis 0, shell add/remove, and the bias-gradient
//!   reduction, plus an optional multi-threaded fan-out for the products.
//!
//! # Design Goals
//! - Every operation is a pure function from inputs to a fresh value.
//! - Shape mismatches surface as [`TensorError`] values; deciding what the
//!   caller sees on failure is left to the dispatcher.
//! - Clean error types via `thiserror`.

pub mod canonical;
mod error;
pub mod ops;
pub mod parse;
mod shape;
mod tensor;

pub use error::TensorError;
pub use parse::{Input, ParseDiagnostic};
pub use shape::Shape;
pub use tensor::Tensor;
