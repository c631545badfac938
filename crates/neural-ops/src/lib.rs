// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # neural-ops
//!
//! The numeric function library layered on top of [`tensor_core`]:
//!
//! - [`activation`]: ReLU, ELU, Swish and Sigmoid as recursive maps.
//! - [`loss`]: MSE, binary cross-entropy and Huber losses with structural
//!   mean reduction, plus their gradients.
//! - [`dropout`]: train/eval/masked/alpha dropout over flat vectors.
//! - [`vector`]: dot, cross, Euclidean, Manhattan, cosine and norm-based
//!   normalization.
//! - [`quantize`]: fixed-point quantization and decimal precision limiting.
//! - [`pruning`]: weight, activation and structured pruning.
//! - [`mutation`]: random perturbation of tensor leaves.
//!
//! Functions that draw random numbers take the generator explicitly so
//! callers control seeding.

pub mod activation;
pub mod dropout;
mod error;
pub mod loss;
pub mod mutation;
pub mod pruning;
pub mod quantize;
pub mod vector;

pub use activation::Activation;
pub use error::NeuralError;
pub use loss::Loss;
pub use vector::NormKind;
