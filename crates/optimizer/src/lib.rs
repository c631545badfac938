// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # optimizer
//!
//! Gradient-descent parameter updates whose state is threaded through the
//! caller.
//!
//! Each call takes weights, gradients, a learning rate and an
//! [`OptimizerConfig`] (hyperparameters plus the state returned by the
//! previous call) and produces a [`WeightUpdate`]: the new weights in their
//! original shape and a freshly built [`OptimizerState`]. Incoming state is
//! never mutated.
//!
//! # Update rules
//!
//! | Rule | State | Update |
//! |---|---|---|
//! | [`Sgd`] | none | `w - lr·g` |
//! | [`Adam`] | `m`, `v`, step `t` | bias-corrected moment update |
//!
//! New rules implement [`UpdateRule`].
//!
//! # Example
//! ```
//! use optimizer::{update_weights, OptimizerConfig, OptimizerKind};
//! use tensor_core::Tensor;
//!
//! let w = Tensor::vector(&[1.0]);
//! let g = Tensor::vector(&[0.1]);
//! let out = update_weights(&w, &g, OptimizerKind::Adam, 0.01, &OptimizerConfig::default()).unwrap();
//! let w1 = out.weights.flatten()[0];
//! assert!((w1 - 0.99).abs() < 1e-6);
//! ```

mod config;
mod error;
pub mod rule;
mod state;
mod update;

pub use config::{OptimizerConfig, OptimizerKind};
pub use error::OptimError;
pub use rule::adam::Adam;
pub use rule::sgd::Sgd;
pub use rule::UpdateRule;
pub use state::OptimizerState;
pub use update::{update_bias, update_weights, WeightUpdate, DEFAULT_LEARNING_RATE};
