// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # runtime
//!
//! Call-by-name access to every tensor, numeric, optimizer and encoding
//! operation in the workspace.
//!
//! Each operation has a fixed positional parameter list, takes loosely
//! typed [`Input`](tensor_core::Input) arguments (text or tensors) and
//! returns canonical text. A call never fails from the caller's point of
//! view: errors and panics degrade to the operation's sentinel (`[]`, `0`,
//! `{}`, ...), with the structured [`RuntimeError`] available through
//! [`Runtime::call_detailed`].
//!
//! # Modules
//! - [`opcode`]: the operation registry (names, parameters, sentinels).
//! - [`menu`]: closed mode enumerations and their accepted labels.
//! - [`store`]: bridge to a host variable store for list import/export.
//!
//! # Concurrency
//! [`Runtime`] is `Send + Sync`. The random generator behind dropout and
//! random variation sits behind a mutex, and [`Runtime::call_async`] runs
//! calls on tokio's blocking pool.

mod config;
mod dispatch;
mod engine;
mod error;
pub mod menu;
mod metrics;
pub mod opcode;
pub mod store;

pub use config::RuntimeConfig;
pub use dispatch::MAX_ELEMENTS;
pub use engine::{CallOutcome, Runtime};
pub use error::RuntimeError;
pub use metrics::{CallMetrics, OperationStats};
pub use opcode::{OpCode, Sentinel};
pub use store::{InMemoryStore, Scope, ValueHolder, VariableKind, VariableStore};
