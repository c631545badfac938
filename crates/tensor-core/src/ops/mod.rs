// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tensor operators.
//!
//! Every operator takes its inputs by reference and returns a fresh value.
//! Failures are reported as [`TensorError`](crate::TensorError); the
//! structural operators (merge, split, shells) instead fall back to
//! returning their input unchanged.

mod add_op;
mod concat_op;
mod matmul_op;
pub mod parallel;
mod reduce_op;
mod reshape_op;
mod shell_op;
mod transpose_op;

pub use add_op::{add, add_shaped};
pub use concat_op::{merge, split};
pub use matmul_op::{dense_forward, matmul, matmul_shaped, vec_mat};
pub use parallel::{matmul_parallel, vec_mat_parallel, ParallelConfig};
pub use reduce_op::bias_gradient;
pub use reshape_op::{create, reshape};
pub use shell_op::{add_shell, remove_shell, MAX_SHELL_LAYERS};
pub use transpose_op::transpose;
