// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Adding and removing nesting levels ("shells").

use crate::Tensor;

/// Upper bound on shell layers added or removed in one call.
pub const MAX_SHELL_LAYERS: usize = 256;

/// Wraps `tensor` in `layers` additional levels of nesting.
///
/// `layers` is capped at [`MAX_SHELL_LAYERS`].
pub fn add_shell(tensor: &Tensor, layers: usize) -> Tensor {
    (0..layers.min(MAX_SHELL_LAYERS)).fold(tensor.clone(), |t, _| t.wrapped())
}

/// Removes up to `layers` levels of nesting.
///
/// Each level concatenates the children of the current sequence. Peeling
/// stops early, keeping what has been removed so far, as soon as the
/// current value is not a sequence, holds a non-sequence element, or holds
/// sequences of differing lengths.
pub fn remove_shell(tensor: &Tensor, layers: usize) -> Tensor {
    let mut current = tensor.clone();
    for _ in 0..layers.min(MAX_SHELL_LAYERS) {
        match peel(&current) {
            Some(next) => current = next,
            None => break,
        }
    }
    current
}

fn peel(tensor: &Tensor) -> Option<Tensor> {
    let items = tensor.as_seq()?;
    let width = items.first()?.as_seq()?.len();
    let mut out = Vec::with_capacity(items.len() * width);
    for item in items {
        let children = item.as_seq()?;
        if children.len() != width {
            return None;
        }
        out.extend(children.iter().cloned());
    }
    Some(Tensor::Seq(out))
}
