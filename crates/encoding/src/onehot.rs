// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! One-hot encoding and decoding.
//!
//! Indices are floored before use. An index outside `0..classes` encodes
//! as an all-zero row (or, for label smoothing, an all-`smoothing/classes`
//! row) instead of failing.

use tensor_core::Tensor;

use crate::EncodingError;

/// Upper bound on the class count, so a stray huge number cannot allocate
/// unbounded rows.
pub const MAX_CLASSES: usize = 1 << 20;

/// How [`decode`] reports each row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DecodeMode {
    /// Position of the largest entry.
    #[default]
    Index,
    /// The largest entry itself.
    Value,
}

impl DecodeMode {
    /// `0` selects [`DecodeMode::Index`]; anything else selects
    /// [`DecodeMode::Value`].
    pub fn from_code(code: f64) -> Self {
        if code == 0.0 || code.is_nan() {
            Self::Index
        } else {
            Self::Value
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Value => "value",
        }
    }
}

/// Normalizes a raw class count: `max(1, floor(|raw|))`, capped at
/// [`MAX_CLASSES`].
pub fn class_count(raw: f64) -> usize {
    if !raw.is_finite() {
        return 1;
    }
    let n = raw.abs().floor();
    if n < 1.0 {
        1
    } else if n >= MAX_CLASSES as f64 {
        MAX_CLASSES
    } else {
        n as usize
    }
}

fn slot(index: f64, classes: usize) -> Option<usize> {
    let i = index.floor();
    if i >= 0.0 && i < classes as f64 {
        Some(i as usize)
    } else {
        None
    }
}

/// Encodes each index as a unit row of length `classes`.
pub fn one_hot(indices: &[f64], classes: usize) -> Result<Tensor, EncodingError> {
    if indices.is_empty() {
        return Err(EncodingError::Empty { op: "one_hot" });
    }
    let rows: Vec<Vec<f64>> = indices
        .iter()
        .map(|&index| {
            let mut row = vec![0.0; classes];
            if let Some(i) = slot(index, classes) {
                row[i] = 1.0;
            }
            row
        })
        .collect();
    Ok(Tensor::from(rows))
}

/// Same result as [`one_hot`], built by copying one zeroed template row.
pub fn one_hot_batch(indices: &[f64], classes: usize) -> Result<Tensor, EncodingError> {
    if indices.is_empty() {
        return Err(EncodingError::Empty { op: "one_hot_batch" });
    }
    let template = Tensor::vector(&vec![0.0; classes]);
    let mut rows = Vec::with_capacity(indices.len());
    for &index in indices {
        let mut row = template.clone();
        if let (Some(i), Tensor::Seq(cells)) = (slot(index, classes), &mut row) {
            cells[i] = Tensor::Scalar(1.0);
        }
        rows.push(row);
    }
    Ok(Tensor::Seq(rows))
}

/// Label-smoothed encoding: the target slot holds `1 - smoothing` and
/// every other slot holds `smoothing / classes`.
///
/// `smoothing` is clamped to `[0, 1]`.
pub fn one_hot_smooth(
    indices: &[f64],
    classes: usize,
    smoothing: f64,
) -> Result<Tensor, EncodingError> {
    if indices.is_empty() {
        return Err(EncodingError::Empty { op: "one_hot_smooth" });
    }
    let smoothing = if smoothing.is_nan() {
        0.0
    } else {
        smoothing.clamp(0.0, 1.0)
    };
    let off = smoothing / classes as f64;
    let on = 1.0 - smoothing;
    let rows: Vec<Vec<f64>> = indices
        .iter()
        .map(|&index| {
            let mut row = vec![off; classes];
            if let Some(i) = slot(index, classes) {
                row[i] = on;
            }
            row
        })
        .collect();
    Ok(Tensor::from(rows))
}

/// Encodes each label set as the union of its one-hot rows.
pub fn multi_label(label_sets: &[Vec<f64>], classes: usize) -> Result<Tensor, EncodingError> {
    if label_sets.is_empty() {
        return Err(EncodingError::Empty { op: "multi_label_one_hot" });
    }
    let rows: Vec<Vec<f64>> = label_sets
        .iter()
        .map(|labels| {
            let mut row = vec![0.0; classes];
            for &label in labels {
                if let Some(i) = slot(label, classes) {
                    row[i] = 1.0;
                }
            }
            row
        })
        .collect();
    Ok(Tensor::from(rows))
}

/// Decodes each row to its argmax index or value. Ties resolve to the
/// first maximum; an empty row decodes to index `0` or value `-∞`.
pub fn decode(rows: &[Vec<f64>], mode: DecodeMode) -> Result<Vec<f64>, EncodingError> {
    if rows.is_empty() {
        return Err(EncodingError::Empty { op: "one_hot_decode" });
    }
    Ok(rows
        .iter()
        .map(|row| {
            let mut best = f64::NEG_INFINITY;
            let mut at = 0usize;
            for (i, &x) in row.iter().enumerate() {
                if x > best {
                    best = x;
                    at = i;
                }
            }
            match mode {
                DecodeMode::Index => at as f64,
                DecodeMode::Value => best,
            }
        })
        .collect())
}

// ── Row extraction ─────────────────────────────────────────────

/// Splits a tensor into label sets: each nested item contributes its
/// leaves, each bare number is a set of one.
pub fn label_rows(tensor: &Tensor) -> Vec<Vec<f64>> {
    match tensor {
        Tensor::Scalar(x) => vec![vec![*x]],
        Tensor::Seq(items) => items
            .iter()
            .map(|item| match item {
                Tensor::Scalar(x) => vec![*x],
                seq => seq.flatten(),
            })
            .collect(),
    }
}

/// Splits a tensor into encoded rows. A flat vector is a single row.
pub fn encoded_rows(tensor: &Tensor) -> Vec<Vec<f64>> {
    match tensor {
        Tensor::Seq(items) if !items.is_empty() && items.iter().all(Tensor::is_scalar) => {
            vec![tensor.flatten()]
        }
        other => label_rows(other),
    }
}
