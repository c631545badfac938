// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Distance, similarity and normalization over flat vectors.

use crate::NeuralError;

/// Norm used by [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormKind {
    L2,
    L1,
    Infinity,
}

impl NormKind {
    /// Maps the numeric menu code: `0` is L2, `1` is L1, anything else is
    /// the infinity norm.
    pub fn from_code(code: f64) -> Self {
        if code == 0.0 {
            Self::L2
        } else if code == 1.0 {
            Self::L1
        } else {
            Self::Infinity
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::L2 => "l2",
            Self::L1 => "l1",
            Self::Infinity => "inf",
        }
    }

    pub fn norm(&self, values: &[f64]) -> f64 {
        match self {
            Self::L2 => values.iter().map(|x| x * x).sum::<f64>().sqrt(),
            Self::L1 => values.iter().map(|x| x.abs()).sum(),
            Self::Infinity => values.iter().fold(0.0, |m, x| m.max(x.abs())),
        }
    }
}

fn paired<'a>(
    op: &'static str,
    a: &'a [f64],
    b: &'a [f64],
) -> Result<impl Iterator<Item = (f64, f64)> + 'a, NeuralError> {
    if a.len() != b.len() {
        return Err(NeuralError::LengthMismatch {
            op,
            lhs: a.len(),
            rhs: b.len(),
        });
    }
    if a.is_empty() {
        return Err(NeuralError::Empty { op });
    }
    Ok(a.iter().copied().zip(b.iter().copied()))
}

pub fn dot(a: &[f64], b: &[f64]) -> Result<f64, NeuralError> {
    Ok(paired("dot", a, b)?.map(|(x, y)| x * y).sum())
}

pub fn euclidean(a: &[f64], b: &[f64]) -> Result<f64, NeuralError> {
    Ok(paired("euclidean", a, b)?
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt())
}

pub fn manhattan(a: &[f64], b: &[f64]) -> Result<f64, NeuralError> {
    Ok(paired("manhattan", a, b)?.map(|(x, y)| (x - y).abs()).sum())
}

/// Cosine similarity, clamped to `[-1, 1]`.
///
/// # Errors
/// Besides length mismatch and empty input, a zero-norm operand is a
/// [`NeuralError::Domain`] error.
pub fn cosine(a: &[f64], b: &[f64]) -> Result<f64, NeuralError> {
    let (mut dot, mut na, mut nb) = (0.0, 0.0, 0.0);
    for (x, y) in paired("cosine", a, b)? {
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    let denom = na.sqrt() * nb.sqrt();
    if denom == 0.0 {
        return Err(NeuralError::Domain {
            op: "cosine",
            detail: "zero-norm operand".into(),
        });
    }
    Ok((dot / denom).clamp(-1.0, 1.0))
}

/// Cross product; defined for 3-vectors only.
pub fn cross(a: &[f64], b: &[f64]) -> Result<[f64; 3], NeuralError> {
    match (a, b) {
        ([a0, a1, a2], [b0, b1, b2]) => Ok([
            a1 * b2 - a2 * b1,
            a2 * b0 - a0 * b2,
            a0 * b1 - a1 * b0,
        ]),
        _ => Err(NeuralError::Domain {
            op: "cross",
            detail: format!("needs two 3-vectors, got lengths {} and {}", a.len(), b.len()),
        }),
    }
}

/// Scales `values` to unit norm. A zero vector maps to all zeros.
pub fn normalize(values: &[f64], kind: NormKind) -> Result<Vec<f64>, NeuralError> {
    if values.is_empty() {
        return Err(NeuralError::Empty { op: "normalize" });
    }
    let norm = kind.norm(values);
    if norm == 0.0 {
        return Ok(vec![0.0; values.len()]);
    }
    Ok(values.iter().map(|x| x / norm).collect())
}
