// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Value parsing.
//!
//! Two entry points share one grammar (JSON arrays and numbers, with a
//! whitespace-separated list of numbers as fallback):
//!
//! - [`parse_strict`] rejects anything that is not a well-formed numeric
//!   value and explains why in a [`ParseDiagnostic`].
//! - [`parse_lenient`] never fails: unparseable leaves become `0` and
//!   unparseable text falls back to the whitespace grammar. This is what
//!   the external-call boundary uses.
//!
//! [`Input`] lets callers hand over either text or an already structured
//! [`Tensor`]; structured values are used as-is.

use crate::Tensor;
use serde_json::Value;
use std::borrow::Cow;

/// Why a strict parse failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseDiagnostic {
    #[error("input is empty")]
    Empty,

    #[error("malformed structured text: {0}")]
    Syntax(String),

    #[error("non-numeric value at {path}")]
    NonNumericLeaf { path: String },

    #[error("unparseable token '{token}' at position {position}")]
    BadToken { token: String, position: usize },
}

/// Parses `text` strictly into a tensor.
///
/// Accepts a JSON number, a JSON array nested to any depth whose leaves are
/// all numbers, or a whitespace-separated list of numbers.
pub fn parse_strict(text: &str) -> Result<Tensor, ParseDiagnostic> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseDiagnostic::Empty);
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => strict_from_value(&value, "$"),
        Err(json_err) => {
            let looks_structured = trimmed.starts_with('[') || trimmed.starts_with('{');
            if looks_structured {
                return Err(ParseDiagnostic::Syntax(json_err.to_string()));
            }
            let mut values = Vec::new();
            for (position, token) in trimmed.split_whitespace().enumerate() {
                match strict_number(token) {
                    Some(x) => values.push(x),
                    None => {
                        return Err(ParseDiagnostic::BadToken {
                            token: token.to_string(),
                            position,
                        })
                    }
                }
            }
            Ok(Tensor::from(values))
        }
    }
}

fn strict_from_value(value: &Value, path: &str) -> Result<Tensor, ParseDiagnostic> {
    match value {
        Value::Number(n) => n.as_f64().map(Tensor::Scalar).ok_or_else(|| {
            ParseDiagnostic::NonNumericLeaf {
                path: path.to_string(),
            }
        }),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| strict_from_value(item, &format!("{path}[{i}]")))
            .collect::<Result<Vec<_>, _>>()
            .map(Tensor::Seq),
        _ => Err(ParseDiagnostic::NonNumericLeaf {
            path: path.to_string(),
        }),
    }
}

fn strict_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|x| !x.is_nan())
}

/// Parses `text` into a tensor, never failing.
///
/// Leaves that are not numbers are coerced: numeric strings to their value,
/// booleans to `1`/`0`, anything else to `0`. Text that is not valid JSON is
/// split on whitespace and each token coerced the same way. Empty text
/// yields the empty sequence.
pub fn parse_lenient(text: &str) -> Tensor {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Tensor::empty();
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(_)) => Tensor::empty(),
        Ok(value) => coerce_value(&value),
        Err(_) => Tensor::from(
            trimmed
                .split_whitespace()
                .map(coerce_number)
                .collect::<Vec<_>>(),
        ),
    }
}

fn coerce_value(value: &Value) -> Tensor {
    match value {
        Value::Array(items) => Tensor::Seq(items.iter().map(coerce_value).collect()),
        other => Tensor::Scalar(coerce_leaf(other)),
    }
}

fn coerce_leaf(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => coerce_number(s),
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => 0.0,
    }
}

/// Coerces a text token to a number: blank text is `0`, unparseable or
/// NaN text is `0`.
pub fn coerce_number(token: &str) -> f64 {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    strict_number(trimmed).unwrap_or(0.0)
}

/// Parses text into a flat numeric vector, never failing.
///
/// A bare number becomes a one-element vector. Nested sequences are
/// flattened by exactly one level; anything still nested below that is
/// coerced to `0`.
pub fn parse_vector(text: &str) -> Vec<f64> {
    flatten_one_level(&parse_lenient(text))
}

fn flatten_one_level(tensor: &Tensor) -> Vec<f64> {
    match tensor {
        Tensor::Scalar(x) => vec![*x],
        Tensor::Seq(items) => items
            .iter()
            .flat_map(|item| match item {
                Tensor::Scalar(x) => vec![*x],
                Tensor::Seq(children) => children
                    .iter()
                    .map(|c| c.as_scalar().unwrap_or(0.0))
                    .collect(),
            })
            .collect(),
    }
}

// ── Boundary input ─────────────────────────────────────────────

/// A single argument at the external-call boundary: raw text or a value
/// that is already structured.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Text(String),
    Tensor(Tensor),
}

impl Input {
    /// The argument as a tensor, parsing text leniently.
    pub fn to_tensor(&self) -> Tensor {
        match self {
            Input::Text(text) => parse_lenient(text),
            Input::Tensor(t) => t.clone(),
        }
    }

    /// The argument as a flat numeric vector (one level of flattening).
    pub fn to_vector(&self) -> Vec<f64> {
        match self {
            Input::Text(text) => parse_vector(text),
            Input::Tensor(t) => flatten_one_level(t),
        }
    }

    /// The argument as a single number, or `None` if it is not one.
    ///
    /// A one-element sequence counts as its element.
    pub fn to_number(&self) -> Option<f64> {
        let x = match self {
            Input::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    Some(0.0)
                } else {
                    strict_number(trimmed)
                }
            }
            Input::Tensor(Tensor::Scalar(x)) => Some(*x),
            Input::Tensor(Tensor::Seq(items)) => match items.as_slice() {
                [] => Some(0.0),
                [only] => only.as_scalar(),
                _ => None,
            },
        };
        x.filter(|v| !v.is_nan())
    }

    /// The argument as a number, substituting `default` when it is missing,
    /// not a number, or zero.
    pub fn number_or(&self, default: f64) -> f64 {
        match self.to_number() {
            Some(x) if x != 0.0 => x,
            _ => default,
        }
    }

    /// The argument as text. Structured values render canonically.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Input::Text(text) => Cow::Borrowed(text),
            Input::Tensor(t) => Cow::Owned(crate::canonical::to_text(t)),
        }
    }
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Input::Text(text.to_string())
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Input::Text(text)
    }
}

impl From<Tensor> for Input {
    fn from(t: Tensor) -> Self {
        Input::Tensor(t)
    }
}

impl From<f64> for Input {
    fn from(x: f64) -> Self {
        Input::Tensor(Tensor::Scalar(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_accepts_nested_json() {
        let t = parse_strict("[[1, 2], [3, 4.5]]").unwrap();
        assert_eq!(t, Tensor::from(vec![vec![1.0, 2.0], vec![3.0, 4.5]]));
    }

    #[test]
    fn test_strict_accepts_whitespace_list() {
        let t = parse_strict("  1 2.5   -3 ").unwrap();
        assert_eq!(t, Tensor::from(vec![1.0, 2.5, -3.0]));
    }

    #[test]
    fn test_strict_bare_number() {
        assert_eq!(parse_strict("42").unwrap(), Tensor::Scalar(42.0));
    }

    #[test]
    fn test_strict_diagnostics() {
        assert_eq!(parse_strict("   "), Err(ParseDiagnostic::Empty));
        assert!(matches!(parse_strict("[1, 2"), Err(ParseDiagnostic::Syntax(_))));
        assert_eq!(
            parse_strict("[1, \"a\"]"),
            Err(ParseDiagnostic::NonNumericLeaf {
                path: "$[1]".into()
            })
        );
        assert_eq!(
            parse_strict("1 x 3"),
            Err(ParseDiagnostic::BadToken {
                token: "x".into(),
                position: 1
            })
        );
    }

    #[test]
    fn test_lenient_coerces_leaves() {
        let t = parse_lenient("[1, \"2\", \"abc\", null, true]");
        assert_eq!(t, Tensor::from(vec![1.0, 2.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_lenient_whitespace_fallback() {
        assert_eq!(parse_lenient("1 abc 3"), Tensor::from(vec![1.0, 0.0, 3.0]));
        assert_eq!(parse_lenient(""), Tensor::empty());
    }

    #[test]
    fn test_parse_vector_flattens_one_level() {
        assert_eq!(parse_vector("[[1, 2], [3, [4]]]"), vec![1.0, 2.0, 3.0, 0.0]);
        assert_eq!(parse_vector("5"), vec![5.0]);
        assert_eq!(parse_vector(""), Vec::<f64>::new());
    }

    #[test]
    fn test_input_number_or() {
        assert_eq!(Input::from("").number_or(0.01), 0.01);
        assert_eq!(Input::from("0").number_or(1.0), 1.0);
        assert_eq!(Input::from("abc").number_or(8.0), 8.0);
        assert_eq!(Input::from(" 0.5 ").number_or(1.0), 0.5);
        assert_eq!(Input::from(3.0).number_or(1.0), 3.0);
        assert_eq!(Input::from(Tensor::from(vec![4.0])).number_or(1.0), 4.0);
    }

    #[test]
    fn test_input_structured_passthrough() {
        let t = Tensor::from(vec![vec![1.0], vec![2.0]]);
        assert_eq!(Input::from(t.clone()).to_tensor(), t);
        assert_eq!(Input::from(t).to_vector(), vec![1.0, 2.0]);
    }
}
