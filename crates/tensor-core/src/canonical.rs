// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Canonical text form.
//!
//! Tensors serialize as compact JSON arrays. Integral values print without
//! a fractional part (`7`, not `7.0`) and non-finite values print as
//! `null`, since JSON has no spelling for them. Standalone scalar results
//! use [`format_number`], which spells non-finite values out.

use crate::Tensor;
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;

/// Largest magnitude at which every integer is exactly representable.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A number that serializes in canonical form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Number(pub f64);

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let x = self.0;
        if x.is_finite() && x.fract() == 0.0 && x.abs() < MAX_SAFE_INTEGER {
            // -0.0 prints as 0
            serializer.serialize_i64(x as i64)
        } else if x.is_finite() {
            serializer.serialize_f64(x)
        } else {
            serializer.serialize_none()
        }
    }
}

impl Serialize for Tensor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Tensor::Scalar(x) => Number(*x).serialize(serializer),
            Tensor::Seq(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

/// `serialize_with` helper for a single numeric field.
pub fn serialize_number<S: Serializer>(x: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    Number(*x).serialize(serializer)
}

/// `serialize_with` helper for plain numeric buffers.
pub fn serialize_numbers<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(values.len()))?;
    for x in values {
        seq.serialize_element(&Number(*x))?;
    }
    seq.end()
}

/// Renders a tensor in canonical text form.
pub fn to_text(tensor: &Tensor) -> String {
    serde_json::to_string(tensor).unwrap_or_else(|_| String::from("[]"))
}

/// Renders a flat numeric vector in canonical text form.
pub fn vector_to_text(values: &[f64]) -> String {
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::new(&mut out);
    match serialize_numbers(values, &mut ser) {
        Ok(()) => String::from_utf8(out).unwrap_or_else(|_| String::from("[]")),
        Err(_) => String::from("[]"),
    }
}

/// Renders a single number as text.
///
/// Integral values have no fractional part; NaN and infinities are spelled
/// `NaN`, `Infinity` and `-Infinity`.
pub fn format_number(x: f64) -> String {
    if x.is_nan() {
        return String::from("NaN");
    }
    if x.is_infinite() {
        return String::from(if x > 0.0 { "Infinity" } else { "-Infinity" });
    }
    serde_json::to_string(&Number(x)).unwrap_or_else(|_| x.to_string())
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tensor::Scalar(x) => f.write_str(&format_number(*x)),
            Tensor::Seq(_) => f.write_str(&to_text(self)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_values_have_no_fraction() {
        let t = Tensor::from(vec![7.0, -2.0, 0.5]);
        assert_eq!(to_text(&t), "[7,-2,0.5]");
    }

    #[test]
    fn test_nested_compact() {
        let t = Tensor::from(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(to_text(&t), "[[1,2],[3,4]]");
        assert_eq!(to_text(&Tensor::empty()), "[]");
    }

    #[test]
    fn test_non_finite_in_arrays() {
        let t = Tensor::from(vec![f64::NAN, f64::INFINITY, 1.0]);
        assert_eq!(to_text(&t), "[null,null,1]");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_vector_to_text() {
        assert_eq!(vector_to_text(&[1.0, 2.5]), "[1,2.5]");
        assert_eq!(vector_to_text(&[]), "[]");
    }

    #[test]
    fn test_display_matches_canonical() {
        let t = Tensor::from(vec![1.0, 2.0]);
        assert_eq!(t.to_string(), "[1,2]");
        assert_eq!(Tensor::Scalar(1.5).to_string(), "1.5");
    }
}
