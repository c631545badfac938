// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Optimizer state threaded between calls.
//!
//! Serialized forms:
//! - `None` → `null`
//! - `Adam` → `{"m": [...], "v": [...], "t": 3}`

use serde_json::Value;
use tensor_core::canonical;

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
#[serde(untagged)]
pub enum OptimizerState {
    /// First and second moment estimates plus the step counter (≥ 1).
    Adam {
        #[serde(serialize_with = "canonical::serialize_numbers")]
        m: Vec<f64>,
        #[serde(serialize_with = "canonical::serialize_numbers")]
        v: Vec<f64>,
        t: u64,
    },
    /// No persisted state.
    #[default]
    None,
}

impl OptimizerState {
    /// Reads a state object leniently.
    ///
    /// An object with `m` or `v` is Adam state (missing buffers become
    /// empty, a missing or invalid `t` becomes 0); anything else is `None`.
    /// Non-numeric buffer entries read as 0.
    pub fn from_json(value: &Value) -> Self {
        let Value::Object(obj) = value else {
            return Self::None;
        };
        if obj.contains_key("m") || obj.contains_key("v") {
            let t = obj
                .get("t")
                .and_then(Value::as_f64)
                .filter(|t| t.is_finite() && *t > 0.0)
                .map_or(0, |t| t as u64);
            return Self::Adam {
                m: numbers(obj.get("m")),
                v: numbers(obj.get("v")),
                t,
            };
        }
        Self::None
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Adam { .. } => "adam",
            Self::None => "none",
        }
    }
}

fn numbers(value: Option<&Value>) -> Vec<f64> {
    match value {
        Some(Value::Array(items)) => items.iter().map(|x| x.as_f64().unwrap_or(0.0)).collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_forms() {
        assert_eq!(serde_json::to_string(&OptimizerState::None).unwrap(), "null");
        let adam = OptimizerState::Adam {
            m: vec![0.5],
            v: vec![1.0],
            t: 2,
        };
        assert_eq!(
            serde_json::to_string(&adam).unwrap(),
            r#"{"m":[0.5],"v":[1],"t":2}"#
        );
    }

    #[test]
    fn test_from_json_round_trip() {
        let adam = OptimizerState::Adam {
            m: vec![0.1, 0.2],
            v: vec![0.3, 0.4],
            t: 5,
        };
        let value = serde_json::to_value(&adam).unwrap();
        assert_eq!(OptimizerState::from_json(&value), adam);
    }

    #[test]
    fn test_from_json_lenient() {
        assert_eq!(OptimizerState::from_json(&json!(null)), OptimizerState::None);
        assert_eq!(OptimizerState::from_json(&json!([1, 2])), OptimizerState::None);
        assert_eq!(
            OptimizerState::from_json(&json!({"m": [1, "x"]})),
            OptimizerState::Adam {
                m: vec![1.0, 0.0],
                v: vec![],
                t: 0
            }
        );
        assert_eq!(
            OptimizerState::from_json(&json!({"momentum_buffer": [2]})),
            OptimizerState::None
        );
    }
}
