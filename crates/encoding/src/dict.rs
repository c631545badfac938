// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Dictionary conversion and lookup.
//!
//! A dictionary is a JSON object with string keys. Conversions keep the
//! object's insertion order.

use serde_json::{Map, Value};
use tensor_core::canonical;

use crate::EncodingError;

pub type Dictionary = Map<String, Value>;

/// Direction of a [`dict_lookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LookupMode {
    #[default]
    KeyToValue,
    ValueToKey,
}

impl LookupMode {
    /// Accepts `0`/`1`, English names and the Chinese menu labels.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "0" | "key" | "key_to_value" | "键找值" => Some(Self::KeyToValue),
            "1" | "value" | "value_to_key" | "值找键" => Some(Self::ValueToKey),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KeyToValue => "key_to_value",
            Self::ValueToKey => "value_to_key",
        }
    }
}

// ── Parsing ────────────────────────────────────────────────────

/// Parses a key or value list leniently.
///
/// JSON text is taken as is. Otherwise a `[a, b, c]` literal is split on
/// commas, and anything else on whitespace; numeric tokens become numbers
/// and the rest stay strings.
pub fn parse_loose_list(text: &str) -> Value {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return value;
    }
    let trimmed = text.trim();
    let tokens: Vec<Value> = match trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        Some(inner) => inner.split(',').map(|t| token_value(t.trim())).collect(),
        None => trimmed.split_whitespace().map(token_value).collect(),
    };
    Value::Array(tokens)
}

/// Parses a dictionary leniently.
///
/// JSON text is taken as is. Otherwise a `{k: v, ...}` literal is split on
/// commas and colons, with numeric values converted to numbers. Text in
/// neither form is an empty dictionary.
pub fn parse_loose_dict(text: &str) -> Value {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return value;
    }
    let trimmed = text.trim();
    let Some(inner) = trimmed
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
    else {
        return Value::Object(Map::new());
    };
    let mut dict = Map::new();
    for pair in inner.split(',') {
        let mut parts = pair.split(':').map(str::trim);
        let key = parts.next().unwrap_or_default().to_string();
        let value = match parts.next() {
            Some("") => number_value(0.0),
            Some(v) => token_value(v),
            None => Value::Null,
        };
        dict.insert(key, value);
    }
    Value::Object(dict)
}

fn token_value(token: &str) -> Value {
    match token.parse::<f64>() {
        Ok(x) if !token.is_empty() && x.is_finite() => number_value(x),
        _ => Value::String(token.to_string()),
    }
}

fn number_value(x: f64) -> Value {
    serde_json::to_value(canonical::Number(x)).unwrap_or(Value::Null)
}

/// The text a value takes when used as an object key.
fn key_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n
            .as_f64()
            .map(canonical::format_number)
            .unwrap_or_else(|| n.to_string()),
        other => other.to_string(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ── Operations ─────────────────────────────────────────────────

/// Zips keys with values up to the shorter length. A repeated key keeps its
/// first position and its last value.
pub fn array_to_dict(keys: &Value, values: &Value) -> Result<Dictionary, EncodingError> {
    let op = "array_to_dict";
    let Value::Array(keys) = keys else {
        return Err(EncodingError::NotAnArray {
            op,
            found: kind_of(keys).to_string(),
        });
    };
    let Value::Array(values) = values else {
        return Err(EncodingError::NotAnArray {
            op,
            found: kind_of(values).to_string(),
        });
    };
    if keys.is_empty() || values.is_empty() {
        return Err(EncodingError::Empty { op });
    }
    Ok(keys
        .iter()
        .zip(values)
        .map(|(k, v)| (key_text(k), v.clone()))
        .collect())
}

/// Flattens a dictionary to `[[keys...], [values...]]`.
pub fn dict_to_array(dict: &Value) -> Result<Value, EncodingError> {
    let Value::Object(map) = dict else {
        return Err(EncodingError::NotAnObject {
            op: "dict_to_array",
            found: kind_of(dict).to_string(),
        });
    };
    let keys: Vec<Value> = map.keys().cloned().map(Value::String).collect();
    let values: Vec<Value> = map.values().cloned().collect();
    Ok(Value::Array(vec![Value::Array(keys), Value::Array(values)]))
}

/// Looks `needle` up in `dict`.
///
/// Key-to-value returns the stored value, or `None` when the key is absent.
/// Value-to-key returns every key whose value is the string `needle`;
/// numbers never match.
pub fn dict_lookup(
    dict: &Value,
    needle: &str,
    mode: LookupMode,
) -> Result<Option<Value>, EncodingError> {
    let Value::Object(map) = dict else {
        return Err(EncodingError::NotAnObject {
            op: "dict_lookup",
            found: kind_of(dict).to_string(),
        });
    };
    Ok(match mode {
        LookupMode::KeyToValue => map.get(needle).cloned(),
        LookupMode::ValueToKey => Some(Value::Array(
            map.iter()
                .filter(|(_, v)| v.as_str() == Some(needle))
                .map(|(k, _)| Value::String(k.clone()))
                .collect(),
        )),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_loose_list_forms() {
        assert_eq!(parse_loose_list(r#"["a", 1]"#), json!(["a", 1]));
        assert_eq!(parse_loose_list("[a, 2, b]"), json!(["a", 2, "b"]));
        assert_eq!(parse_loose_list("x 1.5 y"), json!(["x", 1.5, "y"]));
    }

    #[test]
    fn test_array_to_dict_zips_shorter() {
        let d = array_to_dict(&json!(["a", "b", "c"]), &json!([1, 2])).unwrap();
        assert_eq!(Value::Object(d), json!({"a": 1, "b": 2}));
    }

    #[test]
    fn test_array_to_dict_numeric_keys() {
        let d = array_to_dict(&json!([1, 2.5]), &json!(["x", "y"])).unwrap();
        let keys: Vec<&String> = d.keys().collect();
        assert_eq!(keys, vec!["1", "2.5"]);
    }

    #[test]
    fn test_array_to_dict_repeated_key() {
        let d = array_to_dict(&json!(["k", "j", "k"]), &json!([1, 2, 3])).unwrap();
        assert_eq!(serde_json::to_string(&d).unwrap(), r#"{"k":3,"j":2}"#);
    }

    #[test]
    fn test_array_to_dict_rejects_non_arrays() {
        assert!(matches!(
            array_to_dict(&json!(5), &json!([1])),
            Err(EncodingError::NotAnArray { .. })
        ));
        assert_eq!(
            array_to_dict(&json!([]), &json!([1])),
            Err(EncodingError::Empty { op: "array_to_dict" })
        );
    }

    #[test]
    fn test_dict_to_array_keeps_order() {
        let out = dict_to_array(&parse_loose_dict(r#"{"z": 1, "a": [2]}"#)).unwrap();
        assert_eq!(out, json!([["z", "a"], [1, [2]]]));
    }

    #[test]
    fn test_loose_dict_literal() {
        let d = parse_loose_dict("{a: 1, b: two}");
        assert_eq!(d, json!({"a": 1, "b": "two"}));
        assert_eq!(parse_loose_dict("nonsense"), json!({}));
    }

    #[test]
    fn test_dict_to_array_non_object() {
        assert!(dict_to_array(&json!([1, 2])).is_err());
    }

    #[test]
    fn test_lookup_key_to_value() {
        let d = json!({"a": [1, 2], "b": "x"});
        assert_eq!(
            dict_lookup(&d, "a", LookupMode::KeyToValue).unwrap(),
            Some(json!([1, 2]))
        );
        assert_eq!(dict_lookup(&d, "zz", LookupMode::KeyToValue).unwrap(), None);
    }

    #[test]
    fn test_lookup_value_to_key_strings_only() {
        let d = json!({"a": "1", "b": 1, "c": "1"});
        assert_eq!(
            dict_lookup(&d, "1", LookupMode::ValueToKey).unwrap(),
            Some(json!(["a", "c"]))
        );
    }

    #[test]
    fn test_lookup_mode_labels() {
        assert_eq!(LookupMode::from_str_loose("值找键"), Some(LookupMode::ValueToKey));
        assert_eq!(LookupMode::from_str_loose("0"), Some(LookupMode::KeyToValue));
        assert_eq!(LookupMode::from_str_loose("sideways"), None);
    }
}
