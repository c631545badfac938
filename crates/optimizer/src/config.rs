// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Optimizer selection and hyperparameters.

use crate::OptimizerState;
use serde_json::Value;

pub const DEFAULT_BETA1: f64 = 0.9;
pub const DEFAULT_BETA2: f64 = 0.999;
/// Allowed range for Adam's decay rates.
pub const BETA_RANGE: (f64, f64) = (0.01, 0.999);

/// The update rule to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OptimizerKind {
    #[default]
    Sgd,
    Adam,
}

impl OptimizerKind {
    /// Parses an optimizer name (case-insensitive).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "SGD" => Some(Self::Sgd),
            "ADAM" => Some(Self::Adam),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sgd => "SGD",
            Self::Adam => "Adam",
        }
    }
}

impl std::fmt::Display for OptimizerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hyperparameters and incoming state for one update.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerConfig {
    /// Adam first-moment decay, in `[0.01, 0.999]`.
    pub beta1: f64,
    /// Adam second-moment decay, in `[0.01, 0.999]`.
    pub beta2: f64,
    /// State returned by the previous call for the same parameters.
    pub state: OptimizerState,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            beta1: DEFAULT_BETA1,
            beta2: DEFAULT_BETA2,
            state: OptimizerState::None,
        }
    }
}

impl OptimizerConfig {
    /// Reads `{beta1, beta2, state}` leniently.
    ///
    /// Missing, zero or non-numeric fields take their defaults; numbers
    /// given as strings are accepted; values are clamped into range. A
    /// non-object yields the default configuration.
    pub fn from_json(value: &Value) -> Self {
        let Value::Object(obj) = value else {
            return Self::default();
        };
        let (lo, hi) = BETA_RANGE;
        Self {
            beta1: field_or(obj.get("beta1"), DEFAULT_BETA1).clamp(lo, hi),
            beta2: field_or(obj.get("beta2"), DEFAULT_BETA2).clamp(lo, hi),
            state: obj
                .get("state")
                .map(OptimizerState::from_json)
                .unwrap_or_default(),
        }
    }

    /// Parses the configuration from JSON text. Text that is not a JSON
    /// object yields the default configuration.
    pub fn from_text(text: &str) -> Self {
        serde_json::from_str::<Value>(text)
            .map(|v| Self::from_json(&v))
            .unwrap_or_default()
    }

    pub fn with_state(mut self, state: OptimizerState) -> Self {
        self.state = state;
        self
    }
}

fn field_or(value: Option<&Value>, default: f64) -> f64 {
    let x = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match x {
        Some(x) if x != 0.0 && !x.is_nan() => x,
        _ => default,
    }
}
