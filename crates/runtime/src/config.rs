// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Runtime configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! seed = 42
//! enable_metrics = true
//!
//! [parallel]
//! enabled = true
//! min_outputs = 100
//! max_threads = 8
//! timeout_ms = 1000
//! ```

use std::path::Path;
use tensor_core::ops::ParallelConfig;

/// Configuration for the operation runtime.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RuntimeConfig {
    /// Seed for the generator behind dropout and random variation.
    /// `None` seeds from the operating system.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Whether to keep per-operation call counters and timings.
    #[serde(default = "default_true")]
    pub enable_metrics: bool,
    /// Fan-out settings for the vector-matrix and contraction products.
    #[serde(default)]
    pub parallel: ParallelConfig,
}

fn default_true() -> bool {
    true
}

impl RuntimeConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, super::RuntimeError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            super::RuntimeError::ConfigError(format!(
                "cannot read config '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, super::RuntimeError> {
        toml::from_str(toml_str).map_err(|e| {
            super::RuntimeError::ConfigError(format!("TOML parse error: {e}"))
        })
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, super::RuntimeError> {
        toml::to_string_pretty(self).map_err(|e| {
            super::RuntimeError::ConfigError(format!("TOML serialise error: {e}"))
        })
    }

    /// A configuration with a fixed seed and no fan-out, for reproducible
    /// runs.
    pub fn deterministic(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            enable_metrics: true,
            parallel: ParallelConfig::sequential(),
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            seed: None,
            enable_metrics: true,
            parallel: ParallelConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let c = RuntimeConfig::default();
        assert_eq!(c.seed, None);
        assert!(c.enable_metrics);
        assert!(c.parallel.enabled);
        assert_eq!(c.parallel.min_outputs, 100);
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
seed = 7
enable_metrics = false

[parallel]
enabled = false
max_threads = 2
timeout_ms = 50
"#;
        let c = RuntimeConfig::from_toml(toml).unwrap();
        assert_eq!(c.seed, Some(7));
        assert!(!c.enable_metrics);
        assert!(!c.parallel.enabled);
        assert_eq!(c.parallel.max_threads, Some(2));
        assert_eq!(c.parallel.timeout_ms, 50);
        // unspecified fields keep their defaults
        assert_eq!(c.parallel.min_outputs, 100);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(RuntimeConfig::from_toml("").unwrap(), RuntimeConfig::default());
    }

    #[test]
    fn test_to_toml_roundtrip() {
        let c = RuntimeConfig::deterministic(42);
        let toml = c.to_toml().unwrap();
        let back = RuntimeConfig::from_toml(&toml).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_bad_toml() {
        let err = RuntimeConfig::from_toml("seed = \"many\"").unwrap_err();
        assert!(matches!(err, crate::RuntimeError::ConfigError(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = RuntimeConfig::from_file(Path::new("/nonexistent/deepblue.toml")).unwrap_err();
        assert!(err.to_string().contains("cannot read config"));
    }
}
