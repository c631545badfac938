// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The call-by-name runtime.
//!
//! ```text
//! name ──► OpCode ──► arity check ──► dispatch::execute ──► canonical text
//!                                         │ Err / panic
//!                                         ▼
//!                                   operation sentinel
//! ```
//!
//! [`Runtime::call`] never fails: any error, and any panic inside an
//! operation, degrades to the operation's documented sentinel.
//! [`Runtime::call_detailed`] returns the same text together with the
//! structured error, for callers that can use it.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tensor_core::Input;

use crate::dispatch::{self, CallContext};
use crate::opcode::Sentinel;
use crate::{CallMetrics, OpCode, RuntimeConfig, RuntimeError};

/// Letters the host editor uses for positional parameters.
const POSITIONAL_LETTERS: [&str; 5] = ["A", "B", "C", "D", "E"];

// ── Call outcome ───────────────────────────────────────────────

/// Everything known about one finished call.
#[derive(Debug)]
pub struct CallOutcome {
    /// The resolved operation, `None` if the name was not recognised.
    pub op: Option<OpCode>,
    /// Result text, or the sentinel when `error` is set.
    pub text: String,
    pub error: Option<RuntimeError>,
    pub duration: Duration,
}

impl CallOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

// ── Runtime ────────────────────────────────────────────────────

/// Dispatches named operations over loosely-typed arguments.
///
/// A `Runtime` is `Send + Sync`; share it behind an [`Arc`] to call it
/// from several threads or from async code.
///
/// # Example
/// ```
/// use runtime::{Runtime, RuntimeConfig};
///
/// let rt = Runtime::new(RuntimeConfig::deterministic(1));
/// assert_eq!(rt.call("vec_mat", &["[1, 2]".into(), "[1, 2, 3, 4]".into()]), "[7,10]");
/// assert_eq!(rt.call("dot", &["[1, 2]".into(), "[1]".into()]), "0");
/// ```
pub struct Runtime {
    config: RuntimeConfig,
    rng: Mutex<StdRng>,
    metrics: Mutex<CallMetrics>,
}

impl Runtime {
    pub fn new(config: RuntimeConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        tracing::info!(
            operations = OpCode::ALL.len(),
            seeded = config.seed.is_some(),
            parallel = config.parallel.enabled,
            "runtime created"
        );
        Self {
            config,
            rng: Mutex::new(rng),
            metrics: Mutex::new(CallMetrics::new()),
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Calls an operation by name (or block opcode) and returns
    /// its result text, or its sentinel on any failure. An unknown name
    /// returns `"[]"`.
    pub fn call(&self, name: &str, args: &[Input]) -> String {
        self.call_detailed(name, args).text
    }

    /// Like [`Runtime::call`], also reporting the error and duration.
    pub fn call_detailed(&self, name: &str, args: &[Input]) -> CallOutcome {
        let start = Instant::now();
        let Some(op) = OpCode::from_str_loose(name) else {
            tracing::warn!(name, "unknown operation");
            return CallOutcome {
                op: None,
                text: Sentinel::EmptyArray.text(""),
                error: Some(RuntimeError::UnknownOperation(name.to_string())),
                duration: start.elapsed(),
            };
        };

        let result = self.run(op, args);
        let duration = start.elapsed();
        tracing::debug!(op = op.name(), arity = args.len(), ?duration, "call finished");

        let (text, error) = match result {
            Ok(text) => (text, None),
            Err(e) => {
                let input = args.first().map(|a| a.as_text()).unwrap_or_default();
                tracing::warn!(op = op.name(), error = %e, "falling back to sentinel");
                (op.sentinel().text(&input), Some(e))
            }
        };

        if self.config.enable_metrics {
            self.metrics
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .record(op.name(), duration, error.is_none());
        }

        CallOutcome {
            op: Some(op),
            text,
            error,
            duration,
        }
    }

    /// Calls an operation with arguments keyed by parameter name
    /// (`"vector"`, `"matrix"`, ...) or by position letter (`"A"`, `"B"`,
    /// ...). Absent parameters read as empty text.
    pub fn call_named(&self, name: &str, args: &HashMap<String, Input>) -> CallOutcome {
        let Some(op) = OpCode::from_str_loose(name) else {
            return self.call_detailed(name, &[]);
        };

        let params = op.params();
        let known = |key: &str| {
            params.iter().any(|p| *p == key)
                || POSITIONAL_LETTERS[..params.len()].iter().any(|l| *l == key)
        };
        if let Some(stray) = args.keys().find(|k| !known(k.as_str())) {
            let error = RuntimeError::InvalidArgument {
                op: op.name(),
                detail: format!("unknown parameter '{stray}'"),
            };
            tracing::warn!(op = op.name(), error = %error, "falling back to sentinel");
            return CallOutcome {
                op: Some(op),
                text: op.sentinel().text(""),
                error: Some(error),
                duration: Duration::ZERO,
            };
        }

        let positional: Vec<Input> = params
            .iter()
            .zip(POSITIONAL_LETTERS)
            .map(|(param, letter)| {
                args.get(*param)
                    .or_else(|| args.get(letter))
                    .cloned()
                    .unwrap_or_else(|| Input::Text(String::new()))
            })
            .collect();
        self.call_detailed(name, &positional)
    }

    /// Runs a call on tokio's blocking pool.
    ///
    /// # Errors
    /// Only [`RuntimeError::Task`], when the blocking task itself could not
    /// complete. Operation failures still come back as sentinel text.
    pub async fn call_async(
        self: &Arc<Self>,
        name: String,
        args: Vec<Input>,
    ) -> Result<String, RuntimeError> {
        let rt = Arc::clone(self);
        tokio::task::spawn_blocking(move || rt.call(&name, &args))
            .await
            .map_err(|e| RuntimeError::Task(e.to_string()))
    }

    /// A snapshot of the call metrics.
    pub fn metrics(&self) -> CallMetrics {
        self.metrics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn reset_metrics(&self) {
        *self.metrics.lock().unwrap_or_else(PoisonError::into_inner) = CallMetrics::new();
    }

    // ── Private helpers ────────────────────────────────────────

    fn run(&self, op: OpCode, args: &[Input]) -> Result<String, RuntimeError> {
        if args.len() > op.arity() {
            return Err(RuntimeError::Arity {
                op: op.name(),
                expected: op.arity(),
                actual: args.len(),
            });
        }
        let ctx = CallContext::new(&self.rng, &self.config.parallel);
        panic::catch_unwind(AssertUnwindSafe(|| dispatch::execute(op, args, &ctx))).unwrap_or_else(
            |payload| {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".into());
                tracing::warn!(op = op.name(), %message, "operation panicked");
                Err(RuntimeError::Panicked {
                    op: op.name(),
                    message,
                })
            },
        )
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(RuntimeConfig::default())
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("seed", &self.config.seed)
            .field("enable_metrics", &self.config.enable_metrics)
            .field("parallel", &self.config.parallel.enabled)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rt() -> Runtime {
        Runtime::new(RuntimeConfig::deterministic(42))
    }

    fn texts(args: &[&str]) -> Vec<Input> {
        args.iter().map(|s| Input::from(*s)).collect()
    }

    #[test]
    fn test_runtime_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Runtime>();
    }

    #[test]
    fn test_unknown_operation() {
        let out = rt().call_detailed("softmax", &[]);
        assert_eq!(out.text, "[]");
        assert!(out.op.is_none());
        assert!(matches!(out.error, Some(RuntimeError::UnknownOperation(_))));
    }

    #[test]
    fn test_too_many_arguments() {
        let out = rt().call_detailed("relu", &texts(&["[1]", "[2]"]));
        assert_eq!(out.text, "[]");
        assert!(matches!(
            out.error,
            Some(RuntimeError::Arity {
                op: "relu",
                expected: 1,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_find_replace_sentinel_is_input() {
        let rt = rt();
        assert_eq!(
            rt.call("find_replace", &texts(&["aXa", "a", "b", "global"])),
            "bXb"
        );
    }

    #[test]
    fn test_named_arguments() {
        let rt = rt();
        let mut args = HashMap::new();
        args.insert("vector".to_string(), Input::from("[1, 2]"));
        args.insert("B".to_string(), Input::from("[1, 2, 3, 4]"));
        let out = rt.call_named("vec_mat", &args);
        assert_eq!(out.text, "[7,10]");
        assert!(out.is_ok());

        args.insert("bogus".to_string(), Input::from("1"));
        let out = rt.call_named("vec_mat", &args);
        assert_eq!(out.text, "[]");
        assert!(matches!(out.error, Some(RuntimeError::InvalidArgument { .. })));
    }

    #[test]
    fn test_metrics_recorded() {
        let rt = rt();
        rt.call("relu", &texts(&["[-1, 2]"]));
        rt.call("dot", &texts(&["[1]", "[1, 2]"]));
        let m = rt.metrics();
        assert_eq!(m.total_calls(), 2);
        assert_eq!(m.total_failures(), 1);
        assert_eq!(m.get("dot").map(|s| s.failures), Some(1));

        rt.reset_metrics();
        assert_eq!(rt.metrics().total_calls(), 0);
    }

    #[test]
    fn test_metrics_disabled() {
        let config = RuntimeConfig {
            enable_metrics: false,
            ..RuntimeConfig::deterministic(1)
        };
        let rt = Runtime::new(config);
        rt.call("relu", &texts(&["[1]"]));
        assert_eq!(rt.metrics().total_calls(), 0);
    }
}
