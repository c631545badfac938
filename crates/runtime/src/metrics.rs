// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Per-operation call metrics.
//!
//! [`CallMetrics`] counts calls, sentinel fallbacks and time spent for each
//! operation name. Operations are kept in name order so summaries are
//! stable.

use std::collections::BTreeMap;
use std::time::Duration;

/// Counters for a single operation.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct OperationStats {
    /// Completed calls, successful or not.
    pub calls: u64,
    /// Calls that returned their sentinel.
    pub failures: u64,
    /// Wall-clock time across all calls.
    pub total_duration: Duration,
    /// Slowest single call.
    pub max_duration: Duration,
}

impl OperationStats {
    /// Mean call duration, zero before the first call.
    pub fn mean_duration(&self) -> Duration {
        if self.calls == 0 {
            return Duration::ZERO;
        }
        self.total_duration / u32::try_from(self.calls).unwrap_or(u32::MAX)
    }
}

/// Aggregate metrics for every operation a runtime has served.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct CallMetrics {
    operations: BTreeMap<&'static str, OperationStats>,
}

impl CallMetrics {
    /// Creates an empty metrics container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one finished call.
    pub fn record(&mut self, op: &'static str, duration: Duration, ok: bool) {
        let stats = self.operations.entry(op).or_default();
        stats.calls += 1;
        if !ok {
            stats.failures += 1;
        }
        stats.total_duration += duration;
        if duration > stats.max_duration {
            stats.max_duration = duration;
        }
    }

    /// Stats for one operation, if it has been called.
    pub fn get(&self, op: &str) -> Option<&OperationStats> {
        self.operations.get(op)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &OperationStats)> + '_ {
        self.operations.iter().map(|(name, stats)| (*name, stats))
    }

    pub fn total_calls(&self) -> u64 {
        self.operations.values().map(|s| s.calls).sum()
    }

    pub fn total_failures(&self) -> u64 {
        self.operations.values().map(|s| s.failures).sum()
    }

    /// Returns a human-readable summary suitable for CLI output.
    pub fn summary(&self) -> String {
        let total: Duration = self.operations.values().map(|s| s.total_duration).sum();
        format!(
            "Calls: {} across {} operations, {} fell back to sentinel, {:.3}ms total",
            self.total_calls(),
            self.operations.len(),
            self.total_failures(),
            total.as_secs_f64() * 1000.0,
        )
    }
}
