// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Adam with bias-corrected moment estimates.

use crate::config::{BETA_RANGE, DEFAULT_BETA1, DEFAULT_BETA2};
use crate::rule::UpdateRule;
use crate::OptimizerState;

/// Added to `√v̂` to avoid division by zero.
pub const EPSILON: f64 = 1e-8;

#[derive(Debug, Clone)]
pub struct Adam {
    beta1: f64,
    beta2: f64,
}

impl Default for Adam {
    fn default() -> Self {
        Self::new(DEFAULT_BETA1, DEFAULT_BETA2)
    }
}

impl Adam {
    /// Decay rates are clamped to `[0.01, 0.999]`.
    pub fn new(beta1: f64, beta2: f64) -> Self {
        let (lo, hi) = BETA_RANGE;
        Self {
            beta1: beta1.clamp(lo, hi),
            beta2: beta2.clamp(lo, hi),
        }
    }

    pub fn betas(&self) -> (f64, f64) {
        (self.beta1, self.beta2)
    }
}

impl UpdateRule for Adam {
    fn name(&self) -> &str {
        "adam"
    }

    /// Continues from `prev` only when both moment buffers match the
    /// parameter count; otherwise starts over from zeroed moments at `t = 1`.
    fn step(
        &self,
        weights: &[f64],
        grads: &[f64],
        lr: f64,
        prev: &OptimizerState,
    ) -> (Vec<f64>, OptimizerState) {
        let n = weights.len();
        let (m_prev, v_prev, t) = match prev {
            OptimizerState::Adam { m, v, t } if m.len() == n && v.len() == n => {
                (m.clone(), v.clone(), t.saturating_add(1))
            }
            OptimizerState::Adam { m, v, .. } => {
                tracing::debug!(
                    params = n,
                    m = m.len(),
                    v = v.len(),
                    "adam state does not match parameter count; reinitialising"
                );
                (vec![0.0; n], vec![0.0; n], 1)
            }
            _ => (vec![0.0; n], vec![0.0; n], 1),
        };

        let (b1, b2) = (self.beta1, self.beta2);
        let exp = i32::try_from(t).unwrap_or(i32::MAX);
        let c1 = 1.0 - b1.powi(exp);
        let c2 = 1.0 - b2.powi(exp);

        let mut m = Vec::with_capacity(n);
        let mut v = Vec::with_capacity(n);
        let mut updated = Vec::with_capacity(n);
        for i in 0..n {
            let g = grads[i];
            let mi = b1 * m_prev[i] + (1.0 - b1) * g;
            let vi = b2 * v_prev[i] + (1.0 - b2) * g * g;
            let m_hat = mi / c1;
            let v_hat = vi / c2;
            updated.push(weights[i] - lr * m_hat / (v_hat.sqrt() + EPSILON));
            m.push(mi);
            v.push(vi);
        }
        (updated, OptimizerState::Adam { m, v, t })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_first_step_from_empty_state() {
        let (w, state) = Adam::default().step(&[1.0], &[0.1], 0.01, &OptimizerState::None);
        assert!(approx_eq(w[0], 0.99, 1e-6));
        match state {
            OptimizerState::Adam { m, v, t } => {
                assert!(approx_eq(m[0], 0.01, 1e-12));
                assert!(approx_eq(v[0], 0.00001, 1e-12));
                assert_eq!(t, 1);
            }
            other => panic!("expected adam state, got {other:?}"),
        }
    }

    #[test]
    fn test_step_counter_advances() {
        let adam = Adam::default();
        let (w1, s1) = adam.step(&[1.0, 2.0], &[0.1, 0.2], 0.01, &OptimizerState::None);
        let (_, s2) = adam.step(&w1, &[0.1, 0.2], 0.01, &s1);
        assert!(matches!(s2, OptimizerState::Adam { t: 2, .. }));
    }

    #[test]
    fn test_mismatched_state_reinitialises() {
        let stale = OptimizerState::Adam {
            m: vec![1.0; 3],
            v: vec![1.0; 3],
            t: 40,
        };
        let (w, s) = Adam::default().step(&[1.0], &[0.1], 0.01, &stale);
        assert!(approx_eq(w[0], 0.99, 1e-6));
        assert!(matches!(s, OptimizerState::Adam { t: 1, .. }));
    }

    #[test]
    fn test_betas_clamped() {
        assert_eq!(Adam::new(2.0, 0.0).betas(), (0.999, 0.01));
    }
}
