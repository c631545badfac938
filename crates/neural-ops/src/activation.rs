// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Elementwise activation functions.

use tensor_core::Tensor;

/// Supported activation functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Activation {
    /// `max(x, 0)`
    Relu,
    /// `x` for positive inputs, `e^x - 1` otherwise (unit alpha).
    Elu,
    /// `x · σ(x)` (unit beta).
    Swish,
    /// `1 / (1 + e^-x)`
    Sigmoid,
}

impl Activation {
    /// Parses an activation name (case-insensitive).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "relu" => Some(Self::Relu),
            "elu" => Some(Self::Elu),
            "swish" | "silu" => Some(Self::Swish),
            "sigmoid" | "logistic" => Some(Self::Sigmoid),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relu => "relu",
            Self::Elu => "elu",
            Self::Swish => "swish",
            Self::Sigmoid => "sigmoid",
        }
    }

    /// Applies the activation to a single value.
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Self::Relu => {
                if x > 0.0 {
                    x
                } else {
                    0.0
                }
            }
            Self::Elu => {
                if x > 0.0 {
                    x
                } else {
                    x.exp() - 1.0
                }
            }
            Self::Swish => x / (1.0 + (-x).exp()),
            Self::Sigmoid => 1.0 / (1.0 + (-x).exp()),
        }
    }

    /// Applies the activation to every leaf of `tensor`.
    pub fn apply_tensor(&self, tensor: &Tensor) -> Tensor {
        tensor.map(|x| self.apply(x))
    }
}

impl std::fmt::Display for Activation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_relu() {
        let t = Tensor::from(vec![vec![-1.0, 2.0], vec![0.0, -3.5]]);
        assert_eq!(
            Activation::Relu.apply_tensor(&t),
            Tensor::from(vec![vec![0.0, 2.0], vec![0.0, 0.0]])
        );
    }

    #[test]
    fn test_elu() {
        assert_eq!(Activation::Elu.apply(2.0), 2.0);
        assert!(approx_eq(Activation::Elu.apply(-1.0), (-1.0f64).exp() - 1.0));
        assert_eq!(Activation::Elu.apply(0.0), 0.0);
    }

    #[test]
    fn test_sigmoid_and_swish() {
        assert!(approx_eq(Activation::Sigmoid.apply(0.0), 0.5));
        assert!(approx_eq(Activation::Swish.apply(0.0), 0.0));
        let x = 1.3;
        assert!(approx_eq(
            Activation::Swish.apply(x),
            x * Activation::Sigmoid.apply(x)
        ));
    }

    #[test]
    fn test_scalar_input() {
        assert_eq!(
            Activation::Relu.apply_tensor(&Tensor::Scalar(-4.0)),
            Tensor::Scalar(0.0)
        );
    }

    #[test]
    fn test_from_str_loose() {
        assert_eq!(Activation::from_str_loose("ReLU"), Some(Activation::Relu));
        assert_eq!(Activation::from_str_loose("silu"), Some(Activation::Swish));
        assert_eq!(Activation::from_str_loose("tanh"), None);
    }
}
