// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Closed menu enumerations accepted by mode arguments.
//!
//! Each menu takes its English name or the Chinese label shown in the block
//! menus. Lookup and match modes live with their operations in `encoding`;
//! the optimizer kind lives in `optimizer`.

pub use encoding::{LookupMode, MatchMode};
pub use optimizer::OptimizerKind;

/// Operation selector for `tensor_op`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TensorOpMode {
    Add,
    Multiply,
}

impl TensorOpMode {
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "add" | "+" | "加法" => Some(Self::Add),
            "multiply" | "mul" | "matmul" | "*" | "乘法" => Some(Self::Multiply),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Multiply => "multiply",
        }
    }
}

/// Mode selector for `merge_split`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeMode {
    Merge,
    Split,
}

impl MergeMode {
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "merge" | "合并" => Some(Self::Merge),
            "split" | "拆分" => Some(Self::Split),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Merge => "merge",
            Self::Split => "split",
        }
    }
}

/// Mode selector for `shell`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShellMode {
    AddShell,
    RemoveShell,
}

impl ShellMode {
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "add" | "add_shell" | "add-shell" | "wrap" | "加壳" => Some(Self::AddShell),
            "remove" | "remove_shell" | "remove-shell" | "unwrap" | "拆壳" => {
                Some(Self::RemoveShell)
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddShell => "add-shell",
            Self::RemoveShell => "remove-shell",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tensor_op_labels() {
        assert_eq!(TensorOpMode::from_str_loose("加法"), Some(TensorOpMode::Add));
        assert_eq!(TensorOpMode::from_str_loose("Multiply"), Some(TensorOpMode::Multiply));
        assert_eq!(TensorOpMode::from_str_loose("divide"), None);
    }

    #[test]
    fn test_merge_labels() {
        assert_eq!(MergeMode::from_str_loose("拆分"), Some(MergeMode::Split));
        assert_eq!(MergeMode::from_str_loose(" merge "), Some(MergeMode::Merge));
        assert_eq!(MergeMode::from_str_loose(""), None);
    }

    #[test]
    fn test_shell_labels() {
        assert_eq!(ShellMode::from_str_loose("加壳"), Some(ShellMode::AddShell));
        assert_eq!(ShellMode::from_str_loose("remove-shell"), Some(ShellMode::RemoveShell));
        assert_eq!(ShellMode::AddShell.as_str(), "add-shell");
    }
}
