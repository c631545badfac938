// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Literal find-and-replace.

/// Which occurrences [`find_replace`] rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchMode {
    /// Every occurrence.
    Global,
    /// The first occurrence only.
    #[default]
    Single,
}

impl MatchMode {
    /// Accepts English names and the Chinese menu labels. Anything
    /// unrecognised matches a single occurrence.
    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "global" | "all" | "全局" => Self::Global,
            _ => Self::Single,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Single => "single",
        }
    }
}

/// Replaces literal occurrences of `find` in `text`.
///
/// An empty `find` matches the gaps between characters: in global mode the
/// replacement is interleaved between every pair of characters, in single
/// mode it is prefixed once.
pub fn find_replace(text: &str, find: &str, replace: &str, mode: MatchMode) -> String {
    match (mode, find.is_empty()) {
        (MatchMode::Global, false) => text.replace(find, replace),
        (MatchMode::Single, false) => text.replacen(find, replace, 1),
        (MatchMode::Global, true) => {
            let mut out = String::with_capacity(text.len() * (1 + replace.len()));
            for (i, c) in text.chars().enumerate() {
                if i > 0 {
                    out.push_str(replace);
                }
                out.push(c);
            }
            out
        }
        (MatchMode::Single, true) => format!("{replace}{text}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_and_single() {
        assert_eq!(find_replace("a-b-c", "-", "+", MatchMode::Global), "a+b+c");
        assert_eq!(find_replace("a-b-c", "-", "+", MatchMode::Single), "a+b-c");
    }

    #[test]
    fn test_no_match_returns_input() {
        assert_eq!(find_replace("abc", "x", "y", MatchMode::Global), "abc");
    }

    #[test]
    fn test_empty_find() {
        assert_eq!(find_replace("abc", "", "_", MatchMode::Global), "a_b_c");
        assert_eq!(find_replace("abc", "", "_", MatchMode::Single), "_abc");
        assert_eq!(find_replace("", "", "_", MatchMode::Global), "");
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(MatchMode::from_str_loose("全局"), MatchMode::Global);
        assert_eq!(MatchMode::from_str_loose("Global"), MatchMode::Global);
        assert_eq!(MatchMode::from_str_loose("单个"), MatchMode::Single);
        assert_eq!(MatchMode::from_str_loose(""), MatchMode::Single);
    }
}
