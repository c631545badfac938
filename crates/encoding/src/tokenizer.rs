// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Character-level tokenization.

/// Splits `text` into one token per Unicode scalar value.
pub fn char_tokenize(text: &str) -> Vec<String> {
    text.chars().map(String::from).collect()
}

/// Tokenizes and renders as a JSON array of strings.
pub fn char_tokenize_json(text: &str) -> String {
    serde_json::to_string(&char_tokenize(text)).unwrap_or_else(|_| String::from("[]"))
}
