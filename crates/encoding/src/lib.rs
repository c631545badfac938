// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # encoding
//!
//! Encoding helpers that sit beside the numeric library:
//!
//! - [`onehot`]: basic, batched, label-smoothed and multi-label one-hot
//!   encoding, and argmax decoding.
//! - [`tokenizer`]: splitting text into single characters.
//! - [`dict`]: building dictionaries from key/value arrays, flattening them
//!   back to `[[keys], [values]]`, and looking entries up in either
//!   direction.
//! - [`text`]: find-and-replace with global or single matching.
//!
//! Dictionaries are `serde_json` maps, so iteration order is insertion
//! order.

pub mod dict;
mod error;
pub mod onehot;
pub mod text;
pub mod tokenizer;

pub use dict::LookupMode;
pub use error::EncodingError;
pub use onehot::DecodeMode;
pub use text::MatchMode;
