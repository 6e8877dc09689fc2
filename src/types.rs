// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The records and maps that make up a sharded book index.
//!
//! # Invariants
//!
//! - **IsbnIndex**: an ISBN lives in exactly one shard, `isbn_shard(isbn)`.
//! - **WordIndex**: a word lives in exactly one shard, `word_shard(word)`, and
//!   each (word, ISBN) pair is stored once. The set type does the dedup.
//!
//! Both maps are built by the aggregator alone and are read-only afterwards.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// What the ISBN index stores per book.
///
/// Field names are shortened on disk (`n`, `u`) because every ISBN shard
/// repeats them once per book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookEntry {
    #[serde(rename = "n")]
    pub title: String,
    #[serde(rename = "u")]
    pub url: String,
}

impl BookEntry {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// One accepted record travelling from a reader to the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    pub isbn: String,
    pub entry: BookEntry,
}

/// ISBN → book, for a single shard.
pub type IsbnShard = HashMap<String, BookEntry>;

/// Shard id → ISBN shard.
pub type IsbnIndex = HashMap<String, IsbnShard>;

/// Normalized word → ISBNs whose title contains it, for a single shard.
pub type WordShard = HashMap<String, HashSet<String>>;

/// Shard id → word shard.
pub type WordIndex = HashMap<String, WordShard>;
