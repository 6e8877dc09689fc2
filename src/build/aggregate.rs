// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The aggregator: sole owner of the in-memory index while ingest runs.
//!
//! Readers never touch the maps. They push [`BookRecord`]s onto a bounded
//! channel and a single thread drains it, so every mutation happens in one
//! place and there is nothing to lock. When the channel closes (every sender
//! dropped) the thread returns the finished [`ShardedIndex`], which is
//! read-only from then on.
//!
//! Per record:
//!
//! 1. `IsbnIndex[isbn_shard(isbn)][isbn] = entry` (last write wins)
//! 2. for each term of the title: `WordIndex[word_shard(term)][term] += isbn`
//!
//! A replaced ISBN keeps the words of its earlier title in the word index;
//! only the book entry is overwritten.

use crossbeam_channel::Receiver;
use std::collections::HashSet;
use std::thread::{self, JoinHandle};
use tracing::debug;

use crate::error::{IndexError, Result};
use crate::normalize::title_terms;
use crate::shard::{isbn_shard, word_shard};
use crate::types::{BookEntry, BookRecord, IsbnIndex, WordIndex};

/// ISBN and word indices, both keyed by shard id.
#[derive(Debug, Default, Clone)]
pub struct ShardedIndex {
    isbns: IsbnIndex,
    words: WordIndex,
    records: usize,
    duplicate_isbns: usize,
}

impl ShardedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one book to both indices.
    pub fn insert(&mut self, isbn: String, entry: BookEntry) {
        self.records += 1;

        for term in title_terms(&entry.title) {
            let shard_id = word_shard(&term).to_string();
            self.words
                .entry(shard_id)
                .or_default()
                .entry(term)
                .or_default()
                .insert(isbn.clone());
        }

        let previous = self
            .isbns
            .entry(isbn_shard(&isbn).to_string())
            .or_default()
            .insert(isbn, entry);
        if previous.is_some() {
            self.duplicate_isbns += 1;
        }
    }

    pub fn insert_record(&mut self, record: BookRecord) {
        self.insert(record.isbn, record.entry);
    }

    pub fn isbns(&self) -> &IsbnIndex {
        &self.isbns
    }

    pub fn words(&self) -> &WordIndex {
        &self.words
    }

    /// Look up a book the same way a reader of the shard files would.
    pub fn book(&self, isbn: &str) -> Option<&BookEntry> {
        self.isbns.get(isbn_shard(isbn))?.get(isbn)
    }

    /// ISBNs indexed under a normalized word.
    pub fn isbns_for_word(&self, word: &str) -> Option<&HashSet<String>> {
        self.words.get(word_shard(word))?.get(word)
    }

    pub fn isbn_count(&self) -> usize {
        self.isbns.values().map(|shard| shard.len()).sum()
    }

    pub fn word_count(&self) -> usize {
        self.words.values().map(|shard| shard.len()).sum()
    }

    pub fn isbn_shard_count(&self) -> usize {
        self.isbns.len()
    }

    pub fn word_shard_count(&self) -> usize {
        self.words.len()
    }

    /// Records received, including ones that replaced an earlier ISBN.
    pub fn records(&self) -> usize {
        self.records
    }

    pub fn duplicate_isbns(&self) -> usize {
        self.duplicate_isbns
    }

    pub fn is_empty(&self) -> bool {
        self.isbns.is_empty()
    }
}

/// Drain `receiver` until it is closed and empty, building the index.
pub fn drain(receiver: Receiver<BookRecord>) -> ShardedIndex {
    let mut index = ShardedIndex::new();
    for record in receiver.iter() {
        index.insert_record(record);
    }
    debug!(
        records = index.records(),
        isbns = index.isbn_count(),
        words = index.word_count(),
        "aggregator drained"
    );
    index
}

/// Start the aggregator on its own thread.
///
/// Join the handle after every sender is dropped to get the index back.
pub fn spawn(receiver: Receiver<BookRecord>) -> Result<JoinHandle<ShardedIndex>> {
    thread::Builder::new()
        .name("bookshard-aggregator".to_string())
        .spawn(move || drain(receiver))
        .map_err(IndexError::SpawnAggregator)
}
