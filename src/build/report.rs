//! Run diagnostics.
//!
//! Per-unit failures never stop a build, so they have to go somewhere. The
//! reader pool counts into [`IngestStats`] while it runs; the orchestrator
//! folds that and the writer results into a [`BuildReport`] at the end.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::error::IndexError;

/// Counters shared by every reader in the pool.
#[derive(Debug, Default)]
pub struct IngestStats {
    files_read: AtomicUsize,
    records_sent: AtomicUsize,
    records_skipped: AtomicUsize,
    skipped_files: Mutex<Vec<IndexError>>,
}

/// Plain copy of [`IngestStats`] once the readers are done.
#[derive(Debug, Default)]
pub struct IngestSnapshot {
    pub files_read: usize,
    pub records_sent: usize,
    pub records_skipped: usize,
    pub skipped_files: Vec<IndexError>,
}

impl IngestStats {
    pub fn file_read(&self, records_sent: usize) {
        self.files_read.fetch_add(1, Ordering::Relaxed);
        self.records_sent.fetch_add(records_sent, Ordering::Relaxed);
    }

    pub fn skip_record(&self) {
        self.records_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn skip_file(&self, err: IndexError) {
        self.skipped_files.lock().push(err);
    }

    pub fn snapshot(&self) -> IngestSnapshot {
        IngestSnapshot {
            files_read: self.files_read.load(Ordering::Relaxed),
            records_sent: self.records_sent.load(Ordering::Relaxed),
            records_skipped: self.records_skipped.load(Ordering::Relaxed),
            skipped_files: std::mem::take(&mut *self.skipped_files.lock()),
        }
    }
}

/// Everything a caller (or a test) needs to know about a finished run.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Batch files found in the input directory.
    pub files_found: usize,
    /// Batch files decoded successfully.
    pub files_read: usize,
    /// Files skipped as unreadable or malformed, plus an unlistable input dir.
    pub skipped_files: Vec<IndexError>,
    /// Records handed to the aggregator.
    pub records_indexed: usize,
    /// Records dropped for having no ISBN.
    pub records_skipped: usize,
    /// Records whose ISBN was already indexed (last one wins).
    pub duplicate_isbns: usize,
    /// Distinct ISBNs in the final index.
    pub isbn_count: usize,
    /// Distinct words in the final index.
    pub word_count: usize,
    pub isbn_shards_written: usize,
    pub word_shards_written: usize,
    /// Shards that could not be written.
    pub failed_shards: Vec<IndexError>,
    pub elapsed: Duration,
}

impl BuildReport {
    pub fn files_skipped(&self) -> usize {
        self.skipped_files.len()
    }

    pub fn shards_written(&self) -> usize {
        self.isbn_shards_written + self.word_shards_written
    }

    /// True when no file, record or shard was dropped.
    pub fn is_clean(&self) -> bool {
        self.skipped_files.is_empty() && self.records_skipped == 0 && self.failed_shards.is_empty()
    }
}
