// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Parallel batch reading feeding a single aggregator.
//!
//! Reading and decoding JSON is the slow part of ingest and every file is
//! independent, so files go through a fixed-size rayon pool (8 threads by
//! default). Building the index is cheap per record but touches shared maps,
//! so it stays on one thread at the other end of a bounded channel. A full
//! channel blocks the readers until the aggregator catches up.
//!
//! Shutdown is ordered: the pool returns only after every reader has
//! finished, which drops the last sender, which closes the channel, which
//! ends the aggregator's loop.

use crossbeam_channel::bounded;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{IndexError, Result};
use crate::types::BookRecord;

use super::document::read_batch_file;
use super::{aggregate, BuildConfig, BuildProgress, IngestStats, ShardedIndex};

/// List the batch files in `input_dir` with the given extension, sorted.
///
/// Subdirectories and other files are ignored.
pub fn discover_batch_files(input_dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(input_dir).map_err(|source| IndexError::ListInput {
        path: input_dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        // is_file follows symlinks
        .filter(|path| path.is_file())
        .filter(|path| path.extension().is_some_and(|ext| ext == extension))
        .collect();
    files.sort();
    Ok(files)
}

/// Read `files` in parallel and aggregate them into one index.
///
/// Per-file problems are recorded in `stats`; only pool or thread setup
/// failures are returned.
pub fn ingest_files(
    files: &[PathBuf],
    config: &BuildConfig,
    stats: &IngestStats,
) -> Result<ShardedIndex> {
    ingest_files_with_progress(files, config, stats, &BuildProgress::hidden())
}

/// [`ingest_files`] with progress reporting.
pub fn ingest_files_with_progress(
    files: &[PathBuf],
    config: &BuildConfig,
    stats: &IngestStats,
    progress: &BuildProgress,
) -> Result<ShardedIndex> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(config.reader_threads.max(1))
        .thread_name(|i| format!("bookshard-reader-{}", i))
        .build()
        .map_err(|source| IndexError::ThreadPool {
            pool: "reader",
            source,
        })?;

    let (sender, receiver) = bounded::<BookRecord>(config.queue_capacity.max(1));
    let aggregator = aggregate::spawn(receiver)?;

    info!(
        files = files.len(),
        readers = config.reader_threads,
        queue = config.queue_capacity,
        "reading batches"
    );
    progress.start_reading(files.len());

    pool.install(|| {
        files.par_iter().for_each_with(sender.clone(), |sink, path| {
            let sent = read_batch_file(path, &config.title_prefix, sink, stats);
            progress.file_read(path, sent);
        });
    });

    // Last sender: dropping it closes the queue for the aggregator.
    drop(sender);
    debug!("readers finished, draining");

    aggregator.join().map_err(|_| IndexError::AggregatorPanicked)
}
