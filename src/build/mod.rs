//! The index build: read batches, aggregate, write shards.
//!
//! ```text
//!  books/*.json ──▶ reader pool (8) ──▶ bounded queue ──▶ aggregator
//!                                                            │
//!  index/v2/isbn/*.json   ◀── writer pool (20) ◀── ShardedIndex
//!  index/v2/letter/*.json ◀──┘
//! ```
//!
//! Phases run strictly one after another. Inside each phase, failures are
//! per file or per shard and land in the [`BuildReport`]; only failing to
//! create the output directories stops the run.

pub mod aggregate;
pub mod config;
pub mod document;
pub mod parallel;
pub mod progress;
pub mod report;
pub mod writer;

use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

use crate::error::{IndexError, Result};

pub use aggregate::ShardedIndex;
pub use config::*;
pub use document::{parse_batch, read_batch_file, RawRecord};
pub use parallel::{discover_batch_files, ingest_files, ingest_files_with_progress};
pub use progress::BuildProgress;
pub use report::{BuildReport, IngestSnapshot, IngestStats};
pub use writer::{checked_shard_path, shard_path, write_shards, ShardJob, WriteSummary, SHARD_EXTENSION};

fn create_output_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| IndexError::CreateOutputDir {
        path: path.to_path_buf(),
        source,
    })
}

/// Build both indices from `config.input_dir` without progress output.
pub fn run_build(config: &BuildConfig) -> Result<BuildReport> {
    run_build_with_progress(config, &BuildProgress::hidden())
}

/// Build both indices, reporting progress on `progress`.
pub fn run_build_with_progress(config: &BuildConfig, progress: &BuildProgress) -> Result<BuildReport> {
    let started = Instant::now();

    // 1. Output roots first: the one failure that aborts the run.
    create_output_dir(&config.isbn_output_dir)?;
    create_output_dir(&config.word_output_dir)?;

    let mut report = BuildReport::default();

    // 2. Find batches. An unlistable input dir is just an empty run.
    let files = match discover_batch_files(&config.input_dir, &config.extension) {
        Ok(files) => files,
        Err(err) => {
            warn!(reason = err.kind(), "no input: {}", err);
            report.skipped_files.push(err);
            Vec::new()
        }
    };
    report.files_found = files.len();

    // 3. Read and aggregate.
    let stats = IngestStats::default();
    let index = ingest_files_with_progress(&files, config, &stats, progress)?;
    let ingest = stats.snapshot();

    report.files_read = ingest.files_read;
    report.skipped_files.extend(ingest.skipped_files);
    report.records_indexed = index.records();
    report.records_skipped = ingest.records_skipped;
    report.duplicate_isbns = index.duplicate_isbns();
    report.isbn_count = index.isbn_count();
    report.word_count = index.word_count();

    info!(
        isbns = report.isbn_count,
        words = report.word_count,
        isbn_shards = index.isbn_shard_count(),
        word_shards = index.word_shard_count(),
        "ingest complete"
    );

    // 4. Write shards.
    let written = write_shards(
        &index,
        &config.isbn_output_dir,
        &config.word_output_dir,
        config.writer_threads,
        progress,
    )?;
    progress.finish();

    report.isbn_shards_written = written.isbn_shards_written;
    report.word_shards_written = written.word_shards_written;
    report.failed_shards = written.failed;
    report.elapsed = started.elapsed();

    info!(
        shards = report.shards_written(),
        failed = report.failed_shards.len(),
        skipped_files = report.files_skipped(),
        skipped_records = report.records_skipped,
        elapsed_ms = report.elapsed.as_millis() as u64,
        "build complete"
    );

    Ok(report)
}
