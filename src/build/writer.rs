//! Shard serialization.
//!
//! Every shard becomes one job on a fixed-size rayon pool. A job serializes
//! its map to JSON and writes `{shard_id}.json`; if either step fails the
//! error is recorded and the other jobs carry on.
//!
//! Keys are written in sorted order and word ISBN lists are sorted, so two
//! runs over the same input produce byte-identical files.

use parking_lot::Mutex;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::warn;

use crate::error::{IndexError, Result};
use crate::types::{BookEntry, IsbnShard, WordShard};

use super::{BuildProgress, ShardedIndex};

/// Extension of every shard file.
pub const SHARD_EXTENSION: &str = "json";

/// Path of the file holding shard `shard_id` inside `dir`.
pub fn shard_path(dir: &Path, shard_id: &str) -> PathBuf {
    dir.join(format!("{}.{}", shard_id, SHARD_EXTENSION))
}

/// [`shard_path`], but only when the file name is a single plain component.
///
/// Shard ids come straight from titles and ISBNs, so `/us` or `../` would
/// otherwise join to a path outside `dir`.
pub fn checked_shard_path(dir: &Path, shard_id: &str) -> Option<PathBuf> {
    let file_name = format!("{}.{}", shard_id, SHARD_EXTENSION);
    let mut components = Path::new(&file_name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Some(dir.join(&file_name)),
        _ => None,
    }
}

/// One unit of work for the writer pool.
#[derive(Debug, Clone, Copy)]
pub enum ShardJob<'a> {
    Isbn { id: &'a str, books: &'a IsbnShard },
    Word { id: &'a str, words: &'a WordShard },
}

impl ShardJob<'_> {
    pub fn id(&self) -> &str {
        match self {
            ShardJob::Isbn { id, .. } | ShardJob::Word { id, .. } => id,
        }
    }
}

/// What the writer pool managed to do.
#[derive(Debug, Default)]
pub struct WriteSummary {
    pub isbn_shards_written: usize,
    pub word_shards_written: usize,
    pub failed: Vec<IndexError>,
}

/// ISBN shard bytes: `{ isbn: {"n": title, "u": url} }`.
pub fn encode_isbn_shard(books: &IsbnShard) -> serde_json::Result<Vec<u8>> {
    let sorted: BTreeMap<&str, &BookEntry> = books.iter().map(|(k, v)| (k.as_str(), v)).collect();
    serde_json::to_vec(&sorted)
}

/// Word shard bytes: `{ word: [isbn, ...] }`, each ISBN list flattened from
/// its set and sorted.
pub fn encode_word_shard(words: &WordShard) -> serde_json::Result<Vec<u8>> {
    let flattened: BTreeMap<&str, Vec<&str>> = words
        .iter()
        .map(|(word, isbns)| {
            let mut list: Vec<&str> = isbns.iter().map(String::as_str).collect();
            list.sort_unstable();
            (word.as_str(), list)
        })
        .collect();
    serde_json::to_vec(&flattened)
}

/// Serialize and write a single shard.
pub fn write_shard(job: &ShardJob<'_>, isbn_dir: &Path, word_dir: &Path) -> Result<PathBuf> {
    let dir = match job {
        ShardJob::Isbn { .. } => isbn_dir,
        ShardJob::Word { .. } => word_dir,
    };
    let path = checked_shard_path(dir, job.id()).ok_or_else(|| IndexError::WriteShard {
        path: dir.join(job.id()),
        source: io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("shard id {:?} does not name a file inside the output directory", job.id()),
        ),
    })?;
    let encoded = match job {
        ShardJob::Isbn { books, .. } => encode_isbn_shard(books),
        ShardJob::Word { words, .. } => encode_word_shard(words),
    };
    let bytes = encoded.map_err(|source| IndexError::SerializeShard {
        path: path.clone(),
        source,
    })?;
    fs::write(&path, bytes).map_err(|source| IndexError::WriteShard {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Every shard of both indices, ISBN shards first.
pub fn shard_jobs(index: &ShardedIndex) -> Vec<ShardJob<'_>> {
    let isbn_jobs = index.isbns().iter().map(|(id, books)| ShardJob::Isbn { id, books });
    let word_jobs = index.words().iter().map(|(id, words)| ShardJob::Word { id, words });
    isbn_jobs.chain(word_jobs).collect()
}

/// Write every shard of `index` using at most `writer_threads` threads.
///
/// Only a failure to start the pool is returned as an error; individual
/// shard failures end up in [`WriteSummary::failed`].
pub fn write_shards(
    index: &ShardedIndex,
    isbn_dir: &Path,
    word_dir: &Path,
    writer_threads: usize,
    progress: &BuildProgress,
) -> Result<WriteSummary> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(writer_threads.max(1))
        .thread_name(|i| format!("bookshard-writer-{}", i))
        .build()
        .map_err(|source| IndexError::ThreadPool {
            pool: "writer",
            source,
        })?;

    let jobs = shard_jobs(index);
    progress.start_writing(jobs.len());

    let isbn_written = AtomicUsize::new(0);
    let word_written = AtomicUsize::new(0);
    let failed = Mutex::new(Vec::new());

    pool.install(|| {
        jobs.par_iter().for_each(|job| {
            match write_shard(job, isbn_dir, word_dir) {
                Ok(_) => {
                    let counter = match job {
                        ShardJob::Isbn { .. } => &isbn_written,
                        ShardJob::Word { .. } => &word_written,
                    };
                    counter.fetch_add(1, Ordering::Relaxed);
                }
                Err(err) => {
                    warn!(shard = job.id(), reason = err.kind(), "skipping shard: {}", err);
                    failed.lock().push(err);
                }
            }
            progress.shard_written(job.id());
        });
    });

    Ok(WriteSummary {
        isbn_shards_written: isbn_written.into_inner(),
        word_shards_written: word_written.into_inner(),
        failed: failed.into_inner(),
    })
}
