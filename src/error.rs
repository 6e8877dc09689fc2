// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for the index build.
//!
//! Only [`IndexError::CreateOutputDir`] and the pool/thread setup variants
//! ever abort a run. Everything else is a per-unit failure: the reader or
//! writer that hit it records it in the [`BuildReport`](crate::build::BuildReport)
//! and the run moves on.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while building the shard files.
#[derive(Error, Debug)]
pub enum IndexError {
    /// An output root could not be created. Fatal, raised before any reading.
    #[error("Failed to create output dir {}: {source}", path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source directory could not be listed.
    #[error("Failed to list {}: {source}", path.display())]
    ListInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A batch file could not be opened.
    #[error("Failed to read {}: {source}", path.display())]
    ReadBatch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A batch file is not a JSON array of book records.
    #[error("Invalid JSON in {}: {source}", path.display())]
    ParseBatch {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A shard could not be serialized to JSON.
    #[error("Failed to serialize shard {}: {source}", path.display())]
    SerializeShard {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A shard file could not be created or written.
    #[error("Failed to write shard {}: {source}", path.display())]
    WriteShard {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An existing shard file could not be read back.
    #[error("Failed to read shard {}: {source}", path.display())]
    ReadShard {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An existing shard file is not valid shard JSON.
    #[error("Invalid shard {}: {source}", path.display())]
    ParseShard {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A worker pool could not be started.
    #[error("Failed to start {pool} pool: {source}")]
    ThreadPool {
        pool: &'static str,
        #[source]
        source: rayon::ThreadPoolBuildError,
    },

    /// The aggregator thread could not be spawned.
    #[error("Failed to spawn aggregator: {0}")]
    SpawnAggregator(#[source] std::io::Error),

    /// The aggregator thread panicked before handing back the index.
    #[error("Aggregator thread panicked")]
    AggregatorPanicked,
}

impl IndexError {
    /// Path of the file or directory the error is about, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            IndexError::CreateOutputDir { path, .. }
            | IndexError::ListInput { path, .. }
            | IndexError::ReadBatch { path, .. }
            | IndexError::ParseBatch { path, .. }
            | IndexError::SerializeShard { path, .. }
            | IndexError::WriteShard { path, .. }
            | IndexError::ReadShard { path, .. }
            | IndexError::ParseShard { path, .. } => Some(path),
            IndexError::ThreadPool { .. }
            | IndexError::SpawnAggregator(_)
            | IndexError::AggregatorPanicked => None,
        }
    }

    /// Short machine-friendly label used in logs and the run summary.
    pub fn kind(&self) -> &'static str {
        match self {
            IndexError::CreateOutputDir { .. } => "output-dir",
            IndexError::ListInput { .. } => "list-input",
            IndexError::ReadBatch { .. } => "unreadable",
            IndexError::ParseBatch { .. } => "malformed",
            IndexError::SerializeShard { .. } => "serialize-shard",
            IndexError::WriteShard { .. } => "write-shard",
            IndexError::ReadShard { .. } => "read-shard",
            IndexError::ParseShard { .. } => "parse-shard",
            IndexError::ThreadPool { .. } => "thread-pool",
            IndexError::SpawnAggregator(_) => "spawn",
            IndexError::AggregatorPanicked => "panic",
        }
    }
}

pub type Result<T> = std::result::Result<T, IndexError>;
