//! Reading shard files back.
//!
//! Used by `bookshard inspect` and by tests that check what a build wrote.
//! The build never reads its own output.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::build::SHARD_EXTENSION;
use crate::error::{IndexError, Result};
use crate::types::BookEntry;

/// On-disk form of an ISBN shard.
pub type IsbnShardFile = BTreeMap<String, BookEntry>;

/// On-disk form of a word shard.
pub type WordShardFile = BTreeMap<String, Vec<String>>;

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).map_err(|source| IndexError::ReadShard {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| IndexError::ParseShard {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_isbn_shard(path: &Path) -> Result<IsbnShardFile> {
    read_json(path)
}

pub fn read_word_shard(path: &Path) -> Result<WordShardFile> {
    read_json(path)
}

/// Which index a shard directory holds, judged by its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShardKind {
    /// Values are `{"n", "u"}` objects.
    Isbn,
    /// Values are arrays of ISBNs.
    Word,
    /// Mixed or unrecognized values.
    Unknown,
}

impl ShardKind {
    fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => ShardKind::Isbn,
            Value::Array(_) => ShardKind::Word,
            _ => ShardKind::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShardKind::Isbn => "isbn",
            ShardKind::Word => "word",
            ShardKind::Unknown => "unknown",
        }
    }
}

/// Totals for one shard directory.
#[derive(Debug, Default)]
pub struct ShardDirSummary {
    pub dir: PathBuf,
    pub shards: usize,
    pub keys: usize,
    /// Sum of all ISBN list lengths (word shards only).
    pub postings: usize,
    pub bytes: u64,
    /// Shard id and key count of the biggest shard.
    pub largest: Option<(String, usize)>,
    pub kind: Option<ShardKind>,
    pub unreadable: Vec<IndexError>,
}

/// Walk every `*.json` shard in `dir` and count what is in it.
pub fn summarize_dir(dir: &Path) -> Result<ShardDirSummary> {
    let entries = fs::read_dir(dir).map_err(|source| IndexError::ListInput {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == SHARD_EXTENSION))
        .collect();
    paths.sort();

    let mut summary = ShardDirSummary {
        dir: dir.to_path_buf(),
        ..Default::default()
    };
    let mut kind: Option<ShardKind> = None;

    for path in paths {
        let shard: BTreeMap<String, Value> = match read_json(&path) {
            Ok(shard) => shard,
            Err(err) => {
                summary.unreadable.push(err);
                continue;
            }
        };

        summary.shards += 1;
        summary.keys += shard.len();
        summary.bytes += fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        for value in shard.values() {
            let seen = ShardKind::of(value);
            kind = match kind {
                None => Some(seen),
                Some(k) if k == seen => Some(k),
                Some(_) => Some(ShardKind::Unknown),
            };
            if let Value::Array(isbns) = value {
                summary.postings += isbns.len();
            }
        }

        let id = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let bigger = match &summary.largest {
            Some((_, n)) => shard.len() > *n,
            None => true,
        };
        if bigger {
            summary.largest = Some((id, shard.len()));
        }
    }

    summary.kind = kind;
    Ok(summary)
}
