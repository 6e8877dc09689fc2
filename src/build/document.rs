//! Batch files and the producer that reads them.
//!
//! A batch file is a JSON array of `{ "url", "name", "isbn" }` objects. A
//! reader decodes the whole array first and only then starts emitting, so a
//! file that fails to decode contributes nothing.

use crossbeam_channel::Sender;
use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{IndexError, Result};
use crate::types::{BookEntry, BookRecord};

use super::IngestStats;

/// A book as it appears in a batch file.
///
/// Missing or `null` fields read as empty strings; the ISBN check happens
/// when converting to a [`BookRecord`].
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct RawRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub isbn: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl RawRecord {
    /// Convert into an indexable record, stripping `title_prefix` from the name.
    ///
    /// Returns `None` when the ISBN is empty.
    pub fn into_record(self, title_prefix: &str) -> Option<BookRecord> {
        if self.isbn.is_empty() {
            return None;
        }
        let title = if self.name.starts_with(title_prefix) {
            self.name[title_prefix.len()..].to_string()
        } else {
            self.name
        };
        Some(BookRecord {
            isbn: self.isbn,
            entry: BookEntry {
                title,
                url: self.url,
            },
        })
    }
}

/// Open and decode one batch file.
///
/// Only the first JSON value is decoded; anything after a complete array is
/// ignored. An empty file is malformed.
pub fn parse_batch(path: &Path) -> Result<Vec<RawRecord>> {
    let file = File::open(path).map_err(|source| IndexError::ReadBatch {
        path: path.to_path_buf(),
        source,
    })?;
    let first = serde_json::Deserializer::from_reader(BufReader::new(file))
        .into_iter::<Vec<RawRecord>>()
        .next()
        .unwrap_or_else(|| Err(serde::de::Error::custom("empty batch file")));
    first.map_err(|source| IndexError::ParseBatch {
        path: path.to_path_buf(),
        source,
    })
}

/// Read one batch file and push its records onto `sink`.
///
/// Never fails: an unreadable or malformed file is logged and recorded in
/// `stats`, records without an ISBN are counted and dropped. Returns the
/// number of records sent.
pub fn read_batch_file(
    path: &Path,
    title_prefix: &str,
    sink: &Sender<BookRecord>,
    stats: &IngestStats,
) -> usize {
    let records = match parse_batch(path) {
        Ok(records) => records,
        Err(err) => {
            warn!(file = %path.display(), reason = err.kind(), "skipping batch: {}", err);
            stats.skip_file(err);
            return 0;
        }
    };

    let total = records.len();
    let mut sent = 0;
    for raw in records {
        let Some(record) = raw.into_record(title_prefix) else {
            stats.skip_record();
            continue;
        };
        if sink.send(record).is_err() {
            // Receiver gone: the aggregator died and the run is failing anyway.
            warn!(file = %path.display(), "aggregator stopped, abandoning batch");
            break;
        }
        sent += 1;
    }

    stats.file_read(sent);
    debug!(file = %path.display(), records = total, sent, "batch read");
    sent
}
