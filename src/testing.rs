//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use std::fs;
use std::path::{Path, PathBuf};

use crate::types::BookEntry;

/// One raw batch entry as `(isbn, name, url)`.
pub type RawTuple<'a> = (&'a str, &'a str, &'a str);

/// Render raw records as a batch file body.
pub fn batch_json(records: &[RawTuple<'_>]) -> String {
    let values: Vec<serde_json::Value> = records
        .iter()
        .map(|(isbn, name, url)| serde_json::json!({ "url": url, "name": name, "isbn": isbn }))
        .collect();
    serde_json::Value::Array(values).to_string()
}

/// Write a batch file into `dir`, returning its path.
pub fn write_batch(dir: &Path, file_name: &str, records: &[RawTuple<'_>]) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, batch_json(records)).expect("write batch fixture");
    path
}

/// Write arbitrary bytes as a batch file (for malformed input cases).
pub fn write_raw(dir: &Path, file_name: &str, body: &str) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, body).expect("write raw fixture");
    path
}

/// A book entry whose URL is derived from its title.
pub fn make_entry(title: &str) -> BookEntry {
    BookEntry::new(title, format!("https://books.example/{}", title.replace(' ', "-")))
}
