//! Key → shard file resolution, the contract shared with the read side.
//!
//! A consumer looking for an ISBN or a title word has to land on the same
//! file the build wrote. These helpers run the exact normalization and shard
//! functions the build uses, so `bookshard locate` can show where a key lives.

use std::path::{Path, PathBuf};

use crate::build::shard_path;
use crate::normalize::title_terms;
use crate::shard::{isbn_shard, word_shard};

/// Where one key lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardLocation {
    /// Key as stored in the shard (the ISBN, or the normalized word).
    pub key: String,
    pub shard_id: String,
    pub path: PathBuf,
}

/// Accept 10- or 13-digit ISBNs (ISBN-10 may end in `X`), ignoring hyphens and spaces.
pub fn is_isbn(candidate: &str) -> bool {
    let clean: Vec<char> = candidate
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .collect();
    match clean.len() {
        13 => clean.iter().all(|c| c.is_ascii_digit()),
        10 => {
            clean[..9].iter().all(|c| c.is_ascii_digit())
                && (clean[9].is_ascii_digit() || clean[9] == 'X')
        }
        _ => false,
    }
}

/// Shard file holding `isbn`. The ISBN is used verbatim, as the build does.
pub fn locate_isbn(isbn: &str, isbn_dir: &Path) -> ShardLocation {
    let shard_id = isbn_shard(isbn);
    ShardLocation {
        key: isbn.to_string(),
        shard_id: shard_id.to_string(),
        path: shard_path(isbn_dir, shard_id),
    }
}

/// Shard files holding each searchable word of `text`.
///
/// Stop words and short tokens are dropped, exactly as at build time, and
/// repeated words appear once.
pub fn locate_words(text: &str, word_dir: &Path) -> Vec<ShardLocation> {
    let mut locations: Vec<ShardLocation> = Vec::new();
    for term in title_terms(text) {
        if locations.iter().any(|l| l.key == term) {
            continue;
        }
        let shard_id = word_shard(&term).to_string();
        locations.push(ShardLocation {
            path: shard_path(word_dir, &shard_id),
            shard_id,
            key: term,
        });
    }
    locations
}

/// What a `locate` query resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Isbn(ShardLocation),
    Words(Vec<ShardLocation>),
}

impl Lookup {
    pub fn locations(&self) -> &[ShardLocation] {
        match self {
            Lookup::Isbn(loc) => std::slice::from_ref(loc),
            Lookup::Words(locs) => locs,
        }
    }
}

/// Resolve free-form `locate` arguments.
///
/// A single ISBN-shaped argument goes to the ISBN index; anything else is
/// read as title words.
pub fn locate_query(args: &[String], isbn_dir: &Path, word_dir: &Path) -> Lookup {
    match args {
        [single] if is_isbn(single) => Lookup::Isbn(locate_isbn(single.trim(), isbn_dir)),
        _ => Lookup::Words(locate_words(&args.join(" "), word_dir)),
    }
}
