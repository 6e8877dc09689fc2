//! Shard id derivation.
//!
//! ISBNs shard by their last [`SHARD_WIDTH`] characters, words by their first
//! [`SHARD_WIDTH`] characters. Anything that reads the output must use these
//! exact functions to find the file a key lives in.
//!
//! Widths count `char`s, not bytes, so a word starting with "ñ" never gets
//! split mid-character.

/// Number of characters taken from a key to form its shard id.
pub const SHARD_WIDTH: usize = 3;

/// Take the first (`from_start`) or last `width` characters of `key`.
///
/// Keys shorter than `width` come back unchanged. No normalization happens
/// here; callers pass already-normalized keys.
pub fn shard(key: &str, width: usize, from_start: bool) -> &str {
    let len = key.chars().count();
    if len < width {
        return key;
    }
    if width == 0 {
        return "";
    }
    if from_start {
        match key.char_indices().nth(width) {
            Some((end, _)) => &key[..end],
            None => key,
        }
    } else {
        match key.char_indices().nth(len - width) {
            Some((start, _)) => &key[start..],
            None => key,
        }
    }
}

/// Shard id of an ISBN: its last three characters.
#[inline]
pub fn isbn_shard(isbn: &str) -> &str {
    shard(isbn, SHARD_WIDTH, false)
}

/// Shard id of a normalized word: its first three characters.
#[inline]
pub fn word_shard(word: &str) -> &str {
    shard(word, SHARD_WIDTH, true)
}
