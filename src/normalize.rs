//! Title tokenization and term normalization.
//!
//! A title becomes index terms in five steps:
//!
//! 1. Split on whitespace and on `-` ("ciencia-ficción" is two words)
//! 2. Lowercase (Unicode, locale-independent)
//! 3. Strip diacritics: NFD, drop combining marks, NFC
//! 4. Drop tokens of 2 characters or fewer
//! 5. Drop stop words
//!
//! Step 3 makes "café" and "cafe" the same term. The read side applies the
//! same steps to queries, so none of them may change without rebuilding.

use std::collections::HashSet;
use std::sync::LazyLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Tokens with this many characters or fewer are never indexed.
pub const MAX_SHORT_TOKEN_CHARS: usize = 2;

/// Spanish and English function words, plus catalogue noise ("libro", "volume").
const STOP_WORD_LIST: &[&str] = &[
    // Spanish
    "libro", "de", "la", "el", "en", "y", "a", "los", "las", "un", "una", "unos", "unas",
    "con", "por", "para", "del", "al", "su", "sus", "o", "u", "tu", "tus", "mi", "mis",
    "esta", "este", "esto", "estos", "estas", "aquellos", "aquellas", "se", "lo", "que",
    "como", "mas", "pero", "sin", "sobre", "ya", "entre", "cuando", "todo", "volumen",
    // English
    "the", "and", "for", "with", "from", "that", "this", "those", "these", "your", "my",
    "his", "her", "their", "our", "its", "into", "about", "than", "then", "them", "they",
    "will", "shall", "can", "could", "should", "would", "must", "may", "might", "been",
    "were", "was", "are", "is", "am", "being", "have", "has", "had", "having", "not",
    "nor", "neither", "either", "both", "each", "every", "any", "all", "anywhere", "in",
    "to", "of", "at", "volume",
];

/// Stop words, folded the same way as title tokens so lookups compare like with like.
static STOP_WORDS: LazyLock<HashSet<String>> =
    LazyLock::new(|| STOP_WORD_LIST.iter().map(|w| fold(w)).collect());

/// Check if a (normalized) word is a stop word.
#[inline]
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Lowercase and strip diacritics without filtering.
///
/// - "Café" → "cafe"
/// - "NIÑO" → "nino"
/// - "Gödel" → "godel"
pub fn fold(token: &str) -> String {
    token
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .collect()
}

/// Normalize a single token into an index term.
///
/// Returns `None` when the token is too short or a stop word once folded.
/// Applying it to its own output returns the same term.
pub fn normalize(token: &str) -> Option<String> {
    let term = fold(token);
    if term.chars().count() <= MAX_SHORT_TOKEN_CHARS || is_stop_word(&term) {
        return None;
    }
    Some(term)
}

/// Split a title into raw tokens on whitespace and hyphens.
pub fn split_title(title: &str) -> impl Iterator<Item = &str> {
    title
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|token| !token.is_empty())
}

/// Lazily yield the index terms of a title.
///
/// Repeated words are yielded once per occurrence; callers that need a set
/// (the aggregator) collapse them.
pub fn title_terms(title: &str) -> impl Iterator<Item = String> + '_ {
    split_title(title).filter_map(normalize)
}
