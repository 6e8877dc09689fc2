//! Static, sharded book index builder.
//!
//! Reads batches of book records (JSON arrays of `{url, name, isbn}`) and
//! writes two directories of shard files a read-side service can open
//! directly:
//!
//! - **ISBN index**: `isbn/{last 3 chars of ISBN}.json`, mapping each ISBN to
//!   `{"n": title, "u": url}`.
//! - **Word index**: `letter/{first 3 chars of word}.json`, mapping each
//!   normalized title word to the ISBNs whose title contains it.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ normalize.rs │────▶│  shard.rs    │────▶│   build/     │
//! │ (title_terms,│     │ (isbn_shard, │     │ (readers →   │
//! │  stop words) │     │  word_shard) │     │  aggregator →│
//! └──────────────┘     └──────────────┘     │  writers)    │
//!                                           └──────────────┘
//! ```
//!
//! Each run rebuilds everything from scratch. There is no querying or ranking
//! here; `locate` and `output` only exist to check that keys land where the
//! read side will look for them.
//!
//! # Usage
//!
//! ```no_run
//! use bookshard::build::{run_build, BuildConfig};
//!
//! let config = BuildConfig::new("books", "index/v2/isbn", "index/v2/letter");
//! let report = run_build(&config)?;
//! println!("{} ISBNs, {} skipped files", report.isbn_count, report.files_skipped());
//! # Ok::<(), bookshard::IndexError>(())
//! ```

pub mod build;
pub mod error;
pub mod locate;
pub mod normalize;
pub mod output;
pub mod shard;
pub mod testing;
pub mod types;

// Re-exports for public API
pub use build::{run_build, run_build_with_progress, BuildConfig, BuildReport, ShardedIndex};
pub use error::{IndexError, Result};
pub use locate::{is_isbn, locate_isbn, locate_query, locate_words, Lookup, ShardLocation};
pub use normalize::{fold, is_stop_word, normalize, title_terms};
pub use shard::{isbn_shard, shard, word_shard, SHARD_WIDTH};
pub use types::{BookEntry, BookRecord, IsbnIndex, WordIndex};
