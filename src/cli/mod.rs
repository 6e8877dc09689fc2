// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the bookshard command-line interface.
//!
//! Three subcommands: `index` builds both shard directories, `inspect`
//! summarizes a shard directory, and `locate` shows which shard file an ISBN
//! or a title's words map to.

pub mod display;

use clap::{Args, Parser, Subcommand};

use bookshard::build::{
    DEFAULT_INPUT_DIR, DEFAULT_ISBN_OUTPUT_DIR, DEFAULT_QUEUE_CAPACITY, DEFAULT_READER_THREADS,
    DEFAULT_WORD_OUTPUT_DIR, DEFAULT_WRITER_THREADS, TITLE_PREFIX,
};

#[derive(Parser)]
#[command(
    name = "bookshard",
    about = "Sharded ISBN and title-word index builder",
    version
)]
pub struct Cli {
    /// Log per-file and per-shard detail
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build ISBN and word shards from a directory of JSON batches
    Index(IndexArgs),

    /// Summarize a directory of shard files
    Inspect {
        /// Shard directory (ISBN or word)
        dir: String,
    },

    /// Show which shard files an ISBN or title words land in
    Locate {
        /// Look up this ISBN instead of title words
        #[arg(long, conflicts_with = "words")]
        isbn: Option<String>,

        /// Title words, normalized exactly as at build time. A single
        /// ISBN-shaped argument is looked up as an ISBN.
        #[arg(required_unless_present = "isbn")]
        words: Vec<String>,

        /// ISBN shard directory
        #[arg(long, default_value = DEFAULT_ISBN_OUTPUT_DIR)]
        isbn_dir: String,

        /// Word shard directory
        #[arg(long, default_value = DEFAULT_WORD_OUTPUT_DIR)]
        word_dir: String,
    },
}

#[derive(Args)]
pub struct IndexArgs {
    /// Directory containing batch files
    #[arg(short, long, default_value = DEFAULT_INPUT_DIR)]
    pub input: String,

    /// Output directory for ISBN shards
    #[arg(long, default_value = DEFAULT_ISBN_OUTPUT_DIR)]
    pub isbn_output: String,

    /// Output directory for word shards
    #[arg(long, default_value = DEFAULT_WORD_OUTPUT_DIR)]
    pub word_output: String,

    /// Batch files read concurrently
    #[arg(long, default_value_t = DEFAULT_READER_THREADS)]
    pub readers: usize,

    /// Shard files written concurrently
    #[arg(long, default_value_t = DEFAULT_WRITER_THREADS)]
    pub writers: usize,

    /// Records buffered between readers and the aggregator
    #[arg(long, default_value_t = DEFAULT_QUEUE_CAPACITY)]
    pub queue_capacity: usize,

    /// Literal stripped from the start of every title
    #[arg(long, default_value = TITLE_PREFIX)]
    pub title_prefix: String,

    /// Hide progress bars
    #[arg(long)]
    pub quiet: bool,
}
