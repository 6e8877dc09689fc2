use std::path::{Path, PathBuf};

/// Files read at once by the reader pool.
pub const DEFAULT_READER_THREADS: usize = 8;

/// Shards written at once by the writer pool.
pub const DEFAULT_WRITER_THREADS: usize = 20;

/// Records buffered between readers and the aggregator before readers block.
pub const DEFAULT_QUEUE_CAPACITY: usize = 5000;

/// Extension of batch files in the input directory.
pub const BATCH_EXTENSION: &str = "json";

/// Literal some scrapers put in front of every title.
pub const TITLE_PREFIX: &str = "libro-";

pub const DEFAULT_INPUT_DIR: &str = "books";
pub const DEFAULT_ISBN_OUTPUT_DIR: &str = "index/v2/isbn";
pub const DEFAULT_WORD_OUTPUT_DIR: &str = "index/v2/letter";

/// Where to read, where to write, and how wide to go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildConfig {
    pub input_dir: PathBuf,
    pub isbn_output_dir: PathBuf,
    pub word_output_dir: PathBuf,
    pub reader_threads: usize,
    pub writer_threads: usize,
    pub queue_capacity: usize,
    /// Batch file extension, without the dot.
    pub extension: String,
    /// Stripped from the start of every title; empty disables stripping.
    pub title_prefix: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            isbn_output_dir: PathBuf::from(DEFAULT_ISBN_OUTPUT_DIR),
            word_output_dir: PathBuf::from(DEFAULT_WORD_OUTPUT_DIR),
            reader_threads: DEFAULT_READER_THREADS,
            writer_threads: DEFAULT_WRITER_THREADS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            extension: BATCH_EXTENSION.to_string(),
            title_prefix: TITLE_PREFIX.to_string(),
        }
    }
}

impl BuildConfig {
    pub fn new(
        input_dir: impl Into<PathBuf>,
        isbn_output_dir: impl Into<PathBuf>,
        word_output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            isbn_output_dir: isbn_output_dir.into(),
            word_output_dir: word_output_dir.into(),
            ..Self::default()
        }
    }

    /// Input at `input_dir`, both outputs under `output_root/{isbn,letter}`.
    pub fn with_output_root(input_dir: impl Into<PathBuf>, output_root: &Path) -> Self {
        Self::new(input_dir, output_root.join("isbn"), output_root.join("letter"))
    }

    pub fn with_reader_threads(mut self, threads: usize) -> Self {
        self.reader_threads = threads.max(1);
        self
    }

    pub fn with_writer_threads(mut self, threads: usize) -> Self {
        self.writer_threads = threads.max(1);
        self
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    pub fn with_title_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.title_prefix = prefix.into();
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }
}
