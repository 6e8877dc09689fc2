//! Progress bars for the two parallel phases.
//!
//! Without the `progress` feature every method is a no-op, so the pipeline
//! code calls them unconditionally.

use std::path::Path;

#[cfg(feature = "progress")]
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Create a progress style for the main progress bars
#[cfg(feature = "progress")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("━━╸")
}

#[cfg(feature = "progress")]
pub struct BuildProgress {
    multi: MultiProgress,
    read: ProgressBar,
    write: ProgressBar,
}

#[cfg(feature = "progress")]
impl BuildProgress {
    /// Bars drawn to stderr.
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    /// Bars that are tracked but never drawn.
    pub fn hidden() -> Self {
        Self::with_target(ProgressDrawTarget::hidden())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        let multi = MultiProgress::with_draw_target(target);
        let read = multi.add(ProgressBar::new(0));
        read.set_style(create_progress_style());
        read.set_prefix("Reading");
        let write = multi.add(ProgressBar::new(0));
        write.set_style(create_progress_style());
        write.set_prefix("Writing");
        Self { multi, read, write }
    }

    pub fn start_reading(&self, files: usize) {
        self.read.set_length(files as u64);
        self.read.set_message("batches...");
    }

    pub fn file_read(&self, path: &Path, records: usize) {
        if let Some(name) = path.file_name() {
            self.read
                .set_message(format!("{} ({} records)", name.to_string_lossy(), records));
        }
        self.read.inc(1);
    }

    pub fn start_writing(&self, shards: usize) {
        self.read.finish_with_message("done");
        self.write.set_length(shards as u64);
        self.write.set_message("shards...");
    }

    pub fn shard_written(&self, shard_id: &str) {
        self.write.set_message(shard_id.to_string());
        self.write.inc(1);
    }

    pub fn finish(&self) {
        self.read.finish_with_message("done");
        self.write.finish_with_message("done");
        // Clearing can only fail on a broken terminal; nothing to do about it.
        let _ = self.multi.clear();
    }
}

#[cfg(not(feature = "progress"))]
pub struct BuildProgress;

#[cfg(not(feature = "progress"))]
impl BuildProgress {
    pub fn new() -> Self {
        BuildProgress
    }

    pub fn hidden() -> Self {
        BuildProgress
    }

    pub fn start_reading(&self, _files: usize) {}

    pub fn file_read(&self, _path: &Path, _records: usize) {}

    pub fn start_writing(&self, _shards: usize) {}

    pub fn shard_written(&self, _shard_id: &str) {}

    pub fn finish(&self) {}
}

impl Default for BuildProgress {
    fn default() -> Self {
        Self::new()
    }
}
