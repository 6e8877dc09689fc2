// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the bookshard CLI.
//!
//! OneDark colors on dark terminals, One Light on light ones. `BOOKSHARD_THEME`
//! forces a theme, `COLORFGBG` is used as a hint, dark is the default.
//! `NO_COLOR` and non-TTY output get plain text.

use std::path::Path;
use std::sync::OnceLock;

use bookshard::build::BuildReport;
use bookshard::output::ShardDirSummary;
use bookshard::ShardLocation;

// Box drawing constants - width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 72;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("BOOKSHARD_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // COLORFGBG is "fg;bg"; backgrounds 7 and up (except 8) are light
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(Ok(bg)) = colorfgbg.split(';').next_back().map(str::parse::<u8>) {
            if bg >= 7 && bg != 8 {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// COLORS
// ═══════════════════════════════════════════════════════════════════════════

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117);
    pub const GREEN: (u8, u8, u8) = (152, 195, 121);
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123);
    pub const CYAN: (u8, u8, u8) = (86, 182, 194);
    pub const GRAY: (u8, u8, u8) = (92, 99, 112);
}

mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73);
    pub const GREEN: (u8, u8, u8) = (80, 161, 79);
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1);
    pub const CYAN: (u8, u8, u8) = (1, 132, 188);
    pub const GRAY: (u8, u8, u8) = (160, 161, 167);
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(CYAN);
theme_color!(GRAY);

/// Colors only on a TTY, and never when NO_COLOR is set.
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Visible length, skipping ANSI escapes
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

fn border() -> String {
    if use_colors() {
        GRAY()
    } else {
        String::new()
    }
}

fn reset() -> &'static str {
    if use_colors() {
        RESET
    } else {
        ""
    }
}

/// │ content          │
pub fn row(content: &str) {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!("{b}│{r}{}{}{b}│{r}", content, " ".repeat(pad), b = border(), r = reset());
}

/// ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{b}┌{r}{}{b}{}┐{r}",
        label_part,
        "─".repeat(remaining),
        b = border(),
        r = reset()
    );
}

/// └──────────────────┘
pub fn section_bot() {
    println!("{}└{}┘{}", border(), "─".repeat(BOX_WIDTH), reset());
}

/// Label/value row with the value right-aligned at a fixed column.
pub fn kv(label: &str, value: &str) {
    row(&format!("  {:<24}{}", label, value));
}

// ═══════════════════════════════════════════════════════════════════════════
// FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

pub fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

/// Green when zero, yellow otherwise.
pub fn count_badge(count: usize) -> String {
    if count == 0 {
        themed(GREEN, &[], "0")
    } else {
        themed(YELLOW, &[BOLD], &count.to_string())
    }
}

/// Keep the tail of a long path.
pub fn truncate_path(path: &Path, max_len: usize) -> String {
    let s = path.display().to_string();
    let len = s.chars().count();
    if len <= max_len {
        s
    } else {
        let tail: String = s.chars().skip(len + 3 - max_len).collect();
        format!("...{}", tail)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// REPORTS
// ═══════════════════════════════════════════════════════════════════════════

/// Final summary of an `index` run, on stderr like the progress bars.
pub fn print_build_summary(report: &BuildReport) {
    eprintln!();
    if report.is_clean() {
        eprintln!("✅ Build complete");
    } else {
        eprintln!("⚠️  Build complete with skips");
    }
    eprintln!(
        "   {} ISBNs │ {} words │ {} shards │ {:.1}s",
        report.isbn_count,
        report.word_count,
        report.shards_written(),
        report.elapsed.as_secs_f64()
    );
    eprintln!(
        "   files {}/{} read │ {} records skipped │ {} duplicate ISBNs │ {} shards failed",
        report.files_read,
        report.files_found,
        report.records_skipped,
        report.duplicate_isbns,
        report.failed_shards.len()
    );
    for err in report.skipped_files.iter().chain(&report.failed_shards) {
        eprintln!("   {} [{}] {}", themed(YELLOW, &[], "•"), err.kind(), err);
    }
}

pub fn print_dir_summary(summary: &ShardDirSummary) {
    section_top("SHARDS");
    kv("Directory", &truncate_path(&summary.dir, BOX_WIDTH - 28));
    kv(
        "Kind",
        summary.kind.map(|k| k.as_str()).unwrap_or("empty"),
    );
    kv("Shard files", &summary.shards.to_string());
    kv("Keys", &summary.keys.to_string());
    if summary.postings > 0 {
        kv("ISBN references", &summary.postings.to_string());
    }
    kv("Size", &format_size(summary.bytes));
    if let Some((id, keys)) = &summary.largest {
        kv("Largest shard", &format!("{} ({} keys)", id, keys));
    }
    kv("Unreadable", &count_badge(summary.unreadable.len()));
    section_bot();
    for err in &summary.unreadable {
        println!("  {} {}", themed(RED, &[], "✗"), err);
    }
}

pub fn print_locations(locations: &[ShardLocation], found: &[Option<bool>]) {
    if locations.is_empty() {
        println!("No indexable words (all stop words or too short).");
        return;
    }
    section_top("LOCATE");
    for (loc, present) in locations.iter().zip(found) {
        let status = match present {
            Some(true) => themed(GREEN, &[], "present"),
            Some(false) => themed(YELLOW, &[], "absent"),
            None => themed(GRAY, &[], "no shard file"),
        };
        row(&format!(
            "  {:<20} {:<6} {}",
            loc.key,
            loc.shard_id,
            status
        ));
        row(&format!("    {}", truncate_path(&loc.path, BOX_WIDTH - 6)));
    }
    section_bot();
}
