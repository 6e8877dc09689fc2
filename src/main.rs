use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use bookshard::build::{run_build_with_progress, BuildConfig, BuildProgress};
use bookshard::output::{read_isbn_shard, read_word_shard, summarize_dir};
use bookshard::{locate_isbn, locate_query, Lookup};

mod cli;
use cli::{display, Cli, Commands, IndexArgs};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = setup_logging(cli.verbose) {
        eprintln!("❌ {:#}", e);
        return ExitCode::FAILURE;
    }

    let result = match cli.command {
        Commands::Index(args) => run_index(args),
        Commands::Inspect { dir } => run_inspect(&dir),
        Commands::Locate {
            isbn,
            words,
            isbn_dir,
            word_dir,
        } => run_locate(isbn.as_deref(), &words, &isbn_dir, &word_dir),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins; otherwise info, or debug with `-v`.
fn setup_logging(verbose: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("bookshard=debug,warn")
        } else {
            EnvFilter::new("bookshard=info,warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{}", e))
        .context("Failed to initialise logging")
}

fn run_index(args: IndexArgs) -> Result<()> {
    let config = BuildConfig::new(&args.input, &args.isbn_output, &args.word_output)
        .with_reader_threads(args.readers)
        .with_writer_threads(args.writers)
        .with_queue_capacity(args.queue_capacity)
        .with_title_prefix(args.title_prefix);

    let progress = if args.quiet {
        BuildProgress::hidden()
    } else {
        BuildProgress::new()
    };

    let report = run_build_with_progress(&config, &progress)
        .with_context(|| format!("Build from {} failed", args.input))?;
    display::print_build_summary(&report);
    Ok(())
}

fn run_inspect(dir: &str) -> Result<()> {
    let summary = summarize_dir(Path::new(dir)).with_context(|| format!("Cannot inspect {}", dir))?;
    display::print_dir_summary(&summary);
    Ok(())
}

fn run_locate(isbn: Option<&str>, words: &[String], isbn_dir: &str, word_dir: &str) -> Result<()> {
    let (isbn_dir, word_dir) = (Path::new(isbn_dir), Path::new(word_dir));
    let lookup = match isbn {
        Some(isbn) => Lookup::Isbn(locate_isbn(isbn, isbn_dir)),
        None => locate_query(words, isbn_dir, word_dir),
    };

    // Report presence only when the shard file exists and parses.
    let found: Vec<Option<bool>> = lookup
        .locations()
        .iter()
        .map(|loc| {
            if !loc.path.exists() {
                return None;
            }
            let present = match &lookup {
                Lookup::Isbn(_) => read_isbn_shard(&loc.path).map(|s| s.contains_key(&loc.key)),
                Lookup::Words(_) => read_word_shard(&loc.path).map(|s| s.contains_key(&loc.key)),
            };
            present.ok()
        })
        .collect();

    display::print_locations(lookup.locations(), &found);
    Ok(())
}
