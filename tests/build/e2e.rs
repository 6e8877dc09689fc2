//! End-to-end tests for the build workflow.

use std::fs;

use bookshard::build::{run_build, BuildConfig};
use bookshard::{locate_isbn, locate_query, locate_words, Lookup};
use tempfile::TempDir;

use super::common::{all_words, build_fixture, build_from, write_batch, BUILD_FIXTURES_DIR};

#[test]
fn test_run_build_e2e_valid() {
    let built = build_fixture("valid");
    let report = &built.report;

    assert_eq!(report.files_found, 2);
    assert_eq!(report.files_read, 2);
    assert_eq!(report.files_skipped(), 0);
    assert_eq!(report.records_indexed, 5);
    assert_eq!(report.records_skipped, 1);
    assert_eq!(report.duplicate_isbns, 0);
    assert_eq!(report.isbn_count, 5);
    assert_eq!(report.word_count, 11);
    assert_eq!(report.isbn_shards_written, 5);
    assert_eq!(report.word_shards_written, 9);
    assert!(report.failed_shards.is_empty());
    assert!(!report.is_clean(), "a dropped record makes the run unclean");

    let isbn_shards = built.isbn_shards();
    let gato = &isbn_shards["147"]["9788420412147"];
    assert_eq!(gato.title, "El Gato Negro");
    assert_eq!(gato.url, "https://libros.example/el-gato-negro");
    // Titles without the prefix are kept as-is
    assert_eq!(isbn_shards["947"]["9788437604947"].title, "Ficciones");

    let words = all_words(&built.word_shards());
    assert_eq!(words["gato"], vec!["9788420412147"]);
    assert_eq!(words["anos"], vec!["9780307474728"]);
    assert_eq!(words["cafe"], vec!["9781234567897"]);
    for gone in ["el", "de", "la", "para", "libro", "sin", "numero"] {
        assert!(!words.contains_key(gone), "{:?} should not be indexed", gone);
    }
}

#[test]
fn test_run_build_e2e_tolerates_malformed_batches() {
    let built = build_fixture("mixed");
    let report = &built.report;

    assert_eq!(report.files_found, 3, "notes.txt is not a batch");
    assert_eq!(report.files_read, 1);
    assert_eq!(report.files_skipped(), 2);
    assert!(report.skipped_files.iter().all(|e| e.kind() == "malformed"));
    assert_eq!(report.isbn_count, 2);

    let isbn_shards = built.isbn_shards();
    assert_eq!(isbn_shards["572"]["9788437604572"].title, "Rayuela");
    assert_eq!(isbn_shards["183"]["9788437604183"].title, "Pedro Páramo");

    let words = all_words(&built.word_shards());
    assert!(words.contains_key("paramo"));
    assert!(!words.contains_key("objeto"), "records of a malformed file leak");
}

#[test]
fn test_run_build_e2e_last_write_wins_across_files() {
    let input = TempDir::new().unwrap();
    write_batch(
        input.path(),
        "a.json",
        &[("9780000000001", "libro-Primera Versión", "http://a")],
    );
    write_batch(
        input.path(),
        "b.json",
        &[("9780000000001", "libro-Primera Versión", "http://b")],
    );

    let built = build_from(input.path());
    assert_eq!(built.report.isbn_count, 1);
    assert_eq!(built.report.duplicate_isbns, 1);

    let isbn_shards = built.isbn_shards();
    let url = &isbn_shards["001"]["9780000000001"].url;
    // Either write may land last; exactly one survives
    assert!(url == "http://a" || url == "http://b");
    assert_eq!(all_words(&built.word_shards())["primera"], vec!["9780000000001"]);
}

#[test]
fn test_run_build_e2e_missing_input_dir_is_empty_run() {
    let temp = TempDir::new().unwrap();
    let config = BuildConfig::with_output_root(temp.path().join("nope"), &temp.path().join("out"));

    let report = run_build(&config).unwrap();
    assert_eq!(report.files_found, 0);
    assert_eq!(report.shards_written(), 0);
    assert_eq!(report.skipped_files.len(), 1);
    assert_eq!(report.skipped_files[0].kind(), "list-input");
    assert!(config.isbn_output_dir.is_dir());
    assert!(config.word_output_dir.is_dir());
}

#[test]
fn test_run_build_e2e_output_dir_blocked_by_file() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("blocker");
    fs::write(&blocker, "file, not dir").unwrap();

    let config = BuildConfig::new(
        format!("{}/valid", BUILD_FIXTURES_DIR),
        blocker.join("isbn"),
        blocker.join("letter"),
    );
    let err = run_build(&config).unwrap_err();
    assert_eq!(err.kind(), "output-dir");
}

#[test]
fn test_run_build_e2e_is_deterministic() {
    let first = build_fixture("valid");
    let second = build_fixture("valid");

    for (dir_a, dir_b) in [
        (&first.config.isbn_output_dir, &second.config.isbn_output_dir),
        (&first.config.word_output_dir, &second.config.word_output_dir),
    ] {
        for entry in fs::read_dir(dir_a).unwrap() {
            let path = entry.unwrap().path();
            let other = dir_b.join(path.file_name().unwrap());
            assert_eq!(fs::read(&path).unwrap(), fs::read(&other).unwrap());
        }
    }
}

#[test]
fn test_locate_agrees_with_build() {
    let built = build_fixture("valid");

    let isbn = locate_isbn("9788420412147", &built.config.isbn_output_dir);
    assert_eq!(isbn.shard_id, "147");
    assert!(isbn.path.exists());

    let words = locate_words("El Café Negro", &built.config.word_output_dir);
    let keys: Vec<_> = words.iter().map(|l| l.key.as_str()).collect();
    assert_eq!(keys, vec!["cafe", "negro"]);
    assert!(words.iter().all(|l| l.path.exists()));

    let query = locate_query(
        &["9788420412147".to_string()],
        &built.config.isbn_output_dir,
        &built.config.word_output_dir,
    );
    assert_eq!(query, Lookup::Isbn(isbn));
}
