//! Tests for the on-disk shard layout.

use std::fs;
use std::path::Path;

use bookshard::build::{
    run_build, shard_path, write_shards, BuildConfig, BuildProgress, ShardedIndex,
};
use bookshard::output::{summarize_dir, ShardKind};
use tempfile::TempDir;

use super::common::{load_isbn_shards, load_word_shards, make_entry, write_batch};

fn sample_index() -> ShardedIndex {
    let mut index = ShardedIndex::new();
    index.insert("9788420412147".into(), make_entry("El Gato Negro"));
    index.insert("9788437604947".into(), make_entry("Ficciones"));
    index.insert("9786070707070".into(), make_entry("Ciencia-Ficción"));
    index
}

#[test]
fn test_one_file_per_shard() {
    let temp = TempDir::new().unwrap();
    let (isbn_dir, word_dir) = (temp.path().join("isbn"), temp.path().join("letter"));
    fs::create_dir_all(&isbn_dir).unwrap();
    fs::create_dir_all(&word_dir).unwrap();

    let index = sample_index();
    let summary = write_shards(&index, &isbn_dir, &word_dir, 4, &BuildProgress::hidden()).unwrap();

    assert!(summary.failed.is_empty());
    assert_eq!(summary.isbn_shards_written, index.isbn_shard_count());
    assert_eq!(summary.word_shards_written, index.word_shard_count());

    let isbn_shards = load_isbn_shards(&isbn_dir);
    assert_eq!(isbn_shards.keys().collect::<Vec<_>>(), vec!["070", "147", "947"]);
    assert_eq!(isbn_shards["147"]["9788420412147"].title, "El Gato Negro");

    let word_shards = load_word_shards(&word_dir);
    assert_eq!(
        word_shards.keys().collect::<Vec<_>>(),
        vec!["cie", "fic", "gat", "neg"]
    );
    // "ficciones" and "ficcion" share a shard
    assert_eq!(word_shards["fic"]["ficciones"], vec!["9788437604947"]);
    assert_eq!(word_shards["fic"]["ficcion"], vec!["9786070707070"]);
}

#[test]
fn test_isbn_shard_uses_short_field_names() {
    let temp = TempDir::new().unwrap();
    let (isbn_dir, word_dir) = (temp.path().join("isbn"), temp.path().join("letter"));
    fs::create_dir_all(&isbn_dir).unwrap();
    fs::create_dir_all(&word_dir).unwrap();

    write_shards(&sample_index(), &isbn_dir, &word_dir, 1, &BuildProgress::hidden()).unwrap();

    let raw = fs::read_to_string(shard_path(&isbn_dir, "147")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["9788420412147"]["n"], "El Gato Negro");
    assert!(value["9788420412147"]["u"].is_string());
    assert!(value["9788420412147"].get("title").is_none());
}

#[test]
fn test_word_isbn_lists_are_sorted() {
    let temp = TempDir::new().unwrap();
    let (isbn_dir, word_dir) = (temp.path().join("isbn"), temp.path().join("letter"));
    fs::create_dir_all(&isbn_dir).unwrap();
    fs::create_dir_all(&word_dir).unwrap();

    let mut index = ShardedIndex::new();
    for isbn in ["9783", "9781", "9782"] {
        index.insert(isbn.into(), make_entry("Mismo Titulo"));
    }
    write_shards(&index, &isbn_dir, &word_dir, 3, &BuildProgress::hidden()).unwrap();

    let words = load_word_shards(&word_dir);
    assert_eq!(words["mis"]["mismo"], vec!["9781", "9782", "9783"]);
}

#[test]
fn test_missing_word_dir_fails_only_word_shards() {
    let temp = TempDir::new().unwrap();
    let isbn_dir = temp.path().join("isbn");
    let word_dir = temp.path().join("missing");
    fs::create_dir_all(&isbn_dir).unwrap();

    let index = sample_index();
    let summary = write_shards(&index, &isbn_dir, &word_dir, 2, &BuildProgress::hidden()).unwrap();

    assert_eq!(summary.isbn_shards_written, 3);
    assert_eq!(summary.word_shards_written, 0);
    assert_eq!(summary.failed.len(), index.word_shard_count());
    assert!(summary.failed.iter().all(|e| e.kind() == "write-shard"));
}

#[test]
fn test_summarize_written_dirs() {
    let temp = TempDir::new().unwrap();
    let (isbn_dir, word_dir) = (temp.path().join("isbn"), temp.path().join("letter"));
    fs::create_dir_all(&isbn_dir).unwrap();
    fs::create_dir_all(&word_dir).unwrap();
    write_shards(&sample_index(), &isbn_dir, &word_dir, 2, &BuildProgress::hidden()).unwrap();

    let isbn_summary = summarize_dir(&isbn_dir).unwrap();
    assert_eq!(isbn_summary.kind, Some(ShardKind::Isbn));
    assert_eq!(isbn_summary.shards, 3);
    assert_eq!(isbn_summary.keys, 3);
    assert!(isbn_summary.unreadable.is_empty());

    let word_summary = summarize_dir(&word_dir).unwrap();
    assert_eq!(word_summary.kind, Some(ShardKind::Word));
    assert_eq!(word_summary.keys, 5);
    assert_eq!(word_summary.postings, 5);
}

#[test]
fn test_path_like_shard_ids_stay_inside_output() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("index");
    let (isbn_dir, word_dir) = (root.join("isbn"), root.join("letter"));
    fs::create_dir_all(&isbn_dir).unwrap();
    fs::create_dir_all(&word_dir).unwrap();

    let mut index = ShardedIndex::new();
    // Words "/zq7xyz" and "../qx" shard to "/zq" and "../"
    index.insert("9780000000555".into(), make_entry("Historia /zq7xyz ../qx"));
    // ISBN shard "/12"
    index.insert("978/12".into(), make_entry("Rayuela"));

    let summary = write_shards(&index, &isbn_dir, &word_dir, 4, &BuildProgress::hidden()).unwrap();

    assert_eq!(summary.failed.len(), 3);
    assert!(summary.failed.iter().all(|e| e.kind() == "write-shard"));
    assert!(!Path::new("/zq.json").exists());
    assert!(!Path::new("/12.json").exists());
    assert!(!root.join(".json").exists());

    // Siblings of the rejected shards are still written
    assert_eq!(summary.isbn_shards_written, 1);
    assert!(isbn_dir.join("555.json").exists());
    assert!(word_dir.join("his.json").exists());
    assert!(word_dir.join("ray.json").exists());
    for dir in [&isbn_dir, &word_dir] {
        for entry in fs::read_dir(dir).unwrap() {
            assert_eq!(entry.unwrap().path().parent(), Some(dir.as_path()));
        }
    }
}

#[test]
fn test_run_build_reports_path_like_shards() {
    let input = TempDir::new().unwrap();
    write_batch(
        input.path(),
        "batch.json",
        &[("9780000000666", "libro-Historia /zq8xyz", "http://h")],
    );
    let output = TempDir::new().unwrap();
    let config = BuildConfig::with_output_root(input.path(), output.path());

    let report = run_build(&config).unwrap();
    assert_eq!(report.failed_shards.len(), 1);
    assert!(!report.is_clean());
    assert!(!Path::new("/zq.json").exists());
    assert!(config.word_output_dir.join("his.json").exists());
}
