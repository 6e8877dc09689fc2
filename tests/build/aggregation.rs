//! Tests for aggregating records into the ISBN and word indices.

use bookshard::build::aggregate;
use bookshard::build::ShardedIndex;
use bookshard::{is_stop_word, isbn_shard, word_shard, BookEntry, BookRecord};
use crossbeam_channel::bounded;

use super::common::make_entry;

fn index_of(books: &[(&str, &str)]) -> ShardedIndex {
    let mut index = ShardedIndex::new();
    for (isbn, title) in books {
        index.insert(isbn.to_string(), make_entry(title));
    }
    index
}

#[test]
fn test_gato_negro_lands_in_expected_shards() {
    let index = index_of(&[("978-1", "El Gato Negro")]);

    let shard = &index.isbns()["8-1"];
    assert_eq!(shard["978-1"].title, "El Gato Negro");

    assert!(index.words()["gat"]["gato"].contains("978-1"));
    assert!(index.words()["neg"]["negro"].contains("978-1"));
    // "el" is short and a stop word
    assert!(index.isbns_for_word("el").is_none());
    assert_eq!(index.word_count(), 2);
}

#[test]
fn test_last_write_wins_for_duplicate_isbn() {
    let index = index_of(&[("9780000000001", "Primera Versión"), ("9780000000001", "Segunda Edición")]);

    assert_eq!(index.isbn_count(), 1);
    assert_eq!(index.book("9780000000001").unwrap().title, "Segunda Edición");
    assert_eq!(index.duplicate_isbns(), 1);
    assert_eq!(index.records(), 2);
    // Words of the replaced title stay in the word index
    assert!(index.isbns_for_word("primera").unwrap().contains("9780000000001"));
    assert!(index.isbns_for_word("segunda").unwrap().contains("9780000000001"));
}

#[test]
fn test_repeated_word_posts_isbn_once() {
    let index = index_of(&[("9781", "Café café CAFÉ")]);
    let isbns = index.isbns_for_word("cafe").unwrap();
    assert_eq!(isbns.len(), 1);
    assert!(isbns.contains("9781"));
    assert_eq!(index.word_count(), 1);
}

#[test]
fn test_hyphenated_title_indexes_both_halves() {
    let index = index_of(&[("9786070707070", "Ciencia-Ficción para Todos")]);

    let cie = &index.words()["cie"];
    assert!(cie.contains_key("ciencia"));
    assert!(index.words()["fic"].contains_key("ficcion"));
    assert!(index.words()["tod"].contains_key("todos"));
    assert!(index.isbns_for_word("para").is_none());
}

#[test]
fn test_shared_word_collects_isbns() {
    let index = index_of(&[
        ("9780000000111", "Historia del Arte"),
        ("9780000000222", "Historia Natural"),
        ("9780000000333", "Arte Moderno"),
    ]);

    assert_eq!(index.isbns_for_word("historia").unwrap().len(), 2);
    assert_eq!(index.isbns_for_word("arte").unwrap().len(), 2);
    assert_eq!(index.isbn_shard_count(), 3);
}

#[test]
fn test_every_key_in_its_own_shard() {
    let index = index_of(&[
        ("9788420412147", "El Gato Negro"),
        ("9780307474728", "Cien Años de Soledad"),
        ("9781234567897", "Café de la Luna"),
        ("12", "Ab Cd Efg"),
    ]);

    for (shard_id, books) in index.isbns() {
        for isbn in books.keys() {
            assert_eq!(isbn_shard(isbn), shard_id);
        }
    }
    for (shard_id, words) in index.words() {
        for word in words.keys() {
            assert_eq!(word_shard(word), shard_id);
            assert!(word.chars().count() > 2, "short word {:?} indexed", word);
            assert!(!is_stop_word(word), "stop word {:?} indexed", word);
        }
    }
    // Short ISBN is its own shard id
    assert!(index.isbns().contains_key("12"));
}

#[test]
fn test_title_without_terms_still_indexed_by_isbn() {
    let index = index_of(&[("9780000000444", "De la y el")]);
    assert_eq!(index.isbn_count(), 1);
    assert_eq!(index.word_count(), 0);
    assert!(!index.is_empty());
}

#[test]
fn test_aggregator_thread_drains_until_closed() {
    let (tx, rx) = bounded(4);
    let handle = aggregate::spawn(rx).unwrap();

    for i in 0..100 {
        tx.send(BookRecord {
            isbn: format!("97800000{:05}", i),
            entry: BookEntry::new("libro Gato", "http://x"),
        })
        .unwrap();
    }
    drop(tx);

    let index = handle.join().unwrap();
    assert_eq!(index.isbn_count(), 100);
    // "libro" is a stop word even without the prefix
    assert!(index.isbns_for_word("libro").is_none());
    assert_eq!(index.isbns_for_word("gato").unwrap().len(), 100);
}
