//! Integration tests for text file sources.

mod common;

use common::*;
use flint_core::{CollectionError, PairCollection};
use std::io::Write;
use std::path::PathBuf;

fn write_fixture(dir: &tempfile::TempDir, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    path
}

#[test]
fn test_text_file_one_element_per_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "readme.txt", &["first line", "second line", ""]);

    let context = create_test_context("text-file");
    let lines = context.text_file(&path).unwrap().collect().unwrap();

    // newline stripped, blank lines kept
    assert_eq!(lines, vec!["first line", "second line", ""]);
}

#[test]
fn test_text_file_missing_path_fails_at_construction() {
    let context = create_test_context("text-file-missing");
    let err = context.text_file("/no/such/path.txt").unwrap_err();

    assert!(matches!(err, CollectionError::SourceNotFound(_)));
}

#[test]
fn test_text_file_partitioned_collect_preserves_order() {
    let dir = tempfile::tempdir().unwrap();
    let expected: Vec<String> = (0..25).map(|i| format!("line {i}")).collect();
    let refs: Vec<&str> = expected.iter().map(String::as_str).collect();
    let path = write_fixture(&dir, "big.txt", &refs);

    let context = create_test_context("text-file-partitions");
    let collection = context.text_file_with_partitions(&path, 4).unwrap();

    assert_eq!(collection.num_partitions(), 4);
    assert_eq!(collection.collect().unwrap(), expected);
}

#[test]
fn test_text_file_filter_and_count() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(
        &dir,
        "log.txt",
        &["flint is lazy", "nothing here", "flint again"],
    );

    let context = create_test_context("text-file-filter");
    let collection = context.text_file(&path).unwrap();

    let matching = collection.filter(|line| line.contains("flint"));
    assert_eq!(matching.count().unwrap(), 2);
}

#[test]
fn test_text_file_word_count_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "words.txt", &["a b a", "b a"]);

    let context = create_test_context("word-count");
    let counts: std::collections::HashMap<String, i32> = context
        .text_file(&path)
        .unwrap()
        .flat_map(|line| {
            line.split(' ')
                .map(str::to_string)
                .collect::<Vec<String>>()
        })
        .map(|word| (word, 1))
        .reduce_by_key(|a, b| a + b)
        .collect()
        .unwrap()
        .into_iter()
        .collect();

    assert_eq!(counts.get("a"), Some(&3));
    assert_eq!(counts.get("b"), Some(&2));
}
