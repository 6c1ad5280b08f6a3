//! Integration tests for persist/unpersist semantics.
//!
//! Whether a chain re-evaluates is observed through a counting side effect in
//! a mapped function: un-persisted chains run it once per element per action,
//! persisted chains once per element total.

mod common;

use common::*;
use flint_core::{Collection, StorageLevel};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn counting_pipeline(
    context: &flint_core::FlintContext,
    data: Vec<i32>,
    partitions: usize,
) -> (Collection<i32>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_in_map = calls.clone();
    let collection = context
        .parallelize_with_partitions(data, partitions)
        .map(move |x| {
            calls_in_map.fetch_add(1, Ordering::SeqCst);
            x + 1
        });
    (collection, calls)
}

#[test]
fn test_unpersisted_actions_reevaluate() {
    let context = create_test_context("no-cache");
    let (collection, calls) = counting_pipeline(&context, (0..10).collect(), 2);

    collection.collect().unwrap();
    collection.collect().unwrap();

    // two full evaluations
    assert_eq!(calls.load(Ordering::SeqCst), 20);
}

#[test]
fn test_persist_reuses_first_materialization() {
    let context = create_test_context("persist");
    let (collection, calls) = counting_pipeline(&context, (0..10).collect(), 2);
    let persisted = collection.persist();

    let first = persisted.collect().unwrap();
    let second = persisted.collect().unwrap();

    assert_eq!(first, second);
    assert_eq!(calls.load(Ordering::SeqCst), 10);
}

#[test]
fn test_persisted_collection_serves_descendants() {
    let context = create_test_context("persist-descendants");
    let (collection, calls) = counting_pipeline(&context, (0..10).collect(), 2);
    let persisted = collection.persist();

    persisted.collect().unwrap();
    let odds = persisted.filter(|x| x % 2 == 1);
    assert_eq!(odds.count().unwrap(), 5);

    assert_eq!(calls.load(Ordering::SeqCst), 10);
}

#[test]
fn test_unpersist_forces_recompute() {
    let context = create_test_context("unpersist");
    let (collection, calls) = counting_pipeline(&context, (0..10).collect(), 2);
    let persisted = collection.persist();

    persisted.collect().unwrap();
    persisted.unpersist();
    persisted.collect().unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 20);
}

#[test]
fn test_unpersist_on_plain_collection_is_noop() {
    let context = create_test_context("unpersist-noop");
    let collection = context.parallelize(vec![1, 2, 3]);

    collection.unpersist();
    assert_eq!(collection.collect().unwrap(), vec![1, 2, 3]);
}

#[test]
fn test_storage_level_reporting() {
    let context = create_test_context("storage-level");
    let collection = context.parallelize(vec![1, 2, 3]);

    assert_eq!(collection.storage_level(), StorageLevel::None);
    assert!(!collection.is_cached());

    let cached = collection.cache();
    assert_eq!(cached.storage_level(), StorageLevel::Memory);
    assert!(cached.is_cached());

    // the original handle is untouched
    assert!(!collection.is_cached());
}

#[test]
fn test_persist_does_not_eagerly_materialize() {
    let context = create_test_context("persist-lazy");
    let (collection, calls) = counting_pipeline(&context, (0..10).collect(), 2);
    let _persisted = collection.persist();

    // persist is a marker, not an action
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
