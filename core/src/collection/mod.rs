//! Collection implementations
//!
//! This module contains the `Collection` handle and the operation nodes that
//! make up a collection's derivation chain. Transformations are lazy: each
//! one allocates a new node pointing at its parent and touches no data.
//! Materialization happens in `actions`.

pub mod actions;
pub mod aggregated;
pub mod cached;
pub mod source;
pub mod transforms;

pub use aggregated::{AggregatedCollection, Aggregator, GroupAggregator, ReduceAggregator};
pub use cached::{CachedCollection, StorageLevel};
pub use source::{SequenceCollection, TextFileCollection};
pub use transforms::{FilteredCollection, FlatMappedCollection, MappedCollection};

pub use aggregated::PairCollection;

use crate::scheduler::LocalScheduler;
use crate::traits::{CollectionBase, Data};
use std::hash::Hash;
use std::sync::Arc;

/// An immutable handle over a lazily evaluated sequence of elements.
///
/// Cloning a `Collection` is cheap and shares the underlying node, so one
/// collection can be the upstream of several derived chains.
#[derive(Debug, Clone)]
pub struct Collection<T: Data> {
    pub(crate) node: Arc<dyn CollectionBase<Item = T>>,
    pub(crate) cache: Option<Arc<CachedCollection<T>>>,
    pub(crate) scheduler: Arc<LocalScheduler>,
}

impl<T: Data> Collection<T> {
    pub(crate) fn new(
        node: Arc<dyn CollectionBase<Item = T>>,
        scheduler: Arc<LocalScheduler>,
    ) -> Self {
        Self {
            node,
            cache: None,
            scheduler,
        }
    }

    /// Get the unique ID of the underlying node
    pub fn id(&self) -> usize {
        self.node.id()
    }

    /// Get the number of partitions
    pub fn num_partitions(&self) -> usize {
        self.node.num_partitions()
    }

    /// Apply a function to each element, producing a new lazy collection.
    /// Order preserving.
    pub fn map<U, F>(&self, f: F) -> Collection<U>
    where
        U: Data,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        Collection::new(
            Arc::new(MappedCollection::new(self.node.clone(), Arc::new(f))),
            self.scheduler.clone(),
        )
    }

    /// Apply a function yielding zero or more elements per input element; the
    /// output is the concatenation of the per-element sequences in input
    /// order.
    pub fn flat_map<U, I, F>(&self, f: F) -> Collection<U>
    where
        U: Data,
        I: IntoIterator<Item = U>,
        F: Fn(T) -> I + Send + Sync + 'static,
    {
        let f = Arc::new(move |item: T| f(item).into_iter().collect::<Vec<U>>());
        Collection::new(
            Arc::new(FlatMappedCollection::new(self.node.clone(), f)),
            self.scheduler.clone(),
        )
    }

    /// Keep only the elements for which the predicate holds, preserving order.
    pub fn filter<F>(&self, predicate: F) -> Collection<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Collection::new(
            Arc::new(FilteredCollection::new(
                self.node.clone(),
                Arc::new(predicate),
            )),
            self.scheduler.clone(),
        )
    }

    /// Pair each element with a key derived from it.
    pub fn key_by<K, F>(&self, key_fn: F) -> Collection<(K, T)>
    where
        K: Data,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.map(move |item| (key_fn(&item), item))
    }

    /// Group elements by a derived key.
    ///
    /// Produces one `(key, values)` entry per distinct key. Within a group,
    /// values keep the first-seen relative order of the source collection;
    /// the order of the groups themselves is unspecified.
    pub fn group_by<K, F>(&self, key_fn: F) -> Collection<(K, Vec<T>)>
    where
        K: Data + Hash + Eq,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.key_by(key_fn).group_by_key()
    }

    /// Mark this collection for in-memory caching.
    ///
    /// The returned collection materializes each partition once on first
    /// evaluation and serves later actions (over it or its descendants) from
    /// the cached data until `unpersist` is called.
    pub fn persist(&self) -> Collection<T> {
        let cached = Arc::new(CachedCollection::new(self.node.clone()));
        Collection {
            node: cached.clone(),
            cache: Some(cached),
            scheduler: self.scheduler.clone(),
        }
    }

    /// Alias for `persist`.
    pub fn cache(&self) -> Collection<T> {
        self.persist()
    }

    /// Release cached partitions, if any. A no-op on un-persisted collections.
    pub fn unpersist(&self) {
        if let Some(cached) = &self.cache {
            cached.evict();
        }
    }

    /// The storage level of this handle
    pub fn storage_level(&self) -> StorageLevel {
        match &self.cache {
            Some(_) => StorageLevel::Memory,
            None => StorageLevel::None,
        }
    }

    /// Whether this handle was created by `persist`/`cache`
    pub fn is_cached(&self) -> bool {
        self.storage_level().is_cached()
    }
}
