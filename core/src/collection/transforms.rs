//! Element-wise transformation nodes: map, flat-map, filter.
//!
//! Each node holds an `Arc` to its parent and the user function; computing a
//! partition computes the same partition of the parent and applies the
//! function element-wise, so these are all narrow, order-preserving steps.

use crate::traits::{CollectionBase, CollectionResult, Data, Partition, next_collection_id};
use std::fmt::Debug;
use std::sync::Arc;

/// Collection node that applies a function to every parent element.
pub struct MappedCollection<T: Data, U: Data> {
    id: usize,
    parent: Arc<dyn CollectionBase<Item = T>>,
    f: Arc<dyn Fn(T) -> U + Send + Sync>,
}

impl<T: Data, U: Data> MappedCollection<T, U> {
    pub fn new(parent: Arc<dyn CollectionBase<Item = T>>, f: Arc<dyn Fn(T) -> U + Send + Sync>) -> Self {
        Self {
            id: next_collection_id(),
            parent,
            f,
        }
    }
}

impl<T: Data, U: Data> Debug for MappedCollection<T, U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappedCollection")
            .field("id", &self.id)
            .field("parent", &self.parent)
            .field("f", &"<map_function>")
            .finish()
    }
}

impl<T: Data, U: Data> CollectionBase for MappedCollection<T, U> {
    type Item = U;

    fn id(&self) -> usize {
        self.id
    }

    fn compute(&self, partition: &dyn Partition) -> CollectionResult<Vec<U>> {
        let parent_data = self.parent.compute(partition)?;
        Ok(parent_data.into_iter().map(|item| (self.f)(item)).collect())
    }

    fn num_partitions(&self) -> usize {
        self.parent.num_partitions()
    }
}

/// Collection node that expands every parent element into zero or more
/// output elements, concatenated in input order.
pub struct FlatMappedCollection<T: Data, U: Data> {
    id: usize,
    parent: Arc<dyn CollectionBase<Item = T>>,
    f: Arc<dyn Fn(T) -> Vec<U> + Send + Sync>,
}

impl<T: Data, U: Data> FlatMappedCollection<T, U> {
    pub fn new(
        parent: Arc<dyn CollectionBase<Item = T>>,
        f: Arc<dyn Fn(T) -> Vec<U> + Send + Sync>,
    ) -> Self {
        Self {
            id: next_collection_id(),
            parent,
            f,
        }
    }
}

impl<T: Data, U: Data> Debug for FlatMappedCollection<T, U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlatMappedCollection")
            .field("id", &self.id)
            .field("parent", &self.parent)
            .field("f", &"<flat_map_function>")
            .finish()
    }
}

impl<T: Data, U: Data> CollectionBase for FlatMappedCollection<T, U> {
    type Item = U;

    fn id(&self) -> usize {
        self.id
    }

    fn compute(&self, partition: &dyn Partition) -> CollectionResult<Vec<U>> {
        let parent_data = self.parent.compute(partition)?;
        Ok(parent_data
            .into_iter()
            .flat_map(|item| (self.f)(item))
            .collect())
    }

    fn num_partitions(&self) -> usize {
        self.parent.num_partitions()
    }
}

/// Collection node that keeps the parent elements matching a predicate.
pub struct FilteredCollection<T: Data> {
    id: usize,
    parent: Arc<dyn CollectionBase<Item = T>>,
    predicate: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T: Data> FilteredCollection<T> {
    pub fn new(
        parent: Arc<dyn CollectionBase<Item = T>>,
        predicate: Arc<dyn Fn(&T) -> bool + Send + Sync>,
    ) -> Self {
        Self {
            id: next_collection_id(),
            parent,
            predicate,
        }
    }
}

impl<T: Data> Debug for FilteredCollection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilteredCollection")
            .field("id", &self.id)
            .field("parent", &self.parent)
            .field("predicate", &"<filter_predicate>")
            .finish()
    }
}

impl<T: Data> CollectionBase for FilteredCollection<T> {
    type Item = T;

    fn id(&self) -> usize {
        self.id
    }

    fn compute(&self, partition: &dyn Partition) -> CollectionResult<Vec<T>> {
        let parent_data = self.parent.compute(partition)?;
        Ok(parent_data
            .into_iter()
            .filter(|item| (self.predicate)(item))
            .collect())
    }

    fn num_partitions(&self) -> usize {
        self.parent.num_partitions()
    }
}
