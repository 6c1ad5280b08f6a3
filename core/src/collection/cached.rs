//! Collection node that caches materialized partitions in memory.

use crate::traits::{
    CollectionBase, CollectionError, CollectionResult, Data, Partition, next_collection_id,
};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use tracing::{debug, trace};

/// Defines how a collection's materialized result is retained across actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StorageLevel {
    /// No caching; every action re-evaluates the chain
    #[default]
    None,
    /// Cache materialized partitions in memory for the process lifetime
    Memory,
}

impl StorageLevel {
    /// Check if caching is enabled
    pub fn is_cached(&self) -> bool {
        matches!(self, StorageLevel::Memory)
    }
}

/// Wrapper node that adds in-memory caching to any collection chain.
///
/// Each partition has its own slot: the first `compute` fills it from the
/// parent, later calls serve the cached copy until `evict` clears it.
pub struct CachedCollection<T: Data> {
    id: usize,
    parent: Arc<dyn CollectionBase<Item = T>>,
    slots: Vec<RwLock<Option<Vec<T>>>>,
}

impl<T: Data> CachedCollection<T> {
    pub fn new(parent: Arc<dyn CollectionBase<Item = T>>) -> Self {
        let slots = (0..parent.num_partitions())
            .map(|_| RwLock::new(None))
            .collect();
        Self {
            id: next_collection_id(),
            parent,
            slots,
        }
    }

    /// The storage level of this node
    pub fn storage_level(&self) -> StorageLevel {
        StorageLevel::Memory
    }

    /// Drop all cached partitions; the next action recomputes from the parent.
    pub fn evict(&self) {
        for slot in &self.slots {
            if let Ok(mut slot) = slot.write() {
                *slot = None;
            }
        }
        debug!(collection = self.id, "evicted cached partitions");
    }

    /// Number of partitions currently held in the cache
    pub fn cached_partitions(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot.read().as_deref(), Ok(Some(_))))
            .count()
    }
}

impl<T: Data> Debug for CachedCollection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedCollection")
            .field("id", &self.id)
            .field("parent", &self.parent)
            .field("cached_partitions", &self.cached_partitions())
            .finish()
    }
}

fn lock_poisoned() -> CollectionError {
    CollectionError::Computation("cache lock poisoned".to_string())
}

impl<T: Data> CollectionBase for CachedCollection<T> {
    type Item = T;

    fn id(&self) -> usize {
        self.id
    }

    fn compute(&self, partition: &dyn Partition) -> CollectionResult<Vec<T>> {
        let index = partition.index();
        let slot = self
            .slots
            .get(index)
            .ok_or(CollectionError::InvalidPartition(index))?;

        if let Some(data) = slot.read().map_err(|_| lock_poisoned())?.as_ref() {
            trace!(collection = self.id, partition = index, "cache hit");
            return Ok(data.clone());
        }

        let data = self.parent.compute(partition)?;
        *slot.write().map_err(|_| lock_poisoned())? = Some(data.clone());
        debug!(collection = self.id, partition = index, "cached partition");
        Ok(data)
    }

    fn num_partitions(&self) -> usize {
        self.slots.len()
    }
}
