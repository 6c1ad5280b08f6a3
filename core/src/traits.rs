//! Core traits for the Flint collection engine.
//!
//! This module defines the fundamental abstractions: the `Data` marker for
//! element types, logical partitions, the operation-node trait every
//! collection variant implements, and the engine's error type.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

/// Error types for collection operations
#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("Computation failed: {0}")]
    Computation(String),

    #[error("Source not found: {0}")]
    SourceNotFound(String),

    #[error("Cannot reduce an empty collection")]
    EmptyCollection,

    #[error("Invalid partition: {0}")]
    InvalidPartition(usize),

    #[error("IO operation failed: {0}")]
    Io(String),
}

/// Result type for collection operations
pub type CollectionResult<T> = Result<T, CollectionError>;

impl From<flint_common::CommonError> for CollectionError {
    fn from(err: flint_common::CommonError) -> Self {
        use flint_common::CommonError;
        match err {
            CommonError::NotFoundError { message, .. } => CollectionError::SourceNotFound(message),
            CommonError::IoError { message, .. } => CollectionError::Io(message),
            other => CollectionError::Computation(other.to_string()),
        }
    }
}

/// Partition represents a logical partition of data in a collection
pub trait Partition: Send + Sync + Debug {
    /// Get the partition index
    fn index(&self) -> usize;

    /// Get a unique identifier for this partition
    fn id(&self) -> String {
        format!("partition_{}", self.index())
    }
}

/// Basic partition implementation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicPartition {
    index: usize,
}

impl BasicPartition {
    pub fn new(index: usize) -> Self {
        Self { index }
    }
}

impl Partition for BasicPartition {
    fn index(&self) -> usize {
        self.index
    }
}

/// A data type that can be used as a collection element.
pub trait Data: Send + Sync + Clone + Debug + 'static {}
impl<T> Data for T where T: Send + Sync + Clone + Debug + 'static {}

/// One deferred operation node in a collection's derivation chain.
///
/// Nodes are immutable once constructed and may be shared by several
/// downstream chains. Materialization only happens through `compute`, which
/// is driven by an action on some descendant.
pub trait CollectionBase: Send + Sync + Debug {
    type Item: Data;

    /// Get a unique ID for this node.
    fn id(&self) -> usize;

    /// Compute the elements of this node for the given partition.
    fn compute(&self, partition: &dyn Partition) -> CollectionResult<Vec<Self::Item>>;

    /// Get the number of partitions
    fn num_partitions(&self) -> usize;

    /// Get the list of partitions for this node
    fn partitions(&self) -> Vec<Arc<dyn Partition>> {
        (0..self.num_partitions())
            .map(|i| Arc::new(BasicPartition::new(i)) as Arc<dyn Partition>)
            .collect()
    }
}

static NEXT_COLLECTION_ID: AtomicUsize = AtomicUsize::new(0);

/// Allocate a process-unique id for a collection node.
pub(crate) fn next_collection_id() -> usize {
    NEXT_COLLECTION_ID.fetch_add(1, Ordering::Relaxed)
}
