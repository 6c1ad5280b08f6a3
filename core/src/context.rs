//! FlintContext - driver-side session for building collections
//!
//! The context is the explicit entry point of the engine: it builds root
//! collections from in-memory data or text files, hands out shared-state
//! primitives, and owns the local scheduler that actions run on. There is no
//! ambient global context.

use crate::accumulator::{Accumulator, AccumulatorOp};
use crate::broadcast::Broadcast;
use crate::collection::Collection;
use crate::collection::source::{SequenceCollection, TextFileCollection};
use crate::scheduler::LocalScheduler;
use crate::traits::{CollectionResult, Data};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// FlintContext manages collection construction and shared state for one
/// logical session
#[derive(Debug)]
pub struct FlintContext {
    app_name: String,
    scheduler: Arc<LocalScheduler>,
    default_parallelism: usize,
}

impl FlintContext {
    /// Create a new FlintContext with the given application name
    pub fn new(app_name: impl Into<String>) -> Self {
        Self::with_scheduler(app_name, LocalScheduler::with_default_threads())
    }

    /// Create a new FlintContext with a specific worker thread count
    pub fn new_with_threads(app_name: impl Into<String>, threads: usize) -> Self {
        Self::with_scheduler(app_name, LocalScheduler::new(threads))
    }

    fn with_scheduler(app_name: impl Into<String>, scheduler: LocalScheduler) -> Self {
        let app_name = app_name.into();
        let default_parallelism = scheduler.num_threads();
        info!(
            app = %app_name,
            parallelism = default_parallelism,
            "created context"
        );
        Self {
            app_name,
            scheduler: Arc::new(scheduler),
            default_parallelism,
        }
    }

    /// Get the application name
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Partition count used when the caller does not pick one
    pub fn default_parallelism(&self) -> usize {
        self.default_parallelism
    }

    /// Create a collection from an in-memory sequence, partitioned by the
    /// context's default parallelism
    pub fn parallelize<T: Data>(&self, data: Vec<T>) -> Collection<T> {
        self.parallelize_with_partitions(data, self.default_parallelism)
    }

    /// Create a collection from an in-memory sequence with an explicit
    /// partition count
    pub fn parallelize_with_partitions<T: Data>(
        &self,
        data: Vec<T>,
        num_partitions: usize,
    ) -> Collection<T> {
        Collection::new(
            Arc::new(SequenceCollection::new(data, num_partitions)),
            self.scheduler.clone(),
        )
    }

    /// Create a collection of lines from a newline-delimited text file.
    ///
    /// Fails with `SourceNotFound` here, at construction, when the path
    /// cannot be opened.
    pub fn text_file<P: AsRef<Path>>(&self, path: P) -> CollectionResult<Collection<String>> {
        self.text_file_with_partitions(path, 1)
    }

    /// `text_file` with an explicit partition count
    pub fn text_file_with_partitions<P: AsRef<Path>>(
        &self,
        path: P,
        num_partitions: usize,
    ) -> CollectionResult<Collection<String>> {
        let source = TextFileCollection::open(path, num_partitions)?;
        Ok(Collection::new(
            Arc::new(source),
            self.scheduler.clone(),
        ))
    }

    /// Create a broadcast variable from a driver-side value
    pub fn broadcast<T: Data>(&self, value: T) -> Broadcast<T> {
        Broadcast::new(value)
    }

    /// Create a named accumulator backed by the given operation
    pub fn accumulator<T: Data>(
        &self,
        name: impl Into<String>,
        op: Arc<dyn AccumulatorOp<T>>,
    ) -> Arc<Accumulator<T>> {
        Arc::new(Accumulator::new(name.into(), op))
    }
}

impl Default for FlintContext {
    fn default() -> Self {
        Self::new("flint-app")
    }
}
