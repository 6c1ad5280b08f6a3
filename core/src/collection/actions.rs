//! Collection actions
//!
//! Actions trigger evaluation: the chain is walked from the root to this
//! collection, partition by partition, on the local scheduler. Every action
//! re-evaluates the full chain; only a `persist`ed collection keeps its
//! materialization across actions.

use crate::collection::Collection;
use crate::scheduler::Task;
use crate::traits::{CollectionError, CollectionResult, Data, Partition};
use std::sync::Arc;
use tracing::debug;

impl<T: Data> Collection<T> {
    fn tasks(&self) -> Vec<Task<T>> {
        let node = self.node.clone();
        self.node
            .partitions()
            .into_iter()
            .map(|partition| {
                let node = node.clone();
                Task::new(
                    partition,
                    Arc::new(move |p: &dyn Partition| node.compute(p)),
                )
            })
            .collect()
    }

    /// Materialize every element in the chain's defined order.
    pub fn collect(&self) -> CollectionResult<Vec<T>> {
        debug!(
            collection = self.id(),
            partitions = self.num_partitions(),
            "collect"
        );
        self.scheduler.execute_and_collect(self.tasks())
    }

    /// Count the number of elements.
    pub fn count(&self) -> CollectionResult<usize> {
        debug!(collection = self.id(), "count");
        self.scheduler.execute_and_count(self.tasks())
    }

    /// Take the first `n` elements in defined order. Returns everything when
    /// fewer than `n` elements exist; never an error.
    ///
    /// Partitions are computed one at a time, so a satisfied prefix stops
    /// the walk early.
    pub fn take(&self, n: usize) -> CollectionResult<Vec<T>> {
        let mut result = Vec::new();
        if n == 0 {
            return Ok(result);
        }

        for partition in self.node.partitions() {
            if result.len() >= n {
                break;
            }

            let partition_data = self.node.compute(partition.as_ref())?;
            let remaining = n - result.len();

            if partition_data.len() <= remaining {
                result.extend(partition_data);
            } else {
                result.extend(partition_data.into_iter().take(remaining));
            }
        }

        Ok(result)
    }

    /// Get the first element, or `None` when the collection is empty.
    pub fn first(&self) -> CollectionResult<Option<T>> {
        for partition in self.node.partitions() {
            let partition_data = self.node.compute(partition.as_ref())?;
            if let Some(first_element) = partition_data.into_iter().next() {
                return Ok(Some(first_element));
            }
        }

        Ok(None)
    }

    /// Fold all elements with `combine`. Fails with `EmptyCollection` on a
    /// zero-element collection; on a singleton the element is returned
    /// without invoking `combine`.
    pub fn reduce<F>(&self, combine: F) -> CollectionResult<T>
    where
        F: Fn(T, T) -> T + Send + Sync,
    {
        debug!(collection = self.id(), "reduce");
        self.scheduler
            .execute_and_reduce(self.tasks(), combine)?
            .ok_or(CollectionError::EmptyCollection)
    }

    /// Apply `f` to every element for its side effect only.
    ///
    /// Visit order across parallel workers is unspecified; side effects must
    /// be commutative and associative (an `Accumulator::add`, typically).
    pub fn foreach<F>(&self, f: F) -> CollectionResult<()>
    where
        F: Fn(&T) + Send + Sync,
    {
        debug!(collection = self.id(), "foreach");
        self.scheduler.execute_foreach(self.tasks(), f)
    }
}
