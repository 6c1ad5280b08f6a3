//! Local task scheduler
//!
//! Runs the partitions of a triggered action in parallel on Rayon's thread
//! pool. Per-partition results are recombined in partition-index order, so an
//! action over a pure pipeline produces the same result as sequential
//! left-to-right evaluation.

use crate::traits::{CollectionResult, Partition};
use rayon::prelude::*;
use std::fmt::Debug;
use std::sync::Arc;

/// Type alias for the partition compute function carried by a task
pub type ComputeFn<T> = Arc<dyn Fn(&dyn Partition) -> CollectionResult<Vec<T>> + Send + Sync>;

/// Task represents a unit of work: one partition of one collection chain
pub struct Task<T> {
    partition: Arc<dyn Partition>,
    compute_fn: ComputeFn<T>,
}

impl<T> Debug for Task<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("partition", &self.partition)
            .field("compute_fn", &"<function>")
            .finish()
    }
}

impl<T> Task<T> {
    pub fn new(partition: Arc<dyn Partition>, compute_fn: ComputeFn<T>) -> Self {
        Self {
            partition,
            compute_fn,
        }
    }

    pub fn execute(&self) -> CollectionResult<Vec<T>> {
        (self.compute_fn)(self.partition.as_ref())
    }
}

/// LocalScheduler manages parallel execution of tasks using Rayon
#[derive(Debug)]
pub struct LocalScheduler {
    /// Number of worker threads this scheduler assumes
    num_threads: usize,
}

impl LocalScheduler {
    /// Create a new LocalScheduler with the specified number of threads
    pub fn new(num_threads: usize) -> Self {
        Self {
            num_threads: num_threads.max(1),
        }
    }

    /// Create a new LocalScheduler sized to the machine's CPU count
    pub fn with_default_threads() -> Self {
        Self {
            num_threads: num_cpus::get(),
        }
    }

    /// Get the number of threads
    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    /// Execute a collection of tasks in parallel, one result vector per task
    pub fn execute_tasks<T>(&self, tasks: Vec<Task<T>>) -> CollectionResult<Vec<Vec<T>>>
    where
        T: Send + Sync + Debug,
    {
        tasks.into_par_iter().map(|task| task.execute()).collect()
    }

    /// Execute a collection of tasks and concatenate the results in task order
    pub fn execute_and_collect<T>(&self, tasks: Vec<Task<T>>) -> CollectionResult<Vec<T>>
    where
        T: Send + Sync + Debug,
    {
        let partition_results = self.execute_tasks(tasks)?;
        let mut result = Vec::new();
        for partition_data in partition_results {
            result.extend(partition_data);
        }
        Ok(result)
    }

    /// Execute a collection of tasks and count the total number of elements
    pub fn execute_and_count<T>(&self, tasks: Vec<Task<T>>) -> CollectionResult<usize>
    where
        T: Send + Sync + Debug,
    {
        tasks
            .into_par_iter()
            .map(|task| {
                let partition_data = task.execute()?;
                Ok(partition_data.len())
            })
            .sum()
    }

    /// Execute a collection of tasks and fold all elements with `combine`.
    ///
    /// Each partition is folded independently; the per-partition results are
    /// then combined in partition order. Returns `None` when every partition
    /// is empty, since no identity element is assumed.
    pub fn execute_and_reduce<T, F>(
        &self,
        tasks: Vec<Task<T>>,
        combine: F,
    ) -> CollectionResult<Option<T>>
    where
        T: Send + Sync + Debug,
        F: Fn(T, T) -> T + Send + Sync,
    {
        let partials: CollectionResult<Vec<Option<T>>> = tasks
            .into_par_iter()
            .map(|task| {
                let partition_data = task.execute()?;
                Ok(partition_data.into_iter().reduce(&combine))
            })
            .collect();

        Ok(partials?.into_iter().flatten().reduce(combine))
    }

    /// Execute a collection of tasks with a side effect function (foreach)
    pub fn execute_foreach<T, F>(&self, tasks: Vec<Task<T>>, foreach_fn: F) -> CollectionResult<()>
    where
        T: Send + Sync + Debug,
        F: Fn(&T) + Send + Sync,
    {
        tasks
            .into_par_iter()
            .map(|task| {
                let partition_data = task.execute()?;
                partition_data.iter().for_each(&foreach_fn);
                Ok(())
            })
            .collect()
    }
}

impl Default for LocalScheduler {
    fn default() -> Self {
        Self::with_default_threads()
    }
}
