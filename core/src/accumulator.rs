//! Accumulator implementation
//!
//! Accumulators are variables that are only "added" to through an associative
//! and commutative operation and can therefore be safely updated from
//! parallel workers. They can be used to implement counters or sums.
//!
//! `value` is a driver-side read: it is well-defined only after every action
//! that may call `add` has returned. Reading while an action is still running
//! yields a partial value; the engine does not detect or correct this.

use crate::traits::Data;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock, RwLockWriteGuard};
use uuid::Uuid;

/// Unique identifier for an accumulator
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccumulatorId(pub String);

impl AccumulatorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for AccumulatorId {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for accumulator operations
pub trait AccumulatorOp<T>: Send + Sync + std::fmt::Debug {
    /// Add a value to the accumulator
    fn add(&self, current: T, value: T) -> T;

    /// Get the zero/identity value for this accumulator
    fn zero(&self) -> T;
}

/// Simple sum accumulator for numeric types
#[derive(Debug, Clone)]
pub struct SumAccumulator<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> SumAccumulator<T> {
    pub fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T> Default for SumAccumulator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AccumulatorOp<T> for SumAccumulator<T>
where
    T: std::ops::Add<Output = T> + Default + Clone + Send + Sync + std::fmt::Debug,
{
    fn add(&self, current: T, value: T) -> T {
        current + value
    }

    fn zero(&self) -> T {
        T::default()
    }
}

/// Count accumulator for counting occurrences
#[derive(Debug, Clone)]
pub struct CountAccumulator;

impl AccumulatorOp<u64> for CountAccumulator {
    fn add(&self, current: u64, _value: u64) -> u64 {
        current + 1
    }

    fn zero(&self) -> u64 {
        0
    }
}

/// Accumulator variable that can be updated from worker closures
#[derive(Debug)]
pub struct Accumulator<T: Data> {
    id: AccumulatorId,
    name: String,
    /// Current value; only meaningful to the driver between actions
    value: RwLock<T>,
    op: Arc<dyn AccumulatorOp<T>>,
}

impl<T: Data> Accumulator<T> {
    /// Create a new accumulator starting at the operation's zero value
    pub fn new(name: String, op: Arc<dyn AccumulatorOp<T>>) -> Self {
        let zero = op.zero();
        Self::with_initial(name, op, zero)
    }

    /// Create a new accumulator starting at an explicit initial value
    pub fn with_initial(name: String, op: Arc<dyn AccumulatorOp<T>>, initial: T) -> Self {
        Self {
            id: AccumulatorId::new(),
            name,
            value: RwLock::new(initial),
            op,
        }
    }

    // A poisoned lock only happens after a worker panic, which already
    // propagates out of the triggering action; the stored value stays usable.
    fn write_lock(&self) -> RwLockWriteGuard<'_, T> {
        match self.value.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Get the current value of the accumulator (driver only)
    pub fn value(&self) -> T {
        match self.value.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Add a value to the accumulator (the only worker-visible mutation)
    pub fn add(&self, value: T) {
        let mut current = self.write_lock();
        *current = self.op.add(current.clone(), value);
    }

    /// Reset the accumulator to the operation's zero value
    pub fn reset(&self) {
        let mut current = self.write_lock();
        *current = self.op.zero();
    }

    /// Get the accumulator ID
    pub fn id(&self) -> &AccumulatorId {
        &self.id
    }

    /// Get the accumulator name
    pub fn name(&self) -> &str {
        &self.name
    }
}
