//! Key-value aggregation: the aggregation node, the `Aggregator` abstraction
//! it is parameterized by, and the pair-collection extension trait.
//!
//! Aggregation is a wide step: computing it pulls every parent partition.
//! Parent partitions are visited in index order, so the values folded for a
//! key are in encounter order. Group membership is exact; the order of keys
//! in the output follows `HashMap` iteration and is unspecified.

use crate::collection::Collection;
use crate::traits::{
    BasicPartition, CollectionBase, CollectionError, CollectionResult, Data, Partition,
    next_collection_id,
};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;

/// Aggregator for combining the values of one key.
///
/// V: input value type, C: combiner (output value) type.
pub trait Aggregator<V, C>: Send + Sync {
    /// Create a combiner from the first value for a key.
    fn create_combiner(&self, v: V) -> C;

    /// Merge a new value into an existing combiner.
    fn merge_value(&self, c: C, v: V) -> C;

    /// Merge two combiners.
    fn merge_combiners(&self, c1: C, c2: C) -> C;
}

/// Aggregator for `reduce_by_key`, where the combiner type is the value type.
pub struct ReduceAggregator<V> {
    combine: Arc<dyn Fn(V, V) -> V + Send + Sync>,
}

impl<V> ReduceAggregator<V> {
    pub fn new(combine: Arc<dyn Fn(V, V) -> V + Send + Sync>) -> Self {
        Self { combine }
    }
}

impl<V: Data> Aggregator<V, V> for ReduceAggregator<V> {
    fn create_combiner(&self, v: V) -> V {
        v
    }

    fn merge_value(&self, c: V, v: V) -> V {
        (self.combine)(c, v)
    }

    fn merge_combiners(&self, c1: V, c2: V) -> V {
        (self.combine)(c1, c2)
    }
}

/// Aggregator for `group_by_key`: gathers all values of a key into a vector.
pub struct GroupAggregator<V> {
    _phantom: PhantomData<V>,
}

impl<V> GroupAggregator<V> {
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<V> Default for GroupAggregator<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Data> Aggregator<V, Vec<V>> for GroupAggregator<V> {
    fn create_combiner(&self, v: V) -> Vec<V> {
        vec![v]
    }

    fn merge_value(&self, mut c: Vec<V>, v: V) -> Vec<V> {
        c.push(v);
        c
    }

    fn merge_combiners(&self, mut c1: Vec<V>, mut c2: Vec<V>) -> Vec<V> {
        c1.append(&mut c2);
        c1
    }
}

/// Collection node that combines the values of each distinct key of a
/// key-value parent. The result of `reduce_by_key` and `group_by_key`.
pub struct AggregatedCollection<K: Data, V: Data, C: Data> {
    id: usize,
    parent: Arc<dyn CollectionBase<Item = (K, V)>>,
    aggregator: Arc<dyn Aggregator<V, C>>,
}

impl<K: Data, V: Data, C: Data> AggregatedCollection<K, V, C> {
    pub fn new(
        parent: Arc<dyn CollectionBase<Item = (K, V)>>,
        aggregator: Arc<dyn Aggregator<V, C>>,
    ) -> Self {
        Self {
            id: next_collection_id(),
            parent,
            aggregator,
        }
    }
}

impl<K: Data, V: Data, C: Data> Debug for AggregatedCollection<K, V, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AggregatedCollection")
            .field("id", &self.id)
            .field("parent", &self.parent)
            .field("aggregator", &"<aggregator>")
            .finish()
    }
}

impl<K, V, C> CollectionBase for AggregatedCollection<K, V, C>
where
    K: Data + Hash + Eq,
    V: Data,
    C: Data,
{
    type Item = (K, C);

    fn id(&self) -> usize {
        self.id
    }

    fn compute(&self, partition: &dyn Partition) -> CollectionResult<Vec<(K, C)>> {
        let index = partition.index();
        if index != 0 {
            return Err(CollectionError::InvalidPartition(index));
        }

        // Pull every parent partition in index order so values arrive in
        // encounter order, then fold per key.
        let mut values_by_key: HashMap<K, Vec<V>> = HashMap::new();
        for i in 0..self.parent.num_partitions() {
            let parent_partition = BasicPartition::new(i);
            for (key, value) in self.parent.compute(&parent_partition)? {
                values_by_key.entry(key).or_default().push(value);
            }
        }

        let mut result = Vec::with_capacity(values_by_key.len());
        for (key, values) in values_by_key {
            let mut iter = values.into_iter();
            let Some(first) = iter.next() else {
                continue;
            };
            let mut combiner = self.aggregator.create_combiner(first);
            for value in iter {
                combiner = self.aggregator.merge_value(combiner, value);
            }
            result.push((key, combiner));
        }
        Ok(result)
    }

    /// Aggregation collapses into a single partition in this local engine.
    fn num_partitions(&self) -> usize {
        1
    }
}

/// An extension trait adding key-value operations to collections of pairs.
///
/// Having these only on `Collection<(K, V)>` makes a key-value operation on a
/// non-pair collection a compile error rather than a runtime one.
pub trait PairCollection<K: Data + Hash + Eq, V: Data> {
    /// Combine the values of each key with a custom aggregator.
    fn combine_by_key<C: Data>(&self, aggregator: Arc<dyn Aggregator<V, C>>) -> Collection<(K, C)>;

    /// Fold the values of each key with `combine`, in encounter order.
    ///
    /// `combine` must be associative and commutative for the result to be
    /// independent of partitioning; that contract is the caller's to uphold.
    fn reduce_by_key<F>(&self, combine: F) -> Collection<(K, V)>
    where
        F: Fn(V, V) -> V + Send + Sync + 'static;

    /// Gather all values of each key into a vector, in encounter order.
    fn group_by_key(&self) -> Collection<(K, Vec<V>)>;
}

impl<K: Data + Hash + Eq, V: Data> PairCollection<K, V> for Collection<(K, V)> {
    fn combine_by_key<C: Data>(&self, aggregator: Arc<dyn Aggregator<V, C>>) -> Collection<(K, C)> {
        Collection::new(
            Arc::new(AggregatedCollection::new(self.node.clone(), aggregator)),
            self.scheduler.clone(),
        )
    }

    fn reduce_by_key<F>(&self, combine: F) -> Collection<(K, V)>
    where
        F: Fn(V, V) -> V + Send + Sync + 'static,
    {
        self.combine_by_key(Arc::new(ReduceAggregator::new(Arc::new(combine))))
    }

    fn group_by_key(&self) -> Collection<(K, Vec<V>)> {
        self.combine_by_key(Arc::new(GroupAggregator::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_aggregator() {
        let agg = ReduceAggregator::new(Arc::new(|a: i32, b: i32| a + b));
        let c = agg.create_combiner(1);
        let c = agg.merge_value(c, 2);
        let c = agg.merge_value(c, 3);
        assert_eq!(c, 6);
        assert_eq!(agg.merge_combiners(6, 4), 10);
    }

    #[test]
    fn test_group_aggregator_keeps_order() {
        let agg = GroupAggregator::<&str>::new();
        let c = agg.create_combiner("a");
        let c = agg.merge_value(c, "b");
        let c = agg.merge_combiners(c, vec!["c"]);
        assert_eq!(c, vec!["a", "b", "c"]);
    }
}
