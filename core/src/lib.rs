//! Flint Core - a lazy collection engine
//!
//! This is the core crate of the Flint project. It provides immutable, lazily
//! evaluated collections built as a chain of operation nodes, a rayon-backed
//! local scheduler that runs actions over partitioned data, and the shared
//! state primitives (broadcast variables and accumulators) used by driver
//! code.

pub mod accumulator;
pub mod broadcast;
pub mod collection;
pub mod context;
pub mod scheduler;
pub mod traits;

pub use accumulator::{Accumulator, AccumulatorOp, CountAccumulator, SumAccumulator};
pub use broadcast::Broadcast;
pub use collection::{Collection, PairCollection, StorageLevel};
pub use context::FlintContext;
pub use traits::{CollectionError, CollectionResult, Data, Partition};
