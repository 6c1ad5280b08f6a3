//! Broadcast variables
//!
//! Broadcast variables let the driver share a read-only value with every
//! evaluation context without handing each closure its own mutable copy. The
//! value is created once, wrapped in an `Arc`, and only ever read.

use crate::traits::Data;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Unique identifier for a broadcast variable
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastId(pub String);

impl BroadcastId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for BroadcastId {
    fn default() -> Self {
        Self::new()
    }
}

/// Broadcast variable that holds a read-only value
///
/// Clones share the underlying value; a clone moved into a transformation
/// closure reads the same data as the driver's handle.
#[derive(Debug, Clone)]
pub struct Broadcast<T: Data> {
    id: BroadcastId,
    value: Arc<T>,
}

impl<T: Data> Broadcast<T> {
    /// Create a new broadcast variable with the given value
    pub fn new(value: T) -> Self {
        Self {
            id: BroadcastId::new(),
            value: Arc::new(value),
        }
    }

    /// Get the value of this broadcast variable
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Get the ID of this broadcast variable
    pub fn id(&self) -> &BroadcastId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_variable() {
        let value = vec![1, 2, 3, 4, 5];
        let broadcast = Broadcast::new(value.clone());

        assert_eq!(broadcast.value(), &value);
        assert!(!broadcast.id().0.is_empty());
    }

    #[test]
    fn test_broadcast_clones_share_value() {
        let broadcast = Broadcast::new("shared".to_string());
        let clone = broadcast.clone();

        assert_eq!(clone.value(), broadcast.value());
        assert_eq!(clone.id(), broadcast.id());
        assert!(Arc::ptr_eq(&broadcast.value, &clone.value));
    }
}
