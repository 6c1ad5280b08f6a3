//! Common test utilities and helpers for integration tests

use flint_core::FlintContext;

/// Create a test context with a given name
pub fn create_test_context(name: &str) -> FlintContext {
    FlintContext::new(name)
}

/// Create a test context with a specific thread count
#[allow(dead_code)]
pub fn create_test_context_with_threads(name: &str, threads: usize) -> FlintContext {
    FlintContext::new_with_threads(name, threads)
}

/// Create test data for integer operations
#[allow(dead_code)]
pub fn create_test_i32_data() -> Vec<i32> {
    (1..=20).collect()
}

/// Per-customer purchase records for key-value aggregation tests
#[allow(dead_code)]
pub fn grocery_data() -> Vec<(String, i32)> {
    vec![
        ("bread".to_string(), 1),
        ("bread".to_string(), 2),
        ("milk".to_string(), 1),
        ("milk".to_string(), 5),
        ("milk".to_string(), 0),
        ("bread".to_string(), 1),
    ]
}

/// Assert that two vectors contain the same elements (order-independent)
#[allow(dead_code)] // used in pair_ops.rs; each test binary compiles its own copy
pub fn assert_same_elements<T: Ord + Clone + std::fmt::Debug>(
    mut actual: Vec<T>,
    mut expected: Vec<T>,
) {
    actual.sort();
    expected.sort();
    assert_eq!(actual, expected);
}
