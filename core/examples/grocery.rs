//! End-to-end walkthrough of the collection API: transformations, actions,
//! key-value aggregation and shared state.
//!
//! Run with `cargo run --example grocery`.

use flint_core::{CollectionResult, CountAccumulator, FlintContext, PairCollection};
use std::sync::Arc;

fn main() -> CollectionResult<()> {
    tracing_subscriber::fmt::init();

    let context = FlintContext::new("grocery-demo");

    // per-customer purchase records
    let purchases = context.parallelize(vec![
        ("bread".to_string(), 1),
        ("bread".to_string(), 2),
        ("milk".to_string(), 1),
        ("milk".to_string(), 5),
        ("milk".to_string(), 0),
        ("bread".to_string(), 1),
    ]);

    let per_item = purchases.reduce_by_key(|sum, val| sum + val);
    println!("per-item totals: {:?}", per_item.collect()?);

    let total = purchases.flat_map(|(_, count)| vec![count]).reduce(|a, b| a + b)?;
    println!("items purchased in total: {total}");

    // broadcast a minimum, count qualifying records with an accumulator
    let minimum = context.broadcast(1);
    let qualifying = context.accumulator("qualifying", Arc::new(CountAccumulator));

    let min = minimum.clone();
    let acc = qualifying.clone();
    purchases
        .filter(move |(_, count)| count >= min.value())
        .foreach(move |_| acc.add(1))?;

    println!("records at or above the minimum: {}", qualifying.value());

    Ok(())
}
