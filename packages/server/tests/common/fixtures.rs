//! Test fixtures for creating optimization records.

use std::sync::atomic::{AtomicU32, Ordering};

use listing_core::domains::products::NewProductOptimization;

static ASIN_COUNTER: AtomicU32 = AtomicU32::new(0);

/// ASIN unique to this test run, so tests sharing a database stay isolated.
pub fn unique_asin(prefix: &str) -> String {
    let n = ASIN_COUNTER.fetch_add(1, Ordering::SeqCst);
    let nanos = chrono::Utc::now().timestamp_subsec_nanos();
    format!("{}{:05}{:09}", prefix, n, nanos)
}

/// A complete record for `asin` with a recognizable optimized title.
pub fn new_optimization(asin: &str, optimized_title: &str) -> NewProductOptimization {
    NewProductOptimization {
        asin: asin.to_string(),
        original_title: "Wireless Mouse".to_string(),
        original_bullet_points: vec!["Quiet clicks".to_string(), "USB receiver".to_string()],
        original_description: "Quiet clicks USB receiver".to_string(),
        optimized_title: optimized_title.to_string(),
        optimized_bullet_points: vec!["Silent clicks".to_string(), "Plug and play".to_string()],
        optimized_description: "Work quietly anywhere.".to_string(),
        suggested_keywords: vec!["silent mouse".to_string(), "wireless mouse".to_string()],
    }
}
