//! Read-only accessors over stored optimizations.

use crate::common::{ListingError, Pagination, Result};
use crate::domains::products::models::{OptimizationSummary, ProductOptimization};
use crate::kernel::ServerDeps;

/// Every optimization for an ASIN, newest first.
pub async fn get_asin_history(asin: &str, deps: &ServerDeps) -> Result<Vec<ProductOptimization>> {
    let asin = asin.trim();
    if asin.is_empty() {
        return Err(ListingError::invalid_input("ASIN is required"));
    }
    Ok(deps.store.find_by_asin(asin).await?)
}

pub async fn list_optimizations(
    page: Pagination,
    deps: &ServerDeps,
) -> Result<Vec<OptimizationSummary>> {
    Ok(deps.store.list(page).await?)
}

/// Fetch one optimization by its id.
///
/// Ids that do not parse as integers cannot exist and report not found.
pub async fn get_optimization(id: &str, deps: &ServerDeps) -> Result<ProductOptimization> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ListingError::invalid_input("Optimization ID is required"));
    }

    let not_found = || ListingError::not_found("Optimization not found");
    let id: i64 = id.parse().map_err(|_| not_found())?;

    deps.store.find_by_id(id).await?.ok_or_else(not_found)
}
