//! Process an ASIN: scrape, optimize, persist.

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

use crate::common::Result;
use crate::domains::products::extraction::{extract_snapshot, validate_asin};
use crate::domains::products::models::{
    NewProductOptimization, OptimizedListing, OriginalListing,
};
use crate::domains::products::optimizer::optimize_listing;
use crate::kernel::ServerDeps;

/// Result of a successful pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedListing {
    pub id: i64,
    pub asin: String,
    pub original: OriginalListing,
    pub optimized: OptimizedListing,
}

/// Run the full pipeline for one ASIN.
///
/// Stages run strictly in order. A failure at any stage aborts the run and
/// nothing is persisted; there is no retry and no caching of earlier stages.
pub async fn process_product(asin: &str, deps: &ServerDeps) -> Result<ProcessedListing> {
    let start = Instant::now();
    let asin = validate_asin(asin)?;

    info!(asin = %asin, "Scraping product data");
    let markup = deps.page_fetcher.fetch_product_page(asin).await?;
    let snapshot = extract_snapshot(asin, &markup)?;

    let optimized = optimize_listing(&snapshot, deps.ai.as_ref()).await?;

    info!(asin = %asin, "Saving optimization");
    let record = NewProductOptimization::from_pipeline(&snapshot, &optimized);
    let id = deps.store.create(&record).await?;

    info!(
        asin = %asin,
        id,
        duration_ms = start.elapsed().as_millis() as u64,
        "Product processed"
    );

    Ok(ProcessedListing {
        id,
        asin: snapshot.asin.clone(),
        original: OriginalListing::from(&snapshot),
        optimized,
    })
}
