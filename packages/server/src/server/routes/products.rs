//! Product listing endpoints.
//!
//! POST /products/process
//! GET  /products/history/:asin
//! GET  /products/optimizations?limit&offset
//! GET  /products/optimization/:id

use axum::{
    body::Bytes,
    extract::{Extension, Path, Query},
    Json,
};
use serde::Deserialize;

use crate::common::{ListingError, Pagination, PaginationQuery};
use crate::domains::products::{
    get_asin_history, get_optimization, list_optimizations, process_product, OptimizationSummary,
    ProcessedListing, ProductOptimization,
};
use crate::server::app::AxumAppState;
use crate::server::response::ApiResponse;

type ApiResult<T> = Result<Json<ApiResponse<T>>, ListingError>;

/// Body of `POST /products/process`.
#[derive(Debug, Default, Deserialize)]
pub struct ProcessRequest {
    #[serde(default, alias = "identifier")]
    pub asin: Option<String>,
}

impl ProcessRequest {
    /// Lenient parse: a missing or malformed body reads as "no ASIN".
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

pub async fn process_handler(
    Extension(state): Extension<AxumAppState>,
    body: Bytes,
) -> ApiResult<ProcessedListing> {
    let asin = ProcessRequest::from_body(&body)
        .asin
        .filter(|asin| !asin.trim().is_empty())
        .ok_or_else(|| ListingError::invalid_input("ASIN is required"))?;

    let processed = process_product(&asin, &state.deps).await?;
    Ok(ApiResponse::ok(processed))
}

pub async fn history_handler(
    Extension(state): Extension<AxumAppState>,
    Path(asin): Path<String>,
) -> ApiResult<Vec<ProductOptimization>> {
    let history = get_asin_history(&asin, &state.deps).await?;
    Ok(ApiResponse::ok(history))
}

pub async fn list_handler(
    Extension(state): Extension<AxumAppState>,
    Query(query): Query<PaginationQuery>,
) -> ApiResult<Vec<OptimizationSummary>> {
    let optimizations = list_optimizations(Pagination::from(query), &state.deps).await?;
    Ok(ApiResponse::ok(optimizations))
}

pub async fn optimization_handler(
    Extension(state): Extension<AxumAppState>,
    Path(id): Path<String>,
) -> ApiResult<ProductOptimization> {
    let optimization = get_optimization(&id, &state.deps).await?;
    Ok(ApiResponse::ok(optimization))
}
