// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Prompting, extraction rules and validation live in domains/products.
//
// Naming convention: Base* for trait names (e.g., BaseAI, BasePageFetcher)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::common::{Pagination, Result, StorageError, UpstreamError};
use crate::domains::products::models::{
    NewProductOptimization, OptimizationSummary, ProductOptimization,
};

// =============================================================================
// Page Fetcher Trait (Infrastructure - product page markup)
// =============================================================================

#[async_trait]
pub trait BasePageFetcher: Send + Sync {
    /// Fetch the raw product page markup for an ASIN.
    ///
    /// A missing product (HTTP 404) is `ListingError::NotFound`; transport
    /// failures are `ListingError::Upstream`.
    async fn fetch_product_page(&self, asin: &str) -> Result<String>;
}

// =============================================================================
// AI Trait (Infrastructure - Generic LLM chat completion)
// =============================================================================

/// Role-tagged chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[async_trait]
pub trait BaseAI: Send + Sync {
    /// Complete a chat (returns the raw text of the first choice)
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<String, UpstreamError>;
}

// =============================================================================
// Optimization Store Trait (Infrastructure - persistence)
// =============================================================================

#[async_trait]
pub trait BaseOptimizationStore: Send + Sync {
    /// Insert a record, returning the new surrogate id
    async fn create(
        &self,
        record: &NewProductOptimization,
    ) -> std::result::Result<i64, StorageError>;

    /// All records for an ASIN, newest first
    async fn find_by_asin(
        &self,
        asin: &str,
    ) -> std::result::Result<Vec<ProductOptimization>, StorageError>;

    /// Summaries across all ASINs, newest first
    async fn list(
        &self,
        page: Pagination,
    ) -> std::result::Result<Vec<OptimizationSummary>, StorageError>;

    async fn find_by_id(
        &self,
        id: i64,
    ) -> std::result::Result<Option<ProductOptimization>, StorageError>;

    /// Cheap liveness probe for the health endpoint
    async fn health_check(&self) -> std::result::Result<(), StorageError>;
}
