// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::{BaseAI, BaseOptimizationStore, BasePageFetcher, CompletionRequest, ServerDeps};
use crate::common::{ListingError, Pagination, Result, StorageError, UpstreamError};
use crate::domains::products::models::{
    NewProductOptimization, OptimizationSummary, ProductOptimization,
};

/// Product page returned when no response has been queued.
pub const DEFAULT_PRODUCT_PAGE: &str = r#"<html><body>
<span id="productTitle"> Wireless Mouse </span>
<div id="feature-bullets"><ul>
  <li><span class="a-list-item">Quiet clicks</span></li>
  <li><span class="a-list-item">USB receiver</span></li>
</ul></div>
</body></html>"#;

/// Model reply returned when no response has been queued.
pub const DEFAULT_AI_RESPONSE: &str = r#"{
  "title": "Silent Wireless Mouse with Nano USB Receiver",
  "bulletPoints": ["Silent clicks", "Plug and play", "18-month battery", "Ergonomic shape", "Travel size"],
  "description": "Work quietly anywhere with this compact wireless mouse.",
  "keywords": ["silent mouse", "wireless mouse", "usb mouse"]
}"#;

// =============================================================================
// Mock Page Fetcher
// =============================================================================

#[derive(Debug, Clone)]
enum MockFetch {
    Page(String),
    NotFound,
    Timeout,
    Status(u16),
}

pub struct MockPageFetcher {
    responses: Arc<Mutex<VecDeque<MockFetch>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockPageFetcher {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a page of markup
    pub fn with_page(self, markup: &str) -> Self {
        self.push(MockFetch::Page(markup.to_string()))
    }

    /// Queue a 404 from the product site
    pub fn with_not_found(self) -> Self {
        self.push(MockFetch::NotFound)
    }

    pub fn with_timeout(self) -> Self {
        self.push(MockFetch::Timeout)
    }

    pub fn with_status(self, status: u16) -> Self {
        self.push(MockFetch::Status(status))
    }

    fn push(self, response: MockFetch) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    /// ASINs fetched so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockPageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BasePageFetcher for MockPageFetcher {
    async fn fetch_product_page(&self, asin: &str) -> Result<String> {
        self.calls.lock().unwrap().push(asin.to_string());

        let next = self.responses.lock().unwrap().pop_front();
        match next.unwrap_or_else(|| MockFetch::Page(DEFAULT_PRODUCT_PAGE.to_string())) {
            MockFetch::Page(markup) => Ok(markup),
            MockFetch::NotFound => Err(ListingError::not_found(
                "Product not found. Please check the ASIN.",
            )),
            MockFetch::Timeout => Err(UpstreamError::Timeout.into()),
            MockFetch::Status(status) => Err(UpstreamError::Status(status).into()),
        }
    }
}

// =============================================================================
// Mock AI
// =============================================================================

#[derive(Debug, Clone)]
enum MockCompletion {
    Text(String),
    Credential,
    Failure(String),
}

pub struct MockAI {
    responses: Arc<Mutex<VecDeque<MockCompletion>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockAI {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a raw model reply
    pub fn with_response(self, text: &str) -> Self {
        self.push(MockCompletion::Text(text.to_string()))
    }

    pub fn with_credential_error(self) -> Self {
        self.push(MockCompletion::Credential)
    }

    pub fn with_failure(self, message: &str) -> Self {
        self.push(MockCompletion::Failure(message.to_string()))
    }

    fn push(self, response: MockCompletion) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockAI {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseAI for MockAI {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<String, UpstreamError> {
        self.requests.lock().unwrap().push(request);

        let next = self.responses.lock().unwrap().pop_front();
        match next.unwrap_or_else(|| MockCompletion::Text(DEFAULT_AI_RESPONSE.to_string())) {
            MockCompletion::Text(text) => Ok(text),
            MockCompletion::Credential => Err(UpstreamError::Credential),
            MockCompletion::Failure(message) => Err(UpstreamError::Service(message)),
        }
    }
}

// =============================================================================
// In-memory Optimization Store
// =============================================================================

/// Append-only store with the same ordering rules as the Postgres store.
pub struct InMemoryOptimizationStore {
    records: Mutex<Vec<ProductOptimization>>,
    fail_writes: AtomicBool,
}

impl InMemoryOptimizationStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make every subsequent `create` fail with `SaveFailed`
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records newest first
    fn newest_first(&self) -> Vec<ProductOptimization> {
        let mut records = self.records.lock().unwrap().clone();
        records.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        records
    }
}

impl Default for InMemoryOptimizationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseOptimizationStore for InMemoryOptimizationStore {
    async fn create(
        &self,
        record: &NewProductOptimization,
    ) -> std::result::Result<i64, StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::SaveFailed(sqlx::Error::PoolClosed));
        }

        let mut records = self.records.lock().unwrap();
        let id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        // Timestamps never go backwards, matching insertion order
        let created_at = records
            .last()
            .map(|last| last.created_at.max(Utc::now()))
            .unwrap_or_else(Utc::now);
        records.push(record.clone().into_record(id, created_at));
        Ok(id)
    }

    async fn find_by_asin(
        &self,
        asin: &str,
    ) -> std::result::Result<Vec<ProductOptimization>, StorageError> {
        Ok(self
            .newest_first()
            .into_iter()
            .filter(|r| r.asin == asin)
            .collect())
    }

    async fn list(
        &self,
        page: Pagination,
    ) -> std::result::Result<Vec<OptimizationSummary>, StorageError> {
        Ok(self
            .newest_first()
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .map(|r| OptimizationSummary {
                id: r.id,
                asin: r.asin,
                original_title: r.original_title,
                optimized_title: r.optimized_title,
                created_at: r.created_at,
            })
            .collect())
    }

    async fn find_by_id(
        &self,
        id: i64,
    ) -> std::result::Result<Option<ProductOptimization>, StorageError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn health_check(&self) -> std::result::Result<(), StorageError> {
        Ok(())
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

pub struct TestDependencies {
    pub page_fetcher: Arc<MockPageFetcher>,
    pub ai: Arc<MockAI>,
    pub store: Arc<InMemoryOptimizationStore>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            page_fetcher: Arc::new(MockPageFetcher::new()),
            ai: Arc::new(MockAI::new()),
            store: Arc::new(InMemoryOptimizationStore::new()),
        }
    }

    /// Set a mock page fetcher
    pub fn mock_page_fetcher(mut self, fetcher: MockPageFetcher) -> Self {
        self.page_fetcher = Arc::new(fetcher);
        self
    }

    /// Set a mock AI
    pub fn mock_ai(mut self, ai: MockAI) -> Self {
        self.ai = Arc::new(ai);
        self
    }

    /// ServerDeps sharing these mocks (the mocks stay inspectable)
    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.page_fetcher.clone(),
            self.ai.clone(),
            self.store.clone(),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
