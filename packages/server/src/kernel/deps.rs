//! Server dependencies for activities (using traits for testability)
//!
//! Every external collaborator is constructed once at startup from its own
//! config struct and passed in here; nothing below reads the environment.

use anyhow::Result;
use sqlx::PgPool;
use std::sync::Arc;

use super::{
    AmazonPageFetcher, BaseAI, BaseOptimizationStore, BasePageFetcher, OpenAIClient,
    PostgresOptimizationStore,
};
use crate::config::Config;

/// Server dependencies shared by every request.
#[derive(Clone)]
pub struct ServerDeps {
    pub page_fetcher: Arc<dyn BasePageFetcher>,
    pub ai: Arc<dyn BaseAI>,
    pub store: Arc<dyn BaseOptimizationStore>,
}

impl ServerDeps {
    pub fn new(
        page_fetcher: Arc<dyn BasePageFetcher>,
        ai: Arc<dyn BaseAI>,
        store: Arc<dyn BaseOptimizationStore>,
    ) -> Self {
        Self {
            page_fetcher,
            ai,
            store,
        }
    }

    /// Production wiring: reqwest fetcher, OpenAI client, Postgres store.
    pub fn from_config(config: &Config, pool: PgPool) -> Result<Self> {
        let page_fetcher = AmazonPageFetcher::new(config.scraper.clone())?;
        let ai = OpenAIClient::new(config.openai.clone());
        if config.openai.api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY is not set; optimization requests will fail");
        }

        Ok(Self::new(
            Arc::new(page_fetcher),
            Arc::new(ai),
            Arc::new(PostgresOptimizationStore::new(pool)),
        ))
    }
}
