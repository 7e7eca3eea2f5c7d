//! Postgres-backed optimization store.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::BaseOptimizationStore;
use crate::common::{Pagination, StorageError};
use crate::domains::products::models::{
    NewProductOptimization, OptimizationSummary, ProductOptimization,
};

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Connect a pool and apply embedded migrations.
pub async fn connect_database(config: &DatabaseConfig) -> Result<PgPool> {
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    Ok(pool)
}

/// Delegates to the `ProductOptimization` queries.
#[derive(Clone)]
pub struct PostgresOptimizationStore {
    pool: PgPool,
}

impl PostgresOptimizationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseOptimizationStore for PostgresOptimizationStore {
    async fn create(&self, record: &NewProductOptimization) -> Result<i64, StorageError> {
        let id = ProductOptimization::create(record, &self.pool)
            .await
            .inspect_err(|e| tracing::error!(error = ?e, "Database save error"))?;
        tracing::debug!(id, asin = %record.asin, "Saved optimization");
        Ok(id)
    }

    async fn find_by_asin(&self, asin: &str) -> Result<Vec<ProductOptimization>, StorageError> {
        ProductOptimization::find_by_asin(asin, &self.pool)
            .await
            .inspect_err(|e| tracing::error!(error = ?e, "Database fetch error"))
    }

    async fn list(&self, page: Pagination) -> Result<Vec<OptimizationSummary>, StorageError> {
        ProductOptimization::find_all(page, &self.pool)
            .await
            .inspect_err(|e| tracing::error!(error = ?e, "Database fetch error"))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ProductOptimization>, StorageError> {
        ProductOptimization::find_by_id(id, &self.pool)
            .await
            .inspect_err(|e| tracing::error!(error = ?e, "Database fetch error"))
    }

    async fn health_check(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(StorageError::FetchFailed)
    }
}
