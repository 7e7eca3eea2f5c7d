use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::listing::{OptimizedListing, ProductSnapshot};
use crate::common::{Pagination, StorageError};

/// A persisted original/optimized listing pair.
///
/// Rows are append-only: re-processing an ASIN inserts a new record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOptimization {
    pub id: i64,
    pub asin: String,
    pub original_title: String,
    pub original_bullet_points: Vec<String>,
    pub original_description: String,
    pub optimized_title: String,
    pub optimized_bullet_points: Vec<String>,
    pub optimized_description: String,
    pub suggested_keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Summary row returned by the paginated listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct OptimizationSummary {
    pub id: i64,
    pub asin: String,
    pub original_title: String,
    pub optimized_title: String,
    pub created_at: DateTime<Utc>,
}

/// Fields for inserting a new record; id and timestamp are store-assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProductOptimization {
    pub asin: String,
    pub original_title: String,
    pub original_bullet_points: Vec<String>,
    pub original_description: String,
    pub optimized_title: String,
    pub optimized_bullet_points: Vec<String>,
    pub optimized_description: String,
    pub suggested_keywords: Vec<String>,
}

impl NewProductOptimization {
    pub fn from_pipeline(snapshot: &ProductSnapshot, optimized: &OptimizedListing) -> Self {
        Self {
            asin: snapshot.asin.clone(),
            original_title: snapshot.title.clone(),
            original_bullet_points: snapshot.bullet_points.clone(),
            original_description: snapshot.description.clone(),
            optimized_title: optimized.title.clone(),
            optimized_bullet_points: optimized.bullet_points.clone(),
            optimized_description: optimized.description.clone(),
            suggested_keywords: optimized.keywords.clone(),
        }
    }

    /// Attach store-assigned fields.
    pub fn into_record(self, id: i64, created_at: DateTime<Utc>) -> ProductOptimization {
        ProductOptimization {
            id,
            asin: self.asin,
            original_title: self.original_title,
            original_bullet_points: self.original_bullet_points,
            original_description: self.original_description,
            optimized_title: self.optimized_title,
            optimized_bullet_points: self.optimized_bullet_points,
            optimized_description: self.optimized_description,
            suggested_keywords: self.suggested_keywords,
            created_at,
        }
    }

    pub fn summary(&self, id: i64, created_at: DateTime<Utc>) -> OptimizationSummary {
        OptimizationSummary {
            id,
            asin: self.asin.clone(),
            original_title: self.original_title.clone(),
            optimized_title: self.optimized_title.clone(),
            created_at,
        }
    }
}

/// Raw row: list columns are JSON text.
#[derive(Debug, sqlx::FromRow)]
struct ProductOptimizationRow {
    id: i64,
    asin: String,
    original_title: String,
    original_bullet_points: Option<String>,
    original_description: Option<String>,
    optimized_title: String,
    optimized_bullet_points: Option<String>,
    optimized_description: Option<String>,
    suggested_keywords: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ProductOptimizationRow> for ProductOptimization {
    type Error = StorageError;

    fn try_from(row: ProductOptimizationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            asin: row.asin,
            original_title: row.original_title,
            original_bullet_points: decode_list(row.original_bullet_points.as_deref())?,
            original_description: row.original_description.unwrap_or_default(),
            optimized_title: row.optimized_title,
            optimized_bullet_points: decode_list(row.optimized_bullet_points.as_deref())?,
            optimized_description: row.optimized_description.unwrap_or_default(),
            suggested_keywords: decode_list(row.suggested_keywords.as_deref())?,
            created_at: row.created_at,
        })
    }
}

/// Serialize a list column for storage.
pub fn encode_list(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

/// Deserialize a stored list column; NULL or blank yields an empty list.
pub fn decode_list(raw: Option<&str>) -> Result<Vec<String>, StorageError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(text) => {
            serde_json::from_str(text).map_err(|e| StorageError::Corrupt(e.to_string()))
        }
    }
}

const RECORD_COLUMNS: &str = r#"
    id,
    asin,
    original_title,
    original_bullet_points,
    original_description,
    optimized_title,
    optimized_bullet_points,
    optimized_description,
    suggested_keywords,
    created_at
"#;

// =============================================================================
// Queries
// =============================================================================

impl ProductOptimization {
    /// Insert a record and return its surrogate id.
    pub async fn create(new: &NewProductOptimization, pool: &PgPool) -> Result<i64, StorageError> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO product_optimizations
                (asin, original_title, original_bullet_points, original_description,
                 optimized_title, optimized_bullet_points, optimized_description, suggested_keywords)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&new.asin)
        .bind(&new.original_title)
        .bind(encode_list(&new.original_bullet_points))
        .bind(&new.original_description)
        .bind(&new.optimized_title)
        .bind(encode_list(&new.optimized_bullet_points))
        .bind(&new.optimized_description)
        .bind(encode_list(&new.suggested_keywords))
        .fetch_one(pool)
        .await
        .map_err(StorageError::SaveFailed)
    }

    /// All records for an ASIN, newest first.
    pub async fn find_by_asin(asin: &str, pool: &PgPool) -> Result<Vec<Self>, StorageError> {
        let query = format!(
            "SELECT {RECORD_COLUMNS} FROM product_optimizations WHERE asin = $1 ORDER BY created_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, ProductOptimizationRow>(&query)
            .bind(asin)
            .fetch_all(pool)
            .await
            .map_err(StorageError::HistoryFailed)?;

        rows.into_iter().map(Self::try_from).collect()
    }

    /// Summaries across all ASINs, newest first.
    pub async fn find_all(
        page: Pagination,
        pool: &PgPool,
    ) -> Result<Vec<OptimizationSummary>, StorageError> {
        sqlx::query_as::<_, OptimizationSummary>(
            r#"
            SELECT id, asin, original_title, optimized_title, created_at
            FROM product_optimizations
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(pool)
        .await
        .map_err(StorageError::ListFailed)
    }

    pub async fn find_by_id(id: i64, pool: &PgPool) -> Result<Option<Self>, StorageError> {
        let query = format!("SELECT {RECORD_COLUMNS} FROM product_optimizations WHERE id = $1");
        sqlx::query_as::<_, ProductOptimizationRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(StorageError::FetchFailed)?
            .map(Self::try_from)
            .transpose()
    }
}
