//! Error taxonomy for the listing pipeline.
//!
//! Components return typed errors (thiserror); the HTTP layer maps each
//! variant to a status code and surfaces the Display string verbatim.

use axum::http::StatusCode;
use thiserror::Error;

/// Result alias used across the pipeline.
pub type Result<T> = std::result::Result<T, ListingError>;

/// Top-level error returned by every pipeline operation.
#[derive(Debug, Error)]
pub enum ListingError {
    /// Missing or malformed caller input
    #[error("{0}")]
    InvalidInput(String),

    /// Resource absent (product page, stored record)
    #[error("{0}")]
    NotFound(String),

    /// Product site or language model failed
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// Persistence fault
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ListingError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream(_) | Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Failures of the external services the pipeline calls.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Missing or rejected language-model credential
    #[error("OpenAI API key is invalid or missing. Please check your configuration.")]
    Credential,

    /// Product page fetch exceeded the configured timeout
    #[error("Request timeout. Amazon may be blocking requests. Please try again later.")]
    Timeout,

    /// DNS or connection failure reaching the product site
    #[error("Unable to connect to Amazon. Please check your internet connection.")]
    Connectivity,

    /// Non-2xx status from the product site
    #[error("Scraping failed: request failed with status code {0}")]
    Status(u16),

    /// Response body exceeded the size ceiling
    #[error("Scraping failed: response exceeded {0} bytes")]
    TooLarge(usize),

    /// Any other fetch failure
    #[error("Scraping failed: {0}")]
    Fetch(String),

    /// Language-model call failed
    #[error("AI optimization failed: {0}")]
    Service(String),

    /// Language-model answered but the payload was unusable
    #[error("AI optimization failed: {0}")]
    MalformedResponse(String),
}

/// Storage faults, one per store operation.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to save optimization to database")]
    SaveFailed(#[source] sqlx::Error),

    #[error("Failed to fetch optimization history")]
    HistoryFailed(#[source] sqlx::Error),

    #[error("Failed to fetch optimizations")]
    ListFailed(#[source] sqlx::Error),

    #[error("Failed to fetch optimization")]
    FetchFailed(#[source] sqlx::Error),

    /// A stored list column held something other than a JSON string array
    #[error("Failed to decode stored optimization: {0}")]
    Corrupt(String),
}
