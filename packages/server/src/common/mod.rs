// Shared types and helpers used across domains
pub mod error;
pub mod json_span;
pub mod pagination;

pub use error::{ListingError, Result, StorageError, UpstreamError};
pub use json_span::{first_json_object, parse_first_json_object, JsonSpanError};
pub use pagination::{Pagination, PaginationQuery};
