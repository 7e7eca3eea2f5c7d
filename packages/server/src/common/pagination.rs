//! Offset pagination for list endpoints.
//!
//! Query values arrive as raw strings and are parsed leniently: anything
//! that is not a positive integer falls back to the default.

use serde::Deserialize;

pub const DEFAULT_LIMIT: i64 = 50;
pub const DEFAULT_OFFSET: i64 = 0;

/// Raw `?limit=&offset=` query parameters.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PaginationQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Validated limit/offset pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl Pagination {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self { limit, offset }.normalized()
    }

    fn normalized(self) -> Self {
        Self {
            limit: if self.limit > 0 { self.limit } else { DEFAULT_LIMIT },
            offset: self.offset.max(DEFAULT_OFFSET),
        }
    }
}

impl From<PaginationQuery> for Pagination {
    fn from(query: PaginationQuery) -> Self {
        let parse = |value: Option<String>, default: i64| {
            value
                .and_then(|v| v.trim().parse::<i64>().ok())
                .unwrap_or(default)
        };
        Self::new(
            parse(query.limit, DEFAULT_LIMIT),
            parse(query.offset, DEFAULT_OFFSET),
        )
    }
}
