//! Pagination types

use super::ValidationError;

/// Maximum rows per list request
pub const MAX_LIMIT: i64 = 500;

/// Rows per list request when `limit` is omitted
pub const DEFAULT_LIMIT: i64 = 50;

/// Validated LIMIT/OFFSET pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    limit: i64,
    offset: i64,
}

impl Pagination {
    /// Validate raw query values.
    ///
    /// - `limit` defaults to 50 and must be within 1..=500
    /// - `offset` defaults to 0 and must not be negative
    ///
    /// Out-of-range values are rejected, never clamped.
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Result<Self, ValidationError> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(ValidationError::OutOfRange {
                field: "limit",
                min: 1,
                max: Some(MAX_LIMIT),
                value: limit,
            });
        }

        let offset = offset.unwrap_or(0);
        if offset < 0 {
            return Err(ValidationError::OutOfRange {
                field: "offset",
                min: 0,
                max: None,
                value: offset,
            });
        }

        Ok(Self { limit, offset })
    }

    /// SQL LIMIT value.
    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// SQL OFFSET value.
    pub fn offset(&self) -> i64 {
        self.offset
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}
