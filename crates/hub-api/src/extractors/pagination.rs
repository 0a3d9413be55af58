//! Pagination extractor
//!
//! Extracts page-based pagination parameters from query strings.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::response::ApiError;

/// Default page size for routes without their own
pub const DEFAULT_LIMIT: i64 = 10;
/// Default page size for a conversation of messages
pub const CONVERSATION_LIMIT: i64 = 50;
/// Default page size for the notification list
pub const NOTIFICATION_LIMIT: i64 = 20;
/// Maximum page size
const MAX_LIMIT: i64 = 100;

/// Raw pagination query parameters
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    /// 1-based page number
    #[serde(default)]
    pub page: Option<i64>,
    /// Maximum number of items per page
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Validated pagination parameters
///
/// An explicit `limit` is clamped to 1-100; routes with a larger natural
/// page size (conversations, notifications) supply their own default via
/// [`Pagination::limit_or`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Pagination {
    /// 1-based page number (validated to >= 1)
    page: i64,
    /// Explicit page size, if the client sent one (validated to 1-100)
    limit: Option<i64>,
}

impl Pagination {
    /// 1-based page number
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.max(1)
    }

    /// Page size, falling back to the global default
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit_or(DEFAULT_LIMIT)
    }

    /// Page size, falling back to the given per-route default
    #[must_use]
    pub fn limit_or(&self, default: i64) -> i64 {
        self.limit.unwrap_or(default).clamp(1, MAX_LIMIT)
    }
}

impl From<PaginationParams> for Pagination {
    fn from(params: PaginationParams) -> Self {
        Self {
            page: params.page.unwrap_or(1).max(1),
            limit: params.limit,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        Ok(Pagination::from(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pagination() {
        let pagination = Pagination::default();
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn test_limit_clamping() {
        let pagination = Pagination::from(PaginationParams {
            page: None,
            limit: Some(200),
        });
        assert_eq!(pagination.limit(), MAX_LIMIT);

        let pagination = Pagination::from(PaginationParams {
            page: None,
            limit: Some(0),
        });
        assert_eq!(pagination.limit(), 1);
    }

    #[test]
    fn test_pagination_from_params() {
        let params = PaginationParams {
            page: Some(3),
            limit: Some(25),
        };

        let pagination = Pagination::from(params);
        assert_eq!(pagination.page(), 3);
        assert_eq!(pagination.limit(), 25);
    }

    #[test]
    fn test_page_floor() {
        let params = PaginationParams {
            page: Some(0),
            limit: None,
        };

        let pagination = Pagination::from(params);
        assert_eq!(pagination.page(), 1);
    }

    #[test]
    fn test_per_route_default_only_fills_missing_limit() {
        let pagination = Pagination::default();
        assert_eq!(pagination.limit_or(CONVERSATION_LIMIT), 50);
        assert_eq!(pagination.limit_or(NOTIFICATION_LIMIT), 20);

        let explicit = Pagination::from(PaginationParams {
            page: None,
            limit: Some(5),
        });
        assert_eq!(explicit.limit_or(CONVERSATION_LIMIT), 5);
    }
}
