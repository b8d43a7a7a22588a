//! Pagination for list endpoints.
//!
//! Clients send either `limit` + `offset` or `limit` + `page`; `page` wins
//! when both are present. `limit` is clamped to `1..=100` and defaults to 20.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;

/// Empty query values (`?page=`) are treated as absent.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s.trim().parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Items per page (1-100, default 20)
    #[serde(default, deserialize_with = "empty_as_none")]
    pub limit: Option<i64>,
    /// Items to skip; ignored when `page` is set
    #[serde(default, deserialize_with = "empty_as_none")]
    pub offset: Option<i64>,
    /// 1-indexed page number
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page: Option<i64>,
}

impl PaginationParams {
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    #[must_use]
    pub fn offset(&self) -> i64 {
        match self.page {
            Some(page) => (page.max(1) - 1).saturating_mul(self.limit()),
            None => self.offset.unwrap_or(0).max(0),
        }
    }

    #[must_use]
    pub fn page(&self) -> Option<i64> {
        self.page.map(|p| p.max(1))
    }

    /// Builds the response metadata once the total row count is known.
    #[must_use]
    pub fn meta(&self, total: i64) -> PaginationMeta {
        let limit = self.limit();
        let offset = self.offset();
        PaginationMeta {
            total,
            limit,
            offset: if self.page.is_some() { None } else { Some(offset) },
            page: self.page(),
            has_more: offset.saturating_add(limit) < total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    pub total: i64,
    pub limit: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(limit: Option<i64>, offset: Option<i64>, page: Option<i64>) -> PaginationParams {
        PaginationParams {
            limit,
            offset,
            page,
        }
    }

    #[test]
    fn test_defaults() {
        let p = PaginationParams::default();
        assert_eq!(p.limit(), DEFAULT_LIMIT);
        assert_eq!(p.offset(), 0);
        assert_eq!(p.page(), None);
    }

    #[test]
    fn test_limit_is_clamped() {
        assert_eq!(params(Some(0), None, None).limit(), 1);
        assert_eq!(params(Some(-3), None, None).limit(), 1);
        assert_eq!(params(Some(500), None, None).limit(), MAX_LIMIT);
    }

    #[test]
    fn test_page_takes_precedence_over_offset() {
        let p = params(Some(10), Some(99), Some(3));
        assert_eq!(p.offset(), 20);
        assert_eq!(p.page(), Some(3));
    }

    #[test]
    fn test_negative_offset_and_page_clamp() {
        assert_eq!(params(None, Some(-5), None).offset(), 0);
        assert_eq!(params(Some(10), None, Some(-2)).offset(), 0);
    }

    #[test]
    fn test_meta_has_more() {
        let p = params(Some(10), Some(0), None);
        let meta = p.meta(25);
        assert!(meta.has_more);
        assert_eq!(meta.offset, Some(0));

        let last = params(Some(10), None, Some(3)).meta(25);
        assert!(!last.has_more);
        assert_eq!(last.page, Some(3));
        assert_eq!(last.offset, None);
    }

    #[test]
    fn test_huge_page_and_offset_saturate() {
        let by_page = params(Some(100), None, Some(i64::MAX));
        assert_eq!(by_page.offset(), i64::MAX);
        let meta = by_page.meta(0);
        assert!(!meta.has_more);
        assert_eq!(meta.page, Some(i64::MAX));

        let by_offset = params(Some(100), Some(i64::MAX), None);
        assert_eq!(by_offset.offset(), i64::MAX);
        let meta = by_offset.meta(10);
        assert!(!meta.has_more);
        assert_eq!(meta.offset, Some(i64::MAX));
    }

    #[test]
    fn test_empty_query_values_deserialize_as_none() {
        let p: PaginationParams = serde_json::from_str(r#"{"limit":"","page":"2"}"#).unwrap();
        assert_eq!(p.limit, None);
        assert_eq!(p.page, Some(2));
    }
}
