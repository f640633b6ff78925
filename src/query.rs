//! List query DTO
//!
//! `PaginationQuery` is what a list endpoint deserializes from its query
//! string. Defaults apply at deserialization time, validation runs through
//! `validator` (see [`crate::extract::ValidatedQuery`]), and the engine
//! then trusts the invariants: `page >= 1`, `1 <= limit <= 100`.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::config::{DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT};

/// Query parameters for paginated list requests
///
/// Defaults and bounds come from the constants in [`crate::config`].
#[derive(Debug, Clone, Deserialize, Validate, ToSchema, IntoParams)]
pub struct PaginationQuery {
    /// Page number (1-based). Default: 1
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must be ≥ 1"))]
    pub page: u64,
    /// Items per page (1–100). Default: 20
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = MAX_LIMIT, message = "limit must be 1–100"))]
    pub limit: u64,
    /// Sort expression of the form `field:asc` or `field:desc`
    #[validate(custom(function = validate_sort_expr))]
    pub sort: Option<String>,
}

fn default_page() -> u64 {
    DEFAULT_PAGE
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
            sort: None,
        }
    }
}

impl PaginationQuery {
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page,
            limit,
            sort: None,
        }
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }
}

/// Checks a sort expression against `^[a-zA-Z0-9_]+:(asc|desc)$`.
fn validate_sort_expr(sort: &str) -> Result<(), ValidationError> {
    let well_formed = sort.split_once(':').is_some_and(|(field, order)| {
        !field.is_empty()
            && field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
            && matches!(order, "asc" | "desc")
    });

    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::new("sort")
            .with_message("sort must be of the form field:asc or field:desc".into()))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_fields_are_absent() {
        let query: PaginationQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 20);
        assert!(query.sort.is_none());
    }

    #[test]
    fn bounds_agree_with_pagination_config() {
        let config = crate::config::PaginationConfig::default();

        let query: PaginationQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, config.default_page);
        assert_eq!(query.limit, config.default_limit);

        assert!(PaginationQuery::new(1, config.max_limit).validate().is_ok());
        assert!(PaginationQuery::new(1, config.max_limit + 1)
            .validate()
            .is_err());
    }

    #[test]
    fn valid_query_passes_validation() {
        let query = PaginationQuery::new(3, 50).with_sort("created_at:desc");
        assert!(query.validate().is_ok());
    }

    #[test]
    fn zero_page_fails_validation() {
        assert!(PaginationQuery::new(0, 20).validate().is_err());
    }

    #[test]
    fn limit_out_of_range_fails_validation() {
        assert!(PaginationQuery::new(1, 0).validate().is_err());
        assert!(PaginationQuery::new(1, 101).validate().is_err());
    }

    #[test]
    fn malformed_sort_fails_validation() {
        for raw in ["createdat", "created_at:", ":asc", "email:up", "a b:asc"] {
            let query = PaginationQuery::new(1, 20).with_sort(raw);
            assert!(query.validate().is_err(), "expected {raw:?} to be rejected");
        }
    }

    #[test]
    fn well_formed_sort_passes_validation() {
        for raw in ["email:asc", "created_at:desc", "price2:asc"] {
            let query = PaginationQuery::new(1, 20).with_sort(raw);
            assert!(query.validate().is_ok(), "expected {raw:?} to be accepted");
        }
    }
}
