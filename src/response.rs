//! Paginated response envelope
//!
//! Wire shape is camelCase to match what pagination-aware clients expect:
//! `{"items": [...], "meta": {"totalItems": ...}, "links": {"self": ...}}`.
//! `next`/`prev` links serialize as explicit `null` when out of range so
//! clients can bind them directly to navigation controls.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Page metadata for a paginated response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Current page (1-based)
    pub page: u64,
    /// Page size
    pub limit: u64,
    /// Total number of matching items across all pages
    pub total_items: u64,
    /// Total number of pages, never below 1
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Compute metadata for one page of a collection of `total_items` rows.
    ///
    /// An empty collection still reports one page so pagination UIs never
    /// see a zero-page range. Callers guarantee `limit >= 1`.
    pub fn new(page: u64, limit: u64, total_items: u64) -> Self {
        let total_pages = total_items.div_ceil(limit).max(1);
        Self {
            page,
            limit,
            total_items,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

/// Navigable page links for a paginated response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationLinks {
    /// URL of the current page
    #[serde(rename = "self")]
    pub self_: String,
    /// URL of the next page, `null` on the last page
    pub next: Option<String>,
    /// URL of the previous page, `null` on the first page
    pub prev: Option<String>,
}

impl PaginationLinks {
    /// Build `self`/`next`/`prev` URLs from a base path and page metadata.
    ///
    /// Parameter order is `page`, `limit`, then the extra entries in the
    /// order given, so that links round-trip the caller's filter context
    /// (e.g. an active `search` or `status` filter). Entries with a `None`
    /// value are omitted.
    pub fn build(
        base_path: &str,
        meta: &PaginationMeta,
        extra_query: &[(String, Option<String>)],
    ) -> Self {
        let url = |page: u64| {
            let mut url = format!("{}?page={}&limit={}", base_path, page, meta.limit);
            for (key, value) in extra_query {
                if let Some(value) = value {
                    url.push('&');
                    url.push_str(key);
                    url.push('=');
                    url.push_str(value);
                }
            }
            url
        };

        Self {
            self_: url(meta.page),
            next: meta.has_next.then(|| url(meta.page + 1)),
            prev: meta.has_prev.then(|| url(meta.page - 1)),
        }
    }
}

/// One page of items plus metadata and navigation links
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Paginated<T> {
    /// Items on the current page
    pub items: Vec<T>,
    pub meta: PaginationMeta,
    pub links: PaginationLinks,
}

// ── Tests ──────────────────────────────────────────────────────
