//! Configuration module

/// Page used when a request does not name one.
///
/// These three constants are the canonical pagination bounds; the serde
/// defaults and validator rules on [`crate::query::PaginationQuery`]
/// derive from them.
pub const DEFAULT_PAGE: u64 = 1;
/// Page size used when a request does not name one.
pub const DEFAULT_LIMIT: u64 = 20;
/// Hard cap on the page size.
pub const MAX_LIMIT: u64 = 100;

/// Pagination defaults and bounds
///
/// Used by boundary code that normalizes raw query input before handing
/// it to the engine. The engine itself trusts the resulting invariants.
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// Page used when the request does not name one
    pub default_page: u64,
    /// Page size used when the request does not name one
    pub default_limit: u64,
    /// Hard cap on the page size
    pub max_limit: u64,
}

impl PaginationConfig {
    pub fn new(default_limit: u64, max_limit: u64) -> Self {
        Self {
            default_page: 1,
            default_limit,
            max_limit,
        }
    }

    /// Clamp raw page/limit input into valid range.
    ///
    /// Missing values take the defaults; out-of-range values are pulled
    /// back to the nearest bound rather than rejected.
    pub fn normalize(&self, page: Option<u64>, limit: Option<u64>) -> (u64, u64) {
        let page = page.unwrap_or(self.default_page).max(1);
        let limit = limit.unwrap_or(self.default_limit).clamp(1, self.max_limit);
        (page, limit)
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: DEFAULT_PAGE,
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
