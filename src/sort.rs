//! Sort resolution with whitelist checking.
//!
//! Client-controlled sorting is an injection surface: an unchecked field
//! name ends up in an ORDER BY clause or a comparator lookup. Every list
//! endpoint therefore declares a [`SortPolicy`] with the fields it is
//! willing to sort by and a trusted default, and the engine resolves the
//! raw `field:direction` string against it. Anything malformed or not
//! whitelisted resolves to the default; the request still succeeds.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Sort direction for an ordered query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// A resolved `(field, order)` pair, safe to hand to a data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    /// Shorthand for the common "newest first" default.
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Desc)
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Asc)
    }
}

/// Per-endpoint sorting rules: which fields a client may sort by, and the
/// fallback used when the request asks for anything else.
///
/// The default is trusted unconditionally and does not itself have to be
/// in the whitelist. An empty whitelist disables the membership check and
/// accepts any well-formed `field:direction` pair.
#[derive(Debug, Clone)]
pub struct SortPolicy {
    allowed: Vec<String>,
    default: SortSpec,
}

impl SortPolicy {
    pub fn new(
        allowed: impl IntoIterator<Item = impl Into<String>>,
        default: SortSpec,
    ) -> Self {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
            default,
        }
    }

    /// A policy with no whitelist: any well-formed sort expression passes.
    pub fn any(default: SortSpec) -> Self {
        Self {
            allowed: Vec::new(),
            default,
        }
    }

    pub fn default_sort(&self) -> &SortSpec {
        &self.default
    }

    pub fn allowed_fields(&self) -> &[String] {
        &self.allowed
    }

    /// Resolve a raw `field:direction` expression against this policy.
    ///
    /// Falls back to the default sort when the expression is absent, empty,
    /// not of the form `field:asc` / `field:desc`, or names a field outside
    /// a non-empty whitelist. Fallback is silent: a typo'd sort parameter
    /// degrades the ordering, not the request.
    pub fn resolve(&self, raw: Option<&str>) -> SortSpec {
        let Some(raw) = raw.filter(|s| !s.is_empty()) else {
            return self.default.clone();
        };

        let Some((field, order)) = raw.split_once(':') else {
            return self.default.clone();
        };

        if field.is_empty() {
            return self.default.clone();
        }

        let Some(order) = SortOrder::parse(order) else {
            return self.default.clone();
        };

        if !self.allowed.is_empty() && !self.allowed.iter().any(|a| a == field) {
            return self.default.clone();
        }

        SortSpec::new(field, order)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> SortPolicy {
        SortPolicy::new(["created_at", "email"], SortSpec::desc("created_at"))
    }

    #[test]
    fn absent_sort_resolves_to_default() {
        assert_eq!(policy().resolve(None), SortSpec::desc("created_at"));
    }

    #[test]
    fn empty_sort_resolves_to_default() {
        assert_eq!(policy().resolve(Some("")), SortSpec::desc("created_at"));
    }

    #[test]
    fn missing_colon_resolves_to_default() {
        assert_eq!(policy().resolve(Some("email")), SortSpec::desc("created_at"));
    }

    #[test]
    fn missing_field_resolves_to_default() {
        assert_eq!(policy().resolve(Some(":asc")), SortSpec::desc("created_at"));
    }

    #[test]
    fn invalid_direction_resolves_to_default() {
        assert_eq!(
            policy().resolve(Some("email:ascending")),
            SortSpec::desc("created_at")
        );
        assert_eq!(
            policy().resolve(Some("email:ASC")),
            SortSpec::desc("created_at")
        );
    }

    #[test]
    fn trailing_segment_resolves_to_default() {
        // "email:asc:extra" does not split into exactly field + direction
        assert_eq!(
            policy().resolve(Some("email:asc:extra")),
            SortSpec::desc("created_at")
        );
    }

    #[test]
    fn non_whitelisted_field_resolves_to_default() {
        assert_eq!(
            policy().resolve(Some("password:asc")),
            SortSpec::desc("created_at")
        );
    }

    #[test]
    fn whitelisted_field_passes_through() {
        assert_eq!(policy().resolve(Some("email:asc")), SortSpec::asc("email"));
        assert_eq!(policy().resolve(Some("email:desc")), SortSpec::desc("email"));
        assert_eq!(
            policy().resolve(Some("created_at:asc")),
            SortSpec::asc("created_at")
        );
    }

    #[test]
    fn empty_whitelist_accepts_any_well_formed_field() {
        let open = SortPolicy::any(SortSpec::desc("id"));
        assert_eq!(open.resolve(Some("anything:asc")), SortSpec::asc("anything"));
        assert_eq!(open.resolve(Some("broken")), SortSpec::desc("id"));
    }
}
