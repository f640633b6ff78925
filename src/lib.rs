//! # Pagekit
//!
//! Offset pagination engine for list endpoints: validates a client query,
//! resolves client-controlled sorting against a per-endpoint whitelist,
//! runs the count and the page fetch concurrently against a pluggable data
//! source, and assembles an envelope of items, page metadata and
//! navigable links.
//!
//! ## Architecture
//!
//! - **query**: the `page`/`limit`/`sort` DTO with serde defaults and
//!   validator rules
//! - **sort**: whitelist-based sort resolution with silent fallback
//! - **engine**: the `PageSource` contract and the `paginate` entry point
//! - **response**: `Paginated` envelope, page metadata, page links
//! - **extract**: axum extractor that enforces the query invariants at
//!   the HTTP boundary
//! - **memory**: in-memory `PageSource` for development and testing
//! - **config**: pagination defaults and bounds

pub mod config;
pub mod engine;
pub mod extract;
pub mod memory;
pub mod query;
pub mod response;
pub mod sort;

pub use config::PaginationConfig;
pub use engine::{paginate, PageRequest, PageSource, PageWindow};
pub use extract::{ValidatedQuery, ValidatedQueryRejection};
pub use memory::VecSource;
pub use query::PaginationQuery;
pub use response::{Paginated, PaginationLinks, PaginationMeta};
pub use sort::{SortOrder, SortPolicy, SortSpec};
