//! Pagination engine
//!
//! [`paginate`] turns a validated [`PaginationQuery`] plus a data source
//! into one [`Paginated`] envelope. The engine is stateless and owns no
//! resources: it resolves the sort against the endpoint's [`SortPolicy`],
//! computes the page window, dispatches the count and the fetch
//! concurrently, and assembles meta and links from the results. Data-source
//! failures abort the whole call and propagate unwrapped; resilience
//! (retries, timeouts, fallbacks) belongs to the adapter behind
//! [`PageSource`], not here.

use async_trait::async_trait;
use tracing::debug;

use crate::query::PaginationQuery;
use crate::response::{Paginated, PaginationLinks, PaginationMeta};
use crate::sort::{SortPolicy, SortSpec};

/// The `(skip, take)` window for one page, computed fresh per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Rows to skip before the page starts
    pub skip: u64,
    /// Rows to fetch
    pub take: u64,
}

impl PageWindow {
    /// `skip = (page - 1) * limit`, `take = limit`.
    ///
    /// No clamping beyond what boundary validation guarantees: a page past
    /// the end of the collection legitimately fetches zero rows and the
    /// meta reports `has_next = false`. The multiply saturates, so a page
    /// number near `u64::MAX` degrades to an empty page instead of
    /// panicking; boundary validation caps `limit` but not `page`.
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            skip: page.saturating_sub(1).saturating_mul(limit),
            take: limit,
        }
    }
}

/// A filtered, orderable collection the engine can page over.
///
/// Adapters implement this over whatever backs them: an ORM entity, a
/// query builder, an in-memory snapshot (see [`crate::memory::VecSource`]).
/// `Filter` is the opaque selection criteria forwarded verbatim to both
/// operations; `Projection` is the opaque relation/column directive
/// forwarded to `fetch` only. The engine never inspects either.
#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: Send;
    type Filter: Send + Sync;
    type Projection: Send + Sync;
    type Error: Send;

    /// Total number of rows matching `filter`.
    async fn count(&self, filter: &Self::Filter) -> Result<u64, Self::Error>;

    /// One page of rows matching `filter`, ordered by `sort`.
    async fn fetch(
        &self,
        filter: &Self::Filter,
        projection: Option<&Self::Projection>,
        sort: &SortSpec,
        window: PageWindow,
    ) -> Result<Vec<Self::Item>, Self::Error>;
}

/// Everything one `paginate` call needs besides the source itself.
#[derive(Debug)]
pub struct PageRequest<F, P> {
    /// Validated query parameters (page, limit, raw sort)
    pub query: PaginationQuery,
    /// Opaque selection criteria, forwarded to both count and fetch
    pub filter: F,
    /// Opaque projection directive, forwarded to fetch only
    pub projection: Option<P>,
    /// Sorting whitelist and default for this endpoint
    pub sort: SortPolicy,
    /// Route used to build page links, e.g. `/orders`
    pub base_path: String,
    /// Extra query parameters echoed into every link, in order.
    /// `None`-valued entries are omitted.
    pub extra_query: Vec<(String, Option<String>)>,
}

impl<F, P> PageRequest<F, P> {
    pub fn new(
        query: PaginationQuery,
        filter: F,
        sort: SortPolicy,
        base_path: impl Into<String>,
    ) -> Self {
        Self {
            query,
            filter,
            projection: None,
            sort,
            base_path: base_path.into(),
            extra_query: Vec::new(),
        }
    }

    pub fn with_projection(mut self, projection: P) -> Self {
        self.projection = Some(projection);
        self
    }

    /// Echo an active filter into the generated links so paging preserves
    /// the caller's filter context. A `None` value is a no-op entry.
    pub fn with_extra_query(
        mut self,
        key: impl Into<String>,
        value: Option<impl Into<String>>,
    ) -> Self {
        self.extra_query.push((key.into(), value.map(Into::into)));
        self
    }
}

/// Execute one paginated query against `source`.
///
/// Issues exactly one `count` and one `fetch`, dispatched concurrently
/// since neither depends on the other's result. If either fails the whole
/// call fails and the source's error is returned unmodified; no partial
/// envelope is ever produced.
pub async fn paginate<S>(
    source: &S,
    request: PageRequest<S::Filter, S::Projection>,
) -> Result<Paginated<S::Item>, S::Error>
where
    S: PageSource + ?Sized,
{
    let sort = request.sort.resolve(request.query.sort.as_deref());
    let window = PageWindow::new(request.query.page, request.query.limit);

    let (total_items, items) = tokio::try_join!(
        source.count(&request.filter),
        source.fetch(&request.filter, request.projection.as_ref(), &sort, window),
    )?;

    let meta = PaginationMeta::new(request.query.page, request.query.limit, total_items);
    let links = PaginationLinks::build(&request.base_path, &meta, &request.extra_query);

    debug!(
        page = meta.page,
        limit = meta.limit,
        total_items = meta.total_items,
        total_pages = meta.total_pages,
        sort_field = %sort.field,
        sort_order = sort.order.as_str(),
        "paginated query complete"
    );

    Ok(Paginated { items, meta, links })
}

// ── Tests ──────────────────────────────────────────────────────
