//! In-memory page source for development and testing

use std::cmp::Ordering;
use std::collections::HashMap;
use std::convert::Infallible;

use async_trait::async_trait;

use crate::engine::{PageSource, PageWindow};
use crate::sort::{SortOrder, SortSpec};

/// Row predicate used as the filter criteria of a [`VecSource`].
pub type FilterFn<T> = fn(&T) -> bool;

/// Field comparator used to order rows of a [`VecSource`].
pub type FieldCmp<T> = fn(&T, &T) -> Ordering;

/// A [`PageSource`] over an in-memory snapshot of rows.
///
/// Sortable fields are registered by name with a comparator; a sort on a
/// field without a comparator leaves the snapshot order untouched, which
/// mirrors how an unindexed default behaves. Filtering is a plain row
/// predicate, `None` meaning "match everything".
pub struct VecSource<T> {
    rows: Vec<T>,
    comparators: HashMap<String, FieldCmp<T>>,
}

impl<T> VecSource<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            rows,
            comparators: HashMap::new(),
        }
    }

    /// Register a comparator for a sortable field name.
    pub fn with_field(mut self, field: impl Into<String>, cmp: FieldCmp<T>) -> Self {
        self.comparators.insert(field.into(), cmp);
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[async_trait]
impl<T> PageSource for VecSource<T>
where
    T: Clone + Send + Sync,
{
    type Item = T;
    type Filter = Option<FilterFn<T>>;
    type Projection = ();
    type Error = Infallible;

    async fn count(&self, filter: &Self::Filter) -> Result<u64, Infallible> {
        let matching = match filter {
            Some(pred) => self.rows.iter().filter(|row| pred(row)).count(),
            None => self.rows.len(),
        };
        Ok(matching as u64)
    }

    async fn fetch(
        &self,
        filter: &Self::Filter,
        _projection: Option<&()>,
        sort: &SortSpec,
        window: PageWindow,
    ) -> Result<Vec<T>, Infallible> {
        let mut matching: Vec<&T> = match filter {
            Some(pred) => self.rows.iter().filter(|row| pred(row)).collect(),
            None => self.rows.iter().collect(),
        };

        if let Some(cmp) = self.comparators.get(&sort.field) {
            matching.sort_by(|a, b| match sort.order {
                SortOrder::Asc => cmp(a, b),
                SortOrder::Desc => cmp(b, a),
            });
        }

        Ok(matching
            .into_iter()
            .skip(window.skip as usize)
            .take(window.take as usize)
            .cloned()
            .collect())
    }
}

// ── Tests ──────────────────────────────────────────────────────
