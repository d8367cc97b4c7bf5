//! Page type for paginated list results.

use serde::Deserialize;

/// A page of list results with pagination information.
///
/// List endpoints return `{ items, page, limit, total }`; the same type is
/// used for pages computed locally over an already fetched list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(alias = "records")]
    items: Vec<T>,
    /// 1-based page number.
    page: usize,
    /// Page size.
    #[serde(alias = "limit")]
    per_page: usize,
    /// Total number of items across all pages.
    total: usize,
}

impl<T> Page<T> {
    /// Creates a page from its parts.
    pub fn new(items: Vec<T>, page: usize, per_page: usize, total: usize) -> Self {
        Self {
            items,
            page: page.max(1),
            per_page: per_page.max(1),
            total,
        }
    }

    /// Cuts page `page` (1-based) of size `per_page` out of `items`.
    ///
    /// Pages past the end are empty.
    pub fn from_items(items: impl IntoIterator<Item = T>, page: usize, per_page: usize) -> Self {
        let page = page.max(1);
        let per_page = per_page.max(1);
        let all: Vec<T> = items.into_iter().collect();
        let total = all.len();
        let items = all
            .into_iter()
            .skip((page - 1) * per_page)
            .take(per_page)
            .collect();
        Self::new(items, page, per_page, total)
    }

    /// Returns a reference to the items in this page.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the page and returns the items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Returns the 1-based page number.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns the page size.
    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Returns the total number of items across all pages.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns the number of pages (at least 1).
    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.per_page.max(1)).max(1)
    }

    /// Returns `true` if there are more pages after this one.
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Returns `true` if this page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
