//! Page-number pagination primitives for Bookshelf list endpoints.
//!
//! List endpoints materialise the whole collection and then slice it in
//! memory. [`PageQuery`] is the raw query-string shape accepted from clients,
//! [`PageRequest`] is its validated form, and [`PageRequest::slice`] cuts the
//! requested window out of an already-loaded collection.
//!
//! ```
//! use pagination::PageRequest;
//!
//! let request = PageRequest::new(2, 2).expect("valid page");
//! let page = request.slice(vec!["a", "b", "c", "d", "e"]);
//! assert_eq!(page, vec!["c", "d"]);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page returned when the client does not ask for one.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the client does not ask for one.
pub const DEFAULT_ITEMS_PER_PAGE: u32 = 15;

/// Validation failures for page parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// Pages are numbered from one.
    #[error("page must be at least 1")]
    ZeroPage,
    /// A page must hold at least one item.
    #[error("items_per_page must be at least 1")]
    ZeroItemsPerPage,
}

impl PageRequestError {
    /// Name of the query parameter that failed validation.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::ZeroPage => "page",
            Self::ZeroItemsPerPage => "items_per_page",
        }
    }
}

/// Raw page parameters as they arrive in a query string.
///
/// Missing values fall back to [`DEFAULT_PAGE`] and
/// [`DEFAULT_ITEMS_PER_PAGE`] when converted into a [`PageRequest`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    /// One-based page number.
    pub page: Option<u32>,
    /// Number of items per page.
    pub items_per_page: Option<u32>,
}

/// Validated one-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    items_per_page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl PageRequest {
    /// Build a page request, rejecting zero values.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::ZeroPage`] or
    /// [`PageRequestError::ZeroItemsPerPage`] when either value is zero.
    pub const fn new(page: u32, items_per_page: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if items_per_page == 0 {
            return Err(PageRequestError::ZeroItemsPerPage);
        }
        Ok(Self {
            page,
            items_per_page,
        })
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn items_per_page(&self) -> u32 {
        self.items_per_page
    }

    /// Zero-based position of the first item on the page.
    ///
    /// Saturates at `usize::MAX` so absurd page numbers yield an empty slice
    /// rather than overflowing.
    #[must_use]
    pub fn offset(&self) -> usize {
        let skipped = u64::from(self.page.saturating_sub(1))
            .saturating_mul(u64::from(self.items_per_page));
        usize::try_from(skipped).unwrap_or(usize::MAX)
    }

    /// Number of items to take, as a `usize`.
    #[must_use]
    pub fn limit(&self) -> usize {
        usize::try_from(self.items_per_page).unwrap_or(usize::MAX)
    }

    /// Cut this page out of a fully materialised collection.
    ///
    /// Pages past the end of the collection are empty.
    #[must_use]
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset())
            .take(self.limit())
            .collect()
    }
}

impl TryFrom<PageQuery> for PageRequest {
    type Error = PageRequestError;

    fn try_from(query: PageQuery) -> Result<Self, Self::Error> {
        Self::new(
            query.page.unwrap_or(DEFAULT_PAGE),
            query.items_per_page.unwrap_or(DEFAULT_ITEMS_PER_PAGE),
        )
    }
}
