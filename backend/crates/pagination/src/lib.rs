//! Page-number pagination primitives shared by list endpoints.
//!
//! A [`PageRequest`] captures the one-based page and page size requested by a
//! client. Repositories translate it into `OFFSET`/`LIMIT` via
//! [`PageRequest::offset`] and [`PageRequest::limit`], and handlers wrap the
//! returned slice in a [`Page`] envelope that reports the total page count.
//!
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::new(3, 10).expect("valid request");
//! assert_eq!(request.offset(), 20);
//!
//! let page = Page::new(vec!["a", "b", "c", "d", "e"], request, 25);
//! assert_eq!(page.total_pages(), 3);
//! assert_eq!(page.items().len(), 5);
//! ```

use thiserror::Error;

/// Page returned when the client omits `page`.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the client omits `limit`.
pub const DEFAULT_LIMIT: u32 = 10;

/// Errors raised while validating pagination input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// `page` was zero, negative, or not an integer.
    #[error("page must be a positive integer")]
    InvalidPage {
        /// Raw value supplied by the caller.
        value: String,
    },
    /// `limit` was zero, negative, or not an integer.
    #[error("limit must be a positive integer")]
    InvalidLimit {
        /// Raw value supplied by the caller.
        value: String,
    },
}

impl PaginationError {
    /// Name of the query parameter that failed validation.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidPage { .. } => "page",
            Self::InvalidLimit { .. } => "limit",
        }
    }

    /// Raw value that failed validation.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::InvalidPage { value } | Self::InvalidLimit { value } => value.as_str(),
        }
    }
}

/// Validated one-based page request.
///
/// ## Invariants
/// - `page >= 1`
/// - `limit >= 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Build a request from already-typed values.
    ///
    /// # Errors
    /// Returns [`PaginationError`] when either value is zero.
    pub fn new(page: u32, limit: u32) -> Result<Self, PaginationError> {
        if page == 0 {
            return Err(PaginationError::InvalidPage {
                value: page.to_string(),
            });
        }
        if limit == 0 {
            return Err(PaginationError::InvalidLimit {
                value: limit.to_string(),
            });
        }
        Ok(Self { page, limit })
    }

    /// Parse raw query-string values, applying defaults for missing ones.
    ///
    /// ```
    /// use pagination::PageRequest;
    ///
    /// let request = PageRequest::parse(None, Some("25")).expect("valid");
    /// assert_eq!(request.page(), 1);
    /// assert_eq!(request.limit(), 25);
    /// ```
    ///
    /// # Errors
    /// Returns [`PaginationError`] naming the first invalid parameter.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Result<Self, PaginationError> {
        let page = match page {
            Some(raw) => parse_positive(raw).ok_or_else(|| PaginationError::InvalidPage {
                value: raw.to_owned(),
            })?,
            None => DEFAULT_PAGE,
        };
        let limit = match limit {
            Some(raw) => parse_positive(raw).ok_or_else(|| PaginationError::InvalidLimit {
                value: raw.to_owned(),
            })?,
            None => DEFAULT_LIMIT,
        };
        Self::new(page, limit)
    }

    /// One-based page number.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items per page.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of items to skip: `(page - 1) * limit`.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }

    /// Number of pages needed to hold `total_items`, rounding up.
    #[must_use]
    pub fn total_pages(&self, total_items: u64) -> u64 {
        total_items.div_ceil(u64::from(self.limit))
    }
}

fn parse_positive(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|value| *value > 0)
}

/// A single page of results plus the totals needed to navigate the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    total_pages: u64,
    current_page: u32,
    total_items: u64,
}

impl<T> Page<T> {
    /// Wrap `items` fetched for `request` out of `total_items` stored records.
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            total_pages: request.total_pages(total_items),
            current_page: request.page(),
            total_items,
        }
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page and return its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Total number of pages at the requested page size.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// One-based number of this page.
    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Total number of stored items across all pages.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.total_items
    }
}
