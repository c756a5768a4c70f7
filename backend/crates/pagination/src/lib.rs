//! Page-number pagination primitives.
//!
//! Listing endpoints accept a one-based `page` and a `limit` (page size). This
//! crate normalises those inputs into a [`PageRequest`] and exposes the SQL
//! `LIMIT`/`OFFSET` pair derived from it, so every listing strategy paginates
//! the same way.
//!
//! # Examples
//!
//! ```
//! use pagination::PageRequest;
//!
//! let page = PageRequest::from_query(Some("2"), Some("5"));
//! assert_eq!(page.offset(), 5);
//! assert_eq!(page.limit(), 5);
//! ```

use std::num::NonZeroU32;

/// One-based page number used when the caller omits `page`.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the caller omits `limit`.
pub const DEFAULT_LIMIT: u32 = 10;

/// Errors raised by the strict [`PageRequest::new`] constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// Page numbers start at one.
    #[error("page must be at least 1")]
    ZeroPage,
    /// A page must hold at least one item.
    #[error("limit must be at least 1")]
    ZeroLimit,
}

/// Normalised page selection.
///
/// ## Invariants
/// - `page >= 1`
/// - `limit >= 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: NonZeroU32,
    limit: NonZeroU32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: NonZeroU32::MIN,
            limit: NonZeroU32::new(DEFAULT_LIMIT).unwrap_or(NonZeroU32::MIN),
        }
    }
}

impl PageRequest {
    /// Build a page request, rejecting zero values.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] when `page` or `limit` is zero.
    pub fn new(page: u32, limit: u32) -> Result<Self, PageRequestError> {
        let page = NonZeroU32::new(page).ok_or(PageRequestError::ZeroPage)?;
        let limit = NonZeroU32::new(limit).ok_or(PageRequestError::ZeroLimit)?;
        Ok(Self { page, limit })
    }

    /// Build a page request from raw query-string values.
    ///
    /// Missing, unparsable, zero, or negative values fall back to
    /// [`DEFAULT_PAGE`] and [`DEFAULT_LIMIT`] independently.
    ///
    /// ```
    /// use pagination::{PageRequest, DEFAULT_LIMIT};
    ///
    /// let page = PageRequest::from_query(Some("-3"), Some("abc"));
    /// assert_eq!(page.page(), 1);
    /// assert_eq!(page.limit(), DEFAULT_LIMIT);
    /// ```
    #[must_use]
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            page: parse_positive(page).unwrap_or(defaults.page),
            limit: parse_positive(limit).unwrap_or(defaults.limit),
        }
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page.get()
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit.get()
    }

    /// Number of items skipped before this page: `(page - 1) * limit`.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page.get() as u64 - 1) * self.limit.get() as u64
    }
}

fn parse_positive(raw: Option<&str>) -> Option<NonZeroU32> {
    raw.map(str::trim)
        .and_then(|value| value.parse::<u32>().ok())
        .and_then(NonZeroU32::new)
}
