//! Request shaping for the paged review listing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ReviewError;

/// Largest page size the client will request.
pub const MAX_LIMIT: u32 = 100;

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 10;

/// Sort direction for the review listing (by creation time on the server).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest first.
    Asc,
    /// Newest first.
    #[default]
    Desc,
}

impl SortOrder {
    /// Returns the query parameter value for this order.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ReviewError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(ReviewError::InvalidPagination {
                message: format!("sort must be asc or desc, got {other:?}"),
            }),
        }
    }
}

/// Paging parameters for `GET /hotels/{hotelId}/reviews`.
///
/// # Example
///
/// ```
/// use hotel_reviews::api::{PagedReviewQuery, SortOrder};
///
/// let query = PagedReviewQuery::new(2, 25, SortOrder::Asc).expect("valid query");
/// assert_eq!(
///     query.to_query_pairs(),
///     [("page", "2".to_owned()), ("limit", "25".to_owned()), ("sort", "asc".to_owned())]
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagedReviewQuery {
    page: u32,
    limit: u32,
    sort: SortOrder,
}

impl Default for PagedReviewQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort: SortOrder::Desc,
        }
    }
}

impl PagedReviewQuery {
    /// Creates a validated query.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::InvalidPagination`] when `page` or `limit` is
    /// zero, or `limit` exceeds [`MAX_LIMIT`].
    pub fn new(page: u32, limit: u32, sort: SortOrder) -> Result<Self, ReviewError> {
        if page == 0 {
            return Err(ReviewError::InvalidPagination {
                message: "page must be at least 1".to_owned(),
            });
        }

        if limit == 0 {
            return Err(ReviewError::InvalidPagination {
                message: "limit must be at least 1".to_owned(),
            });
        }

        if limit > MAX_LIMIT {
            return Err(ReviewError::InvalidPagination {
                message: format!("limit must not exceed {MAX_LIMIT}"),
            });
        }

        Ok(Self { page, limit, sort })
    }

    /// Builds a query from optional parts, filling in defaults.
    ///
    /// # Errors
    ///
    /// Propagates the validation errors of [`PagedReviewQuery::new`].
    pub fn from_parts(
        page: Option<u32>,
        limit: Option<u32>,
        sort: Option<SortOrder>,
    ) -> Result<Self, ReviewError> {
        Self::new(
            page.unwrap_or(DEFAULT_PAGE),
            limit.unwrap_or(DEFAULT_LIMIT),
            sort.unwrap_or_default(),
        )
    }

    /// Returns the 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Returns the sort order.
    #[must_use]
    pub const fn sort(&self) -> SortOrder {
        self.sort
    }

    /// Returns the query for the following page.
    #[must_use]
    pub const fn next_page(self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            ..self
        }
    }

    /// Returns the `page`, `limit`, `sort` query pairs in wire order.
    #[must_use]
    pub fn to_query_pairs(&self) -> [(&'static str, String); 3] {
        [
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
            ("sort", self.sort.as_str().to_owned()),
        ]
    }
}
