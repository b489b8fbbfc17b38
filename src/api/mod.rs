//! Review API client for the hotel review REST resource.
//!
//! This module maps the five review operations onto HTTP calls against
//! `/hotels/{hotelId}/reviews`. Errors are mapped into [`ReviewError`]
//! variants so that callers can surface precise failures without depending
//! on reqwest internals.

pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod query;

pub use error::ReviewError;
pub use gateway::{DEFAULT_TIMEOUT, HttpReviewGateway, ReviewGateway};
pub use locator::{BearerToken, HotelId, ReviewId, ReviewServiceLocator};
pub use models::{DeleteConfirmation, Review, ReviewAuthor, ReviewPage, ReviewPayload};
pub use query::{MAX_LIMIT, PagedReviewQuery, SortOrder};

#[cfg(test)]
pub use gateway::MockReviewGateway;
