//! Gateways for the hotel review REST resource.
//!
//! The trait-based design enables mocking in tests while the reqwest
//! implementation handles real HTTP requests.

mod error_mapping;
mod http_utils;
mod rest;

pub use rest::{DEFAULT_TIMEOUT, HttpReviewGateway};

use async_trait::async_trait;

use crate::api::error::ReviewError;
use crate::api::locator::{HotelId, ReviewId};
use crate::api::models::{DeleteConfirmation, Review, ReviewPage, ReviewPayload};
use crate::api::query::PagedReviewQuery;

/// The five review operations the client can perform.
///
/// Implementations propagate transport and HTTP failures unchanged. They do
/// not retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewGateway: Send + Sync {
    /// `POST /hotels/{hotelId}/reviews`.
    async fn create(
        &self,
        hotel_id: &HotelId,
        payload: &ReviewPayload,
    ) -> Result<Review, ReviewError>;

    /// `GET /hotels/{hotelId}/reviews?page=&limit=&sort=`.
    async fn list(
        &self,
        hotel_id: &HotelId,
        query: &PagedReviewQuery,
    ) -> Result<ReviewPage, ReviewError>;

    /// `GET /hotels/{hotelId}/reviews/{reviewId}`.
    async fn get_one(&self, hotel_id: &HotelId, review_id: &ReviewId)
    -> Result<Review, ReviewError>;

    /// `PUT /hotels/{hotelId}/reviews/{reviewId}`.
    async fn update(
        &self,
        hotel_id: &HotelId,
        review_id: &ReviewId,
        payload: &ReviewPayload,
    ) -> Result<Review, ReviewError>;

    /// `DELETE /hotels/{hotelId}/reviews/{reviewId}`.
    async fn delete(
        &self,
        hotel_id: &HotelId,
        review_id: &ReviewId,
    ) -> Result<DeleteConfirmation, ReviewError>;
}

#[cfg(test)]
mod tests;
