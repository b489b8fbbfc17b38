//! Submit strategies for the review form.
//!
//! The form has no opinion on which REST operation fires. Create and edit
//! are separate strategy values handed to [`super::ReviewForm::submit`].

use async_trait::async_trait;

use crate::api::{HotelId, Review, ReviewError, ReviewGateway, ReviewId};

use super::fields::ReviewFormValues;

/// Capability invoked with validated values when the form submits.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmitHandler: Send + Sync {
    /// Sends the values and returns the server's copy of the review.
    async fn submit(&self, values: &ReviewFormValues) -> Result<Review, ReviewError>;
}

/// Submits a new review for a hotel.
#[derive(Debug)]
pub struct CreateReviewHandler<'a, G: ?Sized> {
    gateway: &'a G,
    hotel_id: HotelId,
}

impl<'a, G: ReviewGateway + ?Sized> CreateReviewHandler<'a, G> {
    /// Creates a handler posting to `hotel_id`'s review collection.
    #[must_use]
    pub const fn new(gateway: &'a G, hotel_id: HotelId) -> Self {
        Self { gateway, hotel_id }
    }
}

#[async_trait]
impl<G: ReviewGateway + ?Sized> SubmitHandler for CreateReviewHandler<'_, G> {
    async fn submit(&self, values: &ReviewFormValues) -> Result<Review, ReviewError> {
        self.gateway
            .create(&self.hotel_id, &values.to_payload())
            .await
    }
}

/// Submits changes to an existing review.
#[derive(Debug)]
pub struct UpdateReviewHandler<'a, G: ?Sized> {
    gateway: &'a G,
    hotel_id: HotelId,
    review_id: ReviewId,
}

impl<'a, G: ReviewGateway + ?Sized> UpdateReviewHandler<'a, G> {
    /// Creates a handler updating `review_id` under `hotel_id`.
    #[must_use]
    pub const fn new(gateway: &'a G, hotel_id: HotelId, review_id: ReviewId) -> Self {
        Self {
            gateway,
            hotel_id,
            review_id,
        }
    }

    /// Review this handler edits.
    #[must_use]
    pub const fn review_id(&self) -> &ReviewId {
        &self.review_id
    }
}

#[async_trait]
impl<G: ReviewGateway + ?Sized> SubmitHandler for UpdateReviewHandler<'_, G> {
    async fn submit(&self, values: &ReviewFormValues) -> Result<Review, ReviewError> {
        self.gateway
            .update(&self.hotel_id, &self.review_id, &values.to_payload())
            .await
    }
}
