//! Review operations against the configured hotel.

use std::io::Write;
use std::sync::Arc;

use hotel_reviews::api::{BearerToken, HttpReviewGateway, ReviewGateway};
use hotel_reviews::form::{CreateReviewHandler, ReviewDraft, ReviewForm, UpdateReviewHandler};
use hotel_reviews::reviews::ReviewScreen;
use hotel_reviews::telemetry::NoopTelemetrySink;
use hotel_reviews::{HotelReviewsConfig, ReviewError};

use super::output::{write_deleted_to, write_review_list_to, write_review_to};
use super::session::resolve_token;
use super::{map_form_error, map_screen_error};

/// Lists one page of reviews.
///
/// # Errors
///
/// Returns [`ReviewError`] for incomplete configuration or a failed fetch.
pub async fn list<W: Write>(config: &HotelReviewsConfig, writer: &mut W) -> Result<(), ReviewError> {
    let hotel_id = config.require_hotel_id()?;
    let query = config.review_query()?;
    let gateway = build_gateway(config, resolve_token(config)?)?;

    let mut screen = ReviewScreen::new(gateway, hotel_id, Arc::new(NoopTelemetrySink));
    screen.refresh(&query).await.map_err(map_screen_error)?;

    write_review_list_to(writer, screen.hotel_id(), &query, &screen.view())
}

/// Shows one review.
///
/// # Errors
///
/// Returns [`ReviewError::NotFound`] when the review does not exist.
pub async fn show<W: Write>(config: &HotelReviewsConfig, writer: &mut W) -> Result<(), ReviewError> {
    let hotel_id = config.require_hotel_id()?;
    let review_id = config.require_review_id()?;
    let gateway = build_gateway(config, resolve_token(config)?)?;

    let review = gateway.get_one(&hotel_id, &review_id).await?;
    write_review_to(writer, &format!("Review {review_id}"), &review)
}

/// Creates a review from the configured rating and text.
///
/// The rating defaults to five stars when only text is given.
///
/// # Errors
///
/// Returns [`ReviewError::MissingToken`] without a token and
/// [`ReviewError::Configuration`] when the review is invalid.
pub async fn create<W: Write>(
    config: &HotelReviewsConfig,
    writer: &mut W,
) -> Result<(), ReviewError> {
    let hotel_id = config.require_hotel_id()?;
    let gateway = build_gateway(config, Some(require_token(config)?))?;

    let mut form = ReviewForm::new(config.apply_to_draft(ReviewDraft::default()));
    let handler = CreateReviewHandler::new(&gateway, hotel_id);
    let review = form.submit(&handler).await.map_err(map_form_error)?;

    write_review_to(writer, &format!("Created review {}", review.review_id), &review)
}

/// Updates a review, keeping any field that was not configured.
///
/// # Errors
///
/// Returns [`ReviewError::MissingToken`] without a token,
/// [`ReviewError::NotFound`] for an unknown review, and
/// [`ReviewError::Configuration`] when the result is invalid.
pub async fn update<W: Write>(
    config: &HotelReviewsConfig,
    writer: &mut W,
) -> Result<(), ReviewError> {
    let hotel_id = config.require_hotel_id()?;
    let review_id = config.require_review_id()?;
    let gateway = build_gateway(config, Some(require_token(config)?))?;

    let existing = gateway.get_one(&hotel_id, &review_id).await?;
    let mut form = ReviewForm::for_edit(&existing);
    let draft = config.apply_to_draft(form.draft().clone());
    form.set_rating(draft.rating);
    form.set_review_text(draft.review_text);

    let handler = UpdateReviewHandler::new(&gateway, hotel_id, review_id);
    let review = form.submit(&handler).await.map_err(map_form_error)?;

    write_review_to(writer, &format!("Updated review {}", review.review_id), &review)
}

/// Deletes a review.
///
/// # Errors
///
/// Returns [`ReviewError::MissingToken`] without a token and the service
/// error when the delete fails.
pub async fn delete<W: Write>(
    config: &HotelReviewsConfig,
    writer: &mut W,
) -> Result<(), ReviewError> {
    let hotel_id = config.require_hotel_id()?;
    let review_id = config.require_review_id()?;
    let gateway = build_gateway(config, Some(require_token(config)?))?;

    let confirmation = gateway.delete(&hotel_id, &review_id).await?;
    write_deleted_to(writer, &review_id, &confirmation)
}

fn build_gateway(
    config: &HotelReviewsConfig,
    token: Option<BearerToken>,
) -> Result<HttpReviewGateway, ReviewError> {
    HttpReviewGateway::new(config.service_locator()?, token, config.request_timeout())
}

fn require_token(config: &HotelReviewsConfig) -> Result<BearerToken, ReviewError> {
    resolve_token(config)?.ok_or(ReviewError::MissingToken)
}
