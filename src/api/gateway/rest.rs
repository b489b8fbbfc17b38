//! reqwest-backed implementation of [`ReviewGateway`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::error::ReviewError;
use crate::api::locator::{BearerToken, HotelId, ReviewId, ReviewServiceLocator};
use crate::api::models::{
    ApiReview, ApiReviewPage, DeleteConfirmation, Review, ReviewPage, ReviewPayload,
};
use crate::api::query::PagedReviewQuery;

use super::ReviewGateway;
use super::error_mapping::{map_http_error, map_transport_error};
use super::http_utils::extract_service_message;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// HTTP gateway for the hotel review resource.
///
/// The bearer token, when present, is attached to every request. The
/// gateway never retries; callers that want retries layer them on top.
#[derive(Debug, Clone)]
pub struct HttpReviewGateway {
    client: Client,
    locator: ReviewServiceLocator,
    token: Option<BearerToken>,
}

impl HttpReviewGateway {
    /// Creates a gateway for the given service and optional bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Configuration`] when the HTTP client cannot be
    /// built.
    pub fn new(
        locator: ReviewServiceLocator,
        token: Option<BearerToken>,
        timeout: Duration,
    ) -> Result<Self, ReviewError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| ReviewError::Configuration {
                message: format!("failed to configure review HTTP client: {error}"),
            })?;

        Ok(Self {
            client,
            locator,
            token,
        })
    }

    /// Returns the service locator this gateway targets.
    #[must_use]
    pub const fn locator(&self) -> &ReviewServiceLocator {
        &self.locator
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token.value()),
            None => builder,
        }
    }

    async fn send(
        &self,
        operation: &str,
        builder: RequestBuilder,
    ) -> Result<Response, ReviewError> {
        let response = builder
            .send()
            .await
            .map_err(|error| map_transport_error(operation, &error))?;

        let status = response.status();
        tracing::debug!(operation, status = status.as_u16(), "review service responded");

        if status.is_success() {
            return Ok(response);
        }

        let resource = response.url().path().to_owned();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "(failed to read error response body)".to_owned());

        Err(map_http_error(
            operation,
            status,
            &resource,
            extract_service_message(&body),
        ))
    }

    async fn decode<T: DeserializeOwned>(
        operation: &str,
        response: Response,
    ) -> Result<T, ReviewError> {
        let bytes = response
            .bytes()
            .await
            .map_err(|error| map_transport_error(operation, &error))?;

        serde_json::from_slice(&bytes).map_err(|error| ReviewError::Decode {
            message: format!("{operation} response JSON decoding failed: {error}"),
        })
    }
}

#[async_trait]
impl ReviewGateway for HttpReviewGateway {
    async fn create(
        &self,
        hotel_id: &HotelId,
        payload: &ReviewPayload,
    ) -> Result<Review, ReviewError> {
        let url = self.locator.reviews_url(hotel_id)?;
        let builder = self.request(Method::POST, url).json(payload);
        let response = self.send("create review", builder).await?;
        Self::decode::<ApiReview>("create review", response)
            .await
            .map(Review::from)
    }

    async fn list(
        &self,
        hotel_id: &HotelId,
        query: &PagedReviewQuery,
    ) -> Result<ReviewPage, ReviewError> {
        let url = self.locator.reviews_url(hotel_id)?;
        let builder = self
            .request(Method::GET, url)
            .query(query.to_query_pairs().as_slice());
        let response = self.send("list reviews", builder).await?;
        Self::decode::<ApiReviewPage>("list reviews", response)
            .await
            .map(ReviewPage::from)
    }

    async fn get_one(
        &self,
        hotel_id: &HotelId,
        review_id: &ReviewId,
    ) -> Result<Review, ReviewError> {
        let url = self.locator.review_url(hotel_id, review_id)?;
        let response = self
            .send("get review", self.request(Method::GET, url))
            .await?;
        Self::decode::<ApiReview>("get review", response)
            .await
            .map(Review::from)
    }

    async fn update(
        &self,
        hotel_id: &HotelId,
        review_id: &ReviewId,
        payload: &ReviewPayload,
    ) -> Result<Review, ReviewError> {
        let url = self.locator.review_url(hotel_id, review_id)?;
        let builder = self.request(Method::PUT, url).json(payload);
        let response = self.send("update review", builder).await?;
        Self::decode::<ApiReview>("update review", response)
            .await
            .map(Review::from)
    }

    async fn delete(
        &self,
        hotel_id: &HotelId,
        review_id: &ReviewId,
    ) -> Result<DeleteConfirmation, ReviewError> {
        let url = self.locator.review_url(hotel_id, review_id)?;
        let response = self
            .send("delete review", self.request(Method::DELETE, url))
            .await?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|error| map_transport_error("delete review", &error))?;

        Ok(DeleteConfirmation { status, body })
    }
}
