//! Data models exchanged with the hotel review service.
//!
//! The server owns these shapes; the client only deserialises them. Field
//! names follow the service's snake_case wire format and also accept the
//! camelCase spelling some deployments emit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::locator::{HotelId, ReviewId};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Name fields of the user who wrote a review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewAuthor {
    /// Given name, if the service shares it.
    #[serde(default, alias = "firstName")]
    pub first_name: Option<String>,
    /// Family name, if the service shares it.
    #[serde(default, alias = "lastName")]
    pub last_name: Option<String>,
}

/// A hotel review as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Server-assigned identifier.
    #[serde(alias = "reviewId")]
    pub review_id: ReviewId,
    /// Hotel the review belongs to.
    #[serde(alias = "hotelId")]
    pub hotel_id: HotelId,
    /// Author details, absent for anonymous reviews.
    #[serde(default)]
    pub user: Option<ReviewAuthor>,
    /// Star rating, expected in `1..=5`.
    pub rating: u8,
    /// Free-text body.
    #[serde(alias = "reviewText")]
    pub review_text: String,
    /// Creation time, assigned once by the server.
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Request body for create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewPayload {
    /// Star rating in `1..=5`.
    pub rating: u8,
    /// Review text, at least five characters.
    pub review_text: String,
}

/// One page of reviews from the list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewPage {
    /// Reviews in server order.
    pub reviews: Vec<Review>,
    /// Page number echoed by the server, when provided.
    pub page: Option<u32>,
    /// Page size echoed by the server, when provided.
    pub limit: Option<u32>,
    /// Total number of reviews for the hotel, when provided.
    pub total: Option<u64>,
}

/// Response of the delete endpoint. No body contract is enforced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    /// HTTP status returned by the service.
    pub status: u16,
    /// Raw response body, possibly empty.
    pub body: String,
}

/// The list endpoint either returns a bare array or a paging envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum ApiReviewPage {
    Bare(Vec<Review>),
    Envelope {
        #[serde(alias = "data", alias = "items")]
        reviews: Vec<Review>,
        #[serde(default)]
        page: Option<u32>,
        #[serde(default)]
        limit: Option<u32>,
        #[serde(default)]
        total: Option<u64>,
    },
}

impl From<ApiReviewPage> for ReviewPage {
    fn from(api: ApiReviewPage) -> Self {
        match api {
            ApiReviewPage::Bare(reviews) => Self {
                reviews,
                ..Self::default()
            },
            ApiReviewPage::Envelope {
                reviews,
                page,
                limit,
                total,
            } => Self {
                reviews,
                page,
                limit,
                total,
            },
        }
    }
}

/// Some deployments wrap single-review responses as `{ "review": { ... } }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum ApiReview {
    Bare(Review),
    Wrapped { review: Review },
}

impl From<ApiReview> for Review {
    fn from(api: ApiReview) -> Self {
        match api {
            ApiReview::Bare(review) | ApiReview::Wrapped { review } => review,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ApiReview, ApiReviewPage, Review, ReviewPage};

    fn review_json(id: &str) -> serde_json::Value {
        json!({
            "review_id": id,
            "hotel_id": "H1",
            "user": { "first_name": "Ada", "last_name": "Lovelace" },
            "rating": 4,
            "review_text": "Great stay",
            "created_at": "2025-03-01T10:15:00Z"
        })
    }

    #[test]
    fn review_accepts_camel_case_and_numeric_ids() {
        let review: Review = serde_json::from_value(json!({
            "reviewId": 7,
            "hotelId": 1,
            "rating": 5,
            "reviewText": "Lovely pool",
            "createdAt": "2025-03-01T10:15:00Z"
        }))
        .expect("camelCase review should decode");

        assert_eq!(review.review_id.as_str(), "7");
        assert_eq!(review.hotel_id.as_str(), "1");
        assert!(review.user.is_none());
        assert_eq!(review.review_text, "Lovely pool");
    }

    #[test]
    fn page_accepts_bare_array() {
        let api: ApiReviewPage = serde_json::from_value(json!([review_json("R1"), review_json("R2")]))
            .expect("bare array should decode");
        let page = ReviewPage::from(api);

        assert_eq!(page.reviews.len(), 2);
        assert_eq!(page.total, None);
    }

    #[test]
    fn page_accepts_envelope_with_paging_fields() {
        let api: ApiReviewPage = serde_json::from_value(json!({
            "data": [review_json("R1")],
            "page": 2,
            "limit": 10,
            "total": 11
        }))
        .expect("envelope should decode");
        let page = ReviewPage::from(api);

        assert_eq!(page.reviews.len(), 1);
        assert_eq!(page.page, Some(2));
        assert_eq!(page.limit, Some(10));
        assert_eq!(page.total, Some(11));
    }

    #[test]
    fn single_review_may_be_wrapped() {
        let api: ApiReview = serde_json::from_value(json!({ "review": review_json("R9") }))
            .expect("wrapped review should decode");
        let review = Review::from(api);

        assert_eq!(review.review_id.as_str(), "R9");
    }
}
