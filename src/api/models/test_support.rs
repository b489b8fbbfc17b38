//! Test helpers for constructing `Review` fixtures.
//!
//! # Examples
//!
//! ```
//! use hotel_reviews::api::models::test_support::{review_with_id, sample_review};
//!
//! let review = sample_review("R1", 4, "Great stay");
//! assert_eq!(review.rating, 4);
//!
//! let other = review_with_id("R2");
//! assert_eq!(other.review_id.as_str(), "R2");
//! ```

use chrono::{DateTime, TimeZone, Utc};

use super::{Review, ReviewAuthor};
use crate::api::locator::{HotelId, ReviewId};

/// Hotel used by every fixture review.
pub const FIXTURE_HOTEL: &str = "H1";

/// Fixed creation time so rendered output stays stable.
#[must_use]
pub fn fixture_created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 10, 15, 0)
        .single()
        .unwrap_or_default()
}

/// Builds a review for [`FIXTURE_HOTEL`] written by Ada Lovelace.
///
/// # Panics
///
/// Panics when `id` is blank.
#[must_use]
pub fn sample_review(id: &str, rating: u8, review_text: &str) -> Review {
    Review {
        review_id: ReviewId::new(id)
            .unwrap_or_else(|error| panic!("fixture review id {id:?} is invalid: {error}")),
        hotel_id: HotelId::new(FIXTURE_HOTEL)
            .unwrap_or_else(|error| panic!("fixture hotel id is invalid: {error}")),
        user: Some(ReviewAuthor {
            first_name: Some("Ada".to_owned()),
            last_name: Some("Lovelace".to_owned()),
        }),
        rating,
        review_text: review_text.to_owned(),
        created_at: fixture_created_at(),
    }
}

/// Builds a five-star review whose text mentions its id.
///
/// # Panics
///
/// Panics when `id` is blank.
#[must_use]
pub fn review_with_id(id: &str) -> Review {
    sample_review(id, 5, &format!("Review {id}"))
}

/// Builds `count` reviews with ids `R1..=R{count}`.
#[must_use]
pub fn reviews(count: usize) -> Vec<Review> {
    (1..=count).map(|index| review_with_id(&format!("R{index}"))).collect()
}
