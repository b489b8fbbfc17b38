//! Review list component.
//!
//! Renders an ordered slice of reviews as text and exposes the edit and
//! delete intents each row can raise. The component holds no collection
//! state and performs no network calls; the owning screen decides what to do
//! with an intent.

use chrono::{FixedOffset, Offset, Utc};

use crate::api::{Review, ReviewId};

/// Text shown in place of the list when there are no reviews.
pub const EMPTY_PLACEHOLDER: &str = "No reviews yet.";

/// `strftime` pattern used for `created_at` (e.g. `Mar 1, 2025 10:15`).
pub const CREATED_AT_FORMAT: &str = "%b %-d, %Y %H:%M";

const DEFAULT_FIRST_NAME: &str = "User";

/// Display fields derived from a [`Review`].
///
/// Absent author fields are filled here so rendering never has to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayReview {
    /// Review the row was built from.
    pub review_id: ReviewId,
    /// Author first name, `User` when unknown.
    pub first_name: String,
    /// Author last name, empty when unknown.
    pub last_name: String,
    /// Star rating.
    pub rating: u8,
    /// Review body.
    pub review_text: String,
    /// Creation time formatted with [`CREATED_AT_FORMAT`].
    pub created_at: String,
}

impl DisplayReview {
    /// Builds display fields, formatting `created_at` in `offset`.
    #[must_use]
    pub fn with_offset(review: &Review, offset: FixedOffset) -> Self {
        let author = review.user.as_ref();
        let first_name = author
            .and_then(|user| user.first_name.clone())
            .unwrap_or_else(|| DEFAULT_FIRST_NAME.to_owned());
        let last_name = author
            .and_then(|user| user.last_name.clone())
            .unwrap_or_default();

        Self {
            review_id: review.review_id.clone(),
            first_name,
            last_name,
            rating: review.rating,
            review_text: review.review_text.clone(),
            created_at: review
                .created_at
                .with_timezone(&offset)
                .format(CREATED_AT_FORMAT)
                .to_string(),
        }
    }

    /// First and last name joined by a space.
    #[must_use]
    pub fn author_name(&self) -> String {
        if self.last_name.is_empty() {
            return self.first_name.clone();
        }
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Rating drawn as five stars.
    #[must_use]
    pub fn stars(&self) -> String {
        let filled = usize::from(self.rating.min(5));
        let mut stars = "★".repeat(filled);
        stars.push_str(&"☆".repeat(5 - filled));
        stars
    }
}

impl From<&Review> for DisplayReview {
    fn from(review: &Review) -> Self {
        Self::with_offset(review, Utc.fix())
    }
}

/// Intent raised by a list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewIntent {
    /// Open the edit form seeded with this review.
    Edit(Review),
    /// Delete the review with this id.
    Delete(ReviewId),
}

/// One rendered row plus its intents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewListItem {
    review: Review,
    display: DisplayReview,
}

impl ReviewListItem {
    /// Display fields for the row.
    #[must_use]
    pub const fn display(&self) -> &DisplayReview {
        &self.display
    }

    /// Intent raised by the row's edit control.
    #[must_use]
    pub fn edit_intent(&self) -> ReviewIntent {
        ReviewIntent::Edit(self.review.clone())
    }

    /// Intent raised by the row's delete control.
    #[must_use]
    pub fn delete_intent(&self) -> ReviewIntent {
        ReviewIntent::Delete(self.review.review_id.clone())
    }
}

/// Component for displaying a list of reviews.
#[derive(Debug, Clone, Copy)]
pub struct ReviewListComponent {
    offset: FixedOffset,
}

impl Default for ReviewListComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewListComponent {
    /// Creates a component that formats times in UTC.
    #[must_use]
    pub fn new() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Creates a component that formats times in `offset`.
    #[must_use]
    pub const fn with_offset(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Builds one item per review, in input order.
    #[must_use]
    pub fn items(&self, reviews: &[Review]) -> Vec<ReviewListItem> {
        reviews
            .iter()
            .map(|review| ReviewListItem {
                review: review.clone(),
                display: DisplayReview::with_offset(review, self.offset),
            })
            .collect()
    }

    /// Renders the reviews as text, or [`EMPTY_PLACEHOLDER`] when empty.
    #[must_use]
    pub fn view(&self, reviews: &[Review]) -> String {
        if reviews.is_empty() {
            return format!("{EMPTY_PLACEHOLDER}\n");
        }

        let mut output = String::new();
        for item in self.items(reviews) {
            output.push_str(&format_row(item.display()));
        }
        output
    }
}

fn format_row(display: &DisplayReview) -> String {
    format!(
        "[{}] {} {} on {}\n    {}\n",
        display.review_id,
        display.stars(),
        display.author_name(),
        display.created_at,
        display.review_text,
    )
}
