//! Field values and client-side validation for the review form.

use std::fmt;

use thiserror::Error;

use crate::api::{Review, ReviewPayload};

/// Minimum review length in Unicode scalar values.
pub const MIN_REVIEW_TEXT_CHARS: usize = 5;

/// Rating offered to a fresh review.
pub const DEFAULT_RATING: u8 = 5;

/// Star rating in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: u8 = 1;
    /// Highest accepted rating.
    pub const MAX: u8 = 5;

    /// Validates a raw rating.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::RatingOutOfRange`] outside `1..=5`.
    pub const fn new(value: u8) -> Result<Self, FieldError> {
        if value < Self::MIN || value > Self::MAX {
            return Err(FieldError::RatingOutOfRange { value });
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Ratings in display order, highest first.
    #[must_use]
    pub const fn choices() -> [u8; 5] {
        [5, 4, 3, 2, 1]
    }
}

/// Review body with at least [`MIN_REVIEW_TEXT_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewText(String);

impl ReviewText {
    /// Validates review text. Whitespace counts toward the length.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::ReviewTextMissing`] for empty text and
    /// [`FieldError::ReviewTextTooShort`] below the minimum.
    pub fn new(value: impl Into<String>) -> Result<Self, FieldError> {
        let text = value.into();
        let actual = text.chars().count();
        if actual == 0 {
            return Err(FieldError::ReviewTextMissing);
        }
        if actual < MIN_REVIEW_TEXT_CHARS {
            return Err(FieldError::ReviewTextTooShort {
                min: MIN_REVIEW_TEXT_CHARS,
                actual,
            });
        }
        Ok(Self(text))
    }

    /// Borrow the text.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// A validation failure on one field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    /// No rating was chosen.
    #[error("rating is required")]
    RatingMissing,

    /// The rating is outside `1..=5`.
    #[error("rating must be between 1 and 5, got {value}")]
    RatingOutOfRange {
        /// Rejected value.
        value: u8,
    },

    /// The review text is empty.
    #[error("review text is required")]
    ReviewTextMissing,

    /// The review text is shorter than the minimum.
    #[error("review must be at least {min} characters (got {actual})")]
    ReviewTextTooShort {
        /// Required minimum.
        min: usize,
        /// Length supplied.
        actual: usize,
    },
}

/// Form fields, for addressing inline errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The star rating.
    Rating,
    /// The review body.
    ReviewText,
}

/// Per-field validation outcome. At least one field is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    /// Error for the rating field.
    pub rating: Option<FieldError>,
    /// Error for the review text field.
    pub review_text: Option<FieldError>,
}

impl ValidationErrors {
    /// Returns the error for one field.
    #[must_use]
    pub const fn field(&self, field: Field) -> Option<&FieldError> {
        match field {
            Field::Rating => self.rating.as_ref(),
            Field::ReviewText => self.review_text.as_ref(),
        }
    }

    /// Returns true when no field failed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rating.is_none() && self.review_text.is_none()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = [self.rating.as_ref(), self.review_text.as_ref()]
            .into_iter()
            .flatten()
            .map(ToString::to_string)
            .collect();
        formatter.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Validated form values ready to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewFormValues {
    /// Chosen rating.
    pub rating: Rating,
    /// Review body.
    pub review_text: ReviewText,
}

impl ReviewFormValues {
    /// Shapes the values into the request body.
    #[must_use]
    pub fn to_payload(&self) -> ReviewPayload {
        ReviewPayload {
            rating: self.rating.get(),
            review_text: self.review_text.as_str().to_owned(),
        }
    }
}

/// Raw, possibly invalid field values as the user typed them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    /// Selected rating, if any.
    pub rating: Option<u8>,
    /// Text typed so far.
    pub review_text: String,
}

impl Default for ReviewDraft {
    fn default() -> Self {
        Self {
            rating: Some(DEFAULT_RATING),
            review_text: String::new(),
        }
    }
}

impl From<&Review> for ReviewDraft {
    fn from(review: &Review) -> Self {
        Self {
            rating: Some(review.rating),
            review_text: review.review_text.clone(),
        }
    }
}

impl ReviewDraft {
    /// Creates a draft from raw values.
    #[must_use]
    pub fn new(rating: Option<u8>, review_text: impl Into<String>) -> Self {
        Self {
            rating,
            review_text: review_text.into(),
        }
    }

    /// Validates every field and reports all failures together.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] naming each failing field.
    pub fn validate(&self) -> Result<ReviewFormValues, ValidationErrors> {
        let rating = self
            .rating
            .ok_or(FieldError::RatingMissing)
            .and_then(Rating::new);
        let review_text = ReviewText::new(self.review_text.as_str());

        match (rating, review_text) {
            (Ok(rating), Ok(review_text)) => Ok(ReviewFormValues {
                rating,
                review_text,
            }),
            (rating, review_text) => Err(ValidationErrors {
                rating: rating.err(),
                review_text: review_text.err(),
            }),
        }
    }
}
