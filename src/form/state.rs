//! Submit lifecycle of the review form.

use thiserror::Error;

use crate::api::{Review, ReviewError};

use super::fields::{Field, FieldError, ReviewDraft, ReviewFormValues, ValidationErrors};
use super::handlers::SubmitHandler;

/// Where the form is in its submit cycle.
///
/// `Succeeded`, `ValidationFailed`, and `Failed` are terminal for one
/// attempt; a new submission starts the cycle again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormState {
    /// Nothing submitted yet, or the form was reset.
    #[default]
    Idle,
    /// A submission is awaiting the server.
    Submitting,
    /// The server accepted the submission.
    Succeeded(Review),
    /// Client-side validation blocked the submission.
    ValidationFailed(ValidationErrors),
    /// The submit handler returned an error.
    Failed(ReviewError),
}

/// Errors returned from a submit attempt.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    /// One or more fields are invalid; nothing was sent.
    #[error("review form is invalid: {0}")]
    Validation(ValidationErrors),

    /// A previous submission has not resolved yet.
    #[error("a submission is already in flight")]
    SubmissionInFlight,

    /// The submit handler failed.
    #[error(transparent)]
    Submit(#[from] ReviewError),
}

/// Review form model shared by create and edit.
///
/// The form is seeded with an initial draft: [`ReviewDraft::default`] for a
/// new review, or [`ReviewForm::for_edit`] for an existing one.
///
/// # Example
///
/// ```
/// use hotel_reviews::form::{FormError, FormState, ReviewDraft, ReviewForm};
///
/// let mut form = ReviewForm::new(ReviewDraft::default());
/// form.set_review_text("Good");
///
/// let result = form.begin_submit();
/// assert!(matches!(result, Err(FormError::Validation(_))));
/// assert!(matches!(form.state(), FormState::ValidationFailed(_)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewForm {
    initial: ReviewDraft,
    draft: ReviewDraft,
    state: FormState,
}

impl ReviewForm {
    /// Creates a form whose fields start at `initial`.
    #[must_use]
    pub fn new(initial: ReviewDraft) -> Self {
        Self {
            draft: initial.clone(),
            initial,
            state: FormState::Idle,
        }
    }

    /// Creates a form seeded with an existing review's values.
    #[must_use]
    pub fn for_edit(review: &Review) -> Self {
        Self::new(ReviewDraft::from(review))
    }

    /// Current field values.
    #[must_use]
    pub const fn draft(&self) -> &ReviewDraft {
        &self.draft
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> &FormState {
        &self.state
    }

    /// True while a submission awaits the server; the submit control is
    /// disabled.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.state, FormState::Submitting)
    }

    /// Returns the inline error for `field` from the last attempt.
    #[must_use]
    pub const fn field_error(&self, field: Field) -> Option<&FieldError> {
        match &self.state {
            FormState::ValidationFailed(errors) => errors.field(field),
            _ => None,
        }
    }

    /// Selects a rating.
    pub const fn set_rating(&mut self, rating: Option<u8>) {
        self.draft.rating = rating;
    }

    /// Replaces the review text.
    pub fn set_review_text(&mut self, text: impl Into<String>) {
        self.draft.review_text = text.into();
    }

    /// Restores the initial values and returns to `Idle`.
    ///
    /// Has no effect while a submission is in flight.
    pub fn reset(&mut self) {
        if self.is_loading() {
            return;
        }
        self.draft = self.initial.clone();
        self.state = FormState::Idle;
    }

    /// Returns a form stuck in `Submitting` to `Idle`, keeping its values.
    ///
    /// Use this when the request started by [`ReviewForm::begin_submit`]
    /// will never report back.
    pub fn abandon_submit(&mut self) {
        if self.is_loading() {
            self.state = FormState::Idle;
        }
    }

    /// Validates the fields and enters `Submitting`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::SubmissionInFlight`] while loading, leaving the
    /// state untouched, and [`FormError::Validation`] when a field is
    /// invalid.
    pub fn begin_submit(&mut self) -> Result<ReviewFormValues, FormError> {
        if self.is_loading() {
            return Err(FormError::SubmissionInFlight);
        }

        match self.draft.validate() {
            Ok(values) => {
                self.state = FormState::Submitting;
                Ok(values)
            }
            Err(errors) => {
                self.state = FormState::ValidationFailed(errors.clone());
                Err(FormError::Validation(errors))
            }
        }
    }

    /// Records the outcome of the submission started by
    /// [`ReviewForm::begin_submit`].
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Submit`] carrying the handler's error.
    pub fn finish_submit(&mut self, result: Result<Review, ReviewError>) -> Result<Review, FormError> {
        match result {
            Ok(review) => {
                self.state = FormState::Succeeded(review.clone());
                Ok(review)
            }
            Err(error) => {
                self.state = FormState::Failed(error.clone());
                Err(FormError::Submit(error))
            }
        }
    }

    /// Validates, invokes `handler`, and records the outcome.
    ///
    /// The handler is never invoked when validation fails.
    ///
    /// # Errors
    ///
    /// See [`ReviewForm::begin_submit`] and [`ReviewForm::finish_submit`].
    pub async fn submit<H: SubmitHandler + ?Sized>(
        &mut self,
        handler: &H,
    ) -> Result<Review, FormError> {
        let values = self.begin_submit()?;
        let result = handler.submit(&values).await;
        self.finish_submit(result)
    }
}
