//! Review form: client-side validation and the submit cycle.
//!
//! The form validates a rating and review text before anything reaches the
//! network, guards against duplicate submission while a request is in
//! flight, and hands validated values to an injected [`SubmitHandler`].

mod fields;
mod handlers;
mod state;

pub use fields::{
    DEFAULT_RATING, Field, FieldError, MIN_REVIEW_TEXT_CHARS, Rating, ReviewDraft,
    ReviewFormValues, ReviewText, ValidationErrors,
};
pub use handlers::{CreateReviewHandler, SubmitHandler, UpdateReviewHandler};
pub use state::{FormError, FormState, ReviewForm};

#[cfg(test)]
pub use handlers::MockSubmitHandler;
