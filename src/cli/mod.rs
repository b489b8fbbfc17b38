//! CLI operation mode handlers.
//!
//! This module contains the implementations for different operation modes:
//! - [`migrations`]: Session database schema migrations
//! - [`session`]: Storing and clearing the auth token
//! - [`reviews`]: Listing, showing, creating, updating, and deleting reviews
//!
//! Output formatting utilities are in [`output`].

use hotel_reviews::ReviewError;
use hotel_reviews::form::FormError;
use hotel_reviews::persistence::PersistenceError;
use hotel_reviews::reviews::{ReconcileError, ScreenError};

pub mod migrations;
pub mod output;
pub mod reviews;
pub mod session;

/// Maps a persistence error to a review error.
///
/// Configuration-related errors (missing or blank URL) become
/// [`ReviewError::Configuration`], while runtime errors (connection,
/// migration, query failures) become [`ReviewError::Io`].
pub fn map_persistence_error(error: &PersistenceError) -> ReviewError {
    if is_configuration_error(error) {
        ReviewError::Configuration {
            message: error.to_string(),
        }
    } else {
        ReviewError::Io {
            message: error.to_string(),
        }
    }
}

/// Returns true if the persistence error is a configuration problem.
const fn is_configuration_error(error: &PersistenceError) -> bool {
    matches!(
        error,
        PersistenceError::MissingDatabaseUrl | PersistenceError::BlankDatabaseUrl
    )
}

/// Maps a form error to a review error.
///
/// Review values come from configuration, so a validation failure is
/// reported as a configuration problem.
pub fn map_form_error(error: FormError) -> ReviewError {
    match error {
        FormError::Submit(inner) => inner,
        FormError::Validation(errors) => ReviewError::Configuration {
            message: format!("invalid review: {errors}"),
        },
        other @ FormError::SubmissionInFlight => ReviewError::Configuration {
            message: other.to_string(),
        },
    }
}

/// Maps a screen error to a review error.
pub fn map_screen_error(error: ScreenError) -> ReviewError {
    match error {
        ScreenError::Api(inner) | ScreenError::Reconcile(ReconcileError::Rejected(inner)) => inner,
        ScreenError::Form(inner) => map_form_error(inner),
        other => ReviewError::Configuration {
            message: other.to_string(),
        },
    }
}
