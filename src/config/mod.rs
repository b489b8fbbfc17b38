//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.hotel-reviews.toml` in current directory,
//!    home directory, or XDG config directory
//! 3. **Environment variables** – `HOTEL_REVIEWS_API_BASE_URL`,
//!    `HOTEL_REVIEWS_TOKEN`, and so on
//! 4. **Command-line arguments** – `--api-base-url`/`-u`, `--hotel-id`/`-H`,
//!    and the other flags below
//!
//! # Configuration File
//!
//! ```toml
//! api_base_url = "https://reviews.example.com/api"
//! hotel_id = "H1"
//! database_url = "hotel-reviews.sqlite"
//! request_timeout_seconds = 20
//! ```

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::api::{
    DEFAULT_TIMEOUT, HotelId, PagedReviewQuery, ReviewError, ReviewId, ReviewServiceLocator,
    SortOrder,
};
use crate::form::ReviewDraft;

/// Operation mode determined by CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Apply session database migrations and exit.
    MigrateDatabase,
    /// Clear the stored token and user.
    Logout,
    /// Store the supplied token for later runs.
    Login,
    /// Delete one review.
    DeleteReview,
    /// Update one review with the supplied rating or text.
    UpdateReview,
    /// Create a review from the supplied rating and text.
    CreateReview,
    /// Show one review.
    ShowReview,
    /// List a page of reviews.
    ListReviews,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `HOTEL_REVIEWS_API_BASE_URL` or `--api-base-url`: Review service base URL
/// - `HOTEL_REVIEWS_HOTEL_ID` or `--hotel-id`: Hotel whose reviews to use
/// - `HOTEL_REVIEWS_TOKEN` or `--token`: Bearer token
/// - `HOTEL_REVIEWS_DATABASE_URL` or `--database-url`: Session database path
///
/// # Example
///
/// ```no_run
/// use hotel_reviews::HotelReviewsConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = HotelReviewsConfig::load().expect("failed to load configuration");
/// let hotel = config.require_hotel_id().expect("hotel id required");
/// let query = config.review_query().expect("valid paging");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "HOTEL_REVIEWS",
    discovery(
        dotfile_name = ".hotel-reviews.toml",
        config_file_name = "hotel-reviews.toml",
        app_name = "hotel-reviews"
    )
)]
pub struct HotelReviewsConfig {
    /// Base URL the `/hotels/{hotelId}/reviews` resource hangs off.
    ///
    /// Can be provided via:
    /// - CLI: `--api-base-url <URL>` or `-u <URL>`
    /// - Environment: `HOTEL_REVIEWS_API_BASE_URL`
    /// - Config file: `api_base_url = "..."`
    #[ortho_config(cli_short = 'u')]
    pub api_base_url: Option<String>,

    /// Hotel whose reviews are listed or mutated.
    #[ortho_config(cli_short = 'H')]
    pub hotel_id: Option<String>,

    /// Review to show, update, or delete.
    #[ortho_config(cli_short = 'r')]
    pub review_id: Option<String>,

    /// Bearer token.
    ///
    /// When given without a hotel, the token is stored in the session
    /// database. Otherwise it is used for this run only and the stored token
    /// is ignored.
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Local `SQLite` database holding the session slots.
    ///
    /// Can be provided via:
    /// - CLI: `--database-url <PATH>`
    /// - Environment: `HOTEL_REVIEWS_DATABASE_URL`
    /// - Config file: `database_url = "..."`
    #[ortho_config(cli_short = 'D')]
    pub database_url: Option<String>,

    /// Runs database migrations and exits.
    #[ortho_config()]
    pub migrate_db: bool,

    /// 1-based page to list.
    #[ortho_config(cli_short = 'p')]
    pub page: Option<u32>,

    /// Page size, at most 100.
    #[ortho_config(cli_short = 'l')]
    pub limit: Option<u32>,

    /// `asc` or `desc` by creation time.
    #[ortho_config(cli_short = 's')]
    pub sort: Option<String>,

    /// Star rating for create or update.
    #[ortho_config(cli_short = 'R')]
    pub rating: Option<u8>,

    /// Review text for create or update.
    #[ortho_config(cli_short = 'x')]
    pub review_text: Option<String>,

    /// Deletes `review_id`.
    ///
    /// Note: `ortho_config` does not load boolean values from the
    /// environment, so only the CLI and config file can set this.
    #[ortho_config(cli_short = 'd')]
    pub delete: bool,

    /// Clears the stored session and exits.
    #[ortho_config()]
    pub logout: bool,

    /// HTTP request timeout in seconds.
    ///
    /// Defaults to 20 seconds.
    #[ortho_config()]
    pub request_timeout_seconds: u64,
}

impl Default for HotelReviewsConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            hotel_id: None,
            review_id: None,
            token: None,
            database_url: None,
            migrate_db: false,
            page: None,
            limit: None,
            sort: None,
            rating: None,
            review_text: None,
            delete: false,
            logout: false,
            request_timeout_seconds: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl HotelReviewsConfig {
    /// Determines the operation mode based on provided configuration.
    ///
    /// Housekeeping flags win over review operations. A token without a
    /// hotel is a login. With a review id, `delete` selects a delete and a
    /// rating or text selects an update; otherwise the review is shown. A
    /// rating or text without a review id creates a review, and anything else
    /// lists reviews.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        let has_edits = self.rating.is_some() || self.review_text.is_some();

        if self.migrate_db {
            OperationMode::MigrateDatabase
        } else if self.logout {
            OperationMode::Logout
        } else if self.token.is_some() && self.hotel_id.is_none() {
            OperationMode::Login
        } else if self.review_id.is_some() {
            if self.delete {
                OperationMode::DeleteReview
            } else if has_edits {
                OperationMode::UpdateReview
            } else {
                OperationMode::ShowReview
            }
        } else if has_edits {
            OperationMode::CreateReview
        } else {
            OperationMode::ListReviews
        }
    }

    /// Returns the service locator for `api_base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Configuration`] when no URL is configured and
    /// [`ReviewError::InvalidUrl`] when it does not parse.
    pub fn service_locator(&self) -> Result<ReviewServiceLocator, ReviewError> {
        let api_base = self
            .api_base_url
            .as_deref()
            .ok_or_else(|| ReviewError::Configuration {
                message: "review service URL is required (use --api-base-url or -u)".to_owned(),
            })?;
        ReviewServiceLocator::parse(api_base)
    }

    /// Returns the configured hotel.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Configuration`] when missing and
    /// [`ReviewError::InvalidIdentifier`] when blank.
    pub fn require_hotel_id(&self) -> Result<HotelId, ReviewError> {
        let raw = self
            .hotel_id
            .as_deref()
            .ok_or_else(|| ReviewError::Configuration {
                message: "hotel id is required (use --hotel-id or -H)".to_owned(),
            })?;
        HotelId::new(raw)
    }

    /// Returns the configured review.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Configuration`] when missing and
    /// [`ReviewError::InvalidIdentifier`] when blank.
    pub fn require_review_id(&self) -> Result<ReviewId, ReviewError> {
        let raw = self
            .review_id
            .as_deref()
            .ok_or_else(|| ReviewError::Configuration {
                message: "review id is required (use --review-id or -r)".to_owned(),
            })?;
        ReviewId::new(raw)
    }

    /// Builds the list query from `page`, `limit`, and `sort`.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::InvalidPagination`] for out-of-range values or
    /// an unknown sort order.
    pub fn review_query(&self) -> Result<PagedReviewQuery, ReviewError> {
        let sort = self
            .sort
            .as_deref()
            .map(str::parse::<SortOrder>)
            .transpose()?;
        PagedReviewQuery::from_parts(self.page, self.limit, sort)
    }

    /// Overlays the configured rating and text on `base`.
    ///
    /// Fields that were not configured keep `base`'s values, so an update can
    /// change only the rating or only the text.
    #[must_use]
    pub fn apply_to_draft(&self, base: ReviewDraft) -> ReviewDraft {
        ReviewDraft {
            rating: self.rating.or(base.rating),
            review_text: self.review_text.clone().unwrap_or(base.review_text),
        }
    }

    /// Returns the HTTP timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

#[cfg(test)]
mod tests;
