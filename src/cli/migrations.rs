//! Database migration operations.

use std::io::Write;

use hotel_reviews::persistence::{PersistenceError, migrate_database};
use hotel_reviews::telemetry::StderrJsonlTelemetrySink;
use hotel_reviews::{HotelReviewsConfig, ReviewError};

use super::map_persistence_error;
use super::output::write_line_to;

/// Runs database migrations.
///
/// # Errors
///
/// Returns [`ReviewError::Configuration`] if the database URL is missing or
/// blank. Returns [`ReviewError::Io`] for connection or migration failures.
pub fn run<W: Write>(config: &HotelReviewsConfig, writer: &mut W) -> Result<(), ReviewError> {
    let database_url = config
        .database_url
        .as_deref()
        .ok_or_else(|| map_persistence_error(&PersistenceError::MissingDatabaseUrl))?;

    let telemetry = StderrJsonlTelemetrySink;
    let version = migrate_database(database_url, &telemetry)
        .map_err(|error| map_persistence_error(&error))?;

    write_line_to(
        writer,
        &format!("Session database is at schema version {}", version.as_str()),
    )
}
