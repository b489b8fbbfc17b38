//! Storing, reading, and clearing the auth session.

use std::io::Write;

use hotel_reviews::api::BearerToken;
use hotel_reviews::persistence::{PersistenceError, SqliteSessionStorage};
use hotel_reviews::{HotelReviewsConfig, ReviewError, SessionStore};

use super::map_persistence_error;
use super::output::write_line_to;

/// Opens the session store at the configured database.
///
/// # Errors
///
/// Returns [`ReviewError::Configuration`] when no database URL is set.
pub fn open_store(
    config: &HotelReviewsConfig,
) -> Result<SessionStore<SqliteSessionStorage>, ReviewError> {
    let database_url = config
        .database_url
        .as_deref()
        .ok_or(PersistenceError::MissingDatabaseUrl)
        .map_err(|error| map_persistence_error(&error))?;
    let storage =
        SqliteSessionStorage::new(database_url).map_err(|error| map_persistence_error(&error))?;
    Ok(SessionStore::new(storage))
}

/// Stores the configured token.
///
/// # Errors
///
/// Returns [`ReviewError::MissingToken`] when no token is configured and
/// [`ReviewError::Session`] when the store cannot be written.
pub fn login<W: Write>(config: &HotelReviewsConfig, writer: &mut W) -> Result<(), ReviewError> {
    let token = BearerToken::new(config.token.as_deref().unwrap_or_default())?;
    let store = open_store(config)?;
    store.set_token(Some(token.value()))?;
    write_line_to(writer, "Token stored.")
}

/// Removes the stored token and user.
///
/// # Errors
///
/// Returns [`ReviewError::Session`] when the store cannot be written.
pub fn logout<W: Write>(config: &HotelReviewsConfig, writer: &mut W) -> Result<(), ReviewError> {
    let store = open_store(config)?;
    store.clear_auth()?;
    write_line_to(writer, "Logged out.")
}

/// Returns the token for this run.
///
/// A configured token wins. Otherwise the stored token is used when a
/// session database is configured.
///
/// # Errors
///
/// Returns [`ReviewError::MissingToken`] for a blank configured token and
/// [`ReviewError::Session`] when the store cannot be read.
pub fn resolve_token(config: &HotelReviewsConfig) -> Result<Option<BearerToken>, ReviewError> {
    if let Some(raw) = config.token.as_deref() {
        return BearerToken::new(raw).map(Some);
    }
    if config.database_url.is_none() {
        return Ok(None);
    }
    Ok(open_store(config)?.bearer_token()?)
}
