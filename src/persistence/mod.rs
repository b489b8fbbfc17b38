//! Local persistence and database migrations.
//!
//! The session store persists its slots in a local `SQLite` database. The
//! schema is managed with Diesel migrations so the database can be created
//! and upgraded consistently across machines.

mod error;
mod migrator;
mod session_slots;

pub use error::PersistenceError;
pub use migrator::{INITIAL_SCHEMA_VERSION, SchemaVersion, migrate_database};
pub use session_slots::SqliteSessionStorage;

use diesel::Connection;
use diesel::sqlite::SqliteConnection;

/// Opens the session database at `database_url`, creating the file if needed.
fn open_connection(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    let url = database_url.trim();
    if url.is_empty() {
        return Err(PersistenceError::BlankDatabaseUrl);
    }
    SqliteConnection::establish(url).map_err(|error| PersistenceError::ConnectionFailed {
        message: error.to_string(),
    })
}
