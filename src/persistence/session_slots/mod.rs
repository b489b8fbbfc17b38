//! Session slots backed by `SQLite`.
//!
//! Each slot is a row in `session_slots`. Connections are opened per call;
//! the session is read once per command so pooling buys nothing.

use diesel::OptionalExtension;
use diesel::QueryableByName;
use diesel::RunQueryDsl;
use diesel::sql_query;
use diesel::sql_types::Text;
use diesel::sqlite::SqliteConnection;

use crate::session::{SessionError, SessionStorage};

use super::{PersistenceError, open_connection};

const SESSION_SLOTS_TABLE: &str = "session_slots";

/// SQLite-backed [`SessionStorage`].
#[derive(Debug, Clone)]
pub struct SqliteSessionStorage {
    database_url: String,
}

impl SqliteSessionStorage {
    /// Create a storage wrapper targeting the configured `database_url`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::BlankDatabaseUrl`] when the URL is blank.
    pub fn new(database_url: impl Into<String>) -> Result<Self, PersistenceError> {
        let database_url_string = database_url.into();
        if database_url_string.trim().is_empty() {
            return Err(PersistenceError::BlankDatabaseUrl);
        }
        Ok(Self {
            database_url: database_url_string.trim().to_owned(),
        })
    }

    /// Reads a slot value.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the database cannot be opened, the
    /// schema is missing, or the query fails.
    pub fn read_slot(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        #[derive(Debug, QueryableByName)]
        struct Row {
            #[diesel(sql_type = Text)]
            value: String,
        }

        let mut connection = self.establish_connection()?;

        let result: Option<Row> =
            sql_query("SELECT value FROM session_slots WHERE key = ? LIMIT 1;")
                .bind::<Text, _>(key)
                .get_result(&mut connection)
                .optional()
                .map_err(|error| Self::map_query_error(&mut connection, &error))?;

        Ok(result.map(|row| row.value))
    }

    /// Inserts or replaces a slot value.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the schema is missing or the write
    /// fails.
    pub fn write_slot(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let mut connection = self.establish_connection()?;

        sql_query(
            "INSERT INTO session_slots (key, value) VALUES (?, ?) \
             ON CONFLICT(key) DO UPDATE SET \
               value = excluded.value, \
               updated_at = CURRENT_TIMESTAMP;",
        )
        .bind::<Text, _>(key)
        .bind::<Text, _>(value)
        .execute(&mut connection)
        .map(drop)
        .map_err(|error| Self::map_write_error(&mut connection, &error))
    }

    /// Deletes a slot. Deleting an absent slot succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the schema is missing or the write
    /// fails.
    pub fn delete_slot(&self, key: &str) -> Result<(), PersistenceError> {
        let mut connection = self.establish_connection()?;

        sql_query("DELETE FROM session_slots WHERE key = ?;")
            .bind::<Text, _>(key)
            .execute(&mut connection)
            .map(drop)
            .map_err(|error| Self::map_write_error(&mut connection, &error))
    }

    fn establish_connection(&self) -> Result<SqliteConnection, PersistenceError> {
        open_connection(&self.database_url)
    }

    fn map_error_with_schema_check<F>(
        connection: &mut SqliteConnection,
        error: &diesel::result::Error,
        create_error: F,
    ) -> PersistenceError
    where
        F: Fn(String) -> PersistenceError,
    {
        match session_slots_exist(connection) {
            Ok(false) => PersistenceError::SchemaNotInitialised,
            Ok(true) => create_error(error.to_string()),
            Err(check_error) => create_error(format!(
                "schema presence check failed: {check_error}; original error: {error}"
            )),
        }
    }

    fn map_query_error(
        connection: &mut SqliteConnection,
        error: &diesel::result::Error,
    ) -> PersistenceError {
        Self::map_error_with_schema_check(connection, error, |message| {
            PersistenceError::QueryFailed { message }
        })
    }

    fn map_write_error(
        connection: &mut SqliteConnection,
        error: &diesel::result::Error,
    ) -> PersistenceError {
        Self::map_error_with_schema_check(connection, error, |message| {
            PersistenceError::WriteFailed { message }
        })
    }
}

/// Reports whether the `session_slots` table exists.
pub(super) fn session_slots_exist(
    connection: &mut SqliteConnection,
) -> Result<bool, diesel::result::Error> {
    #[derive(Debug, QueryableByName)]
    struct Row {
        #[diesel(sql_type = Text)]
        name: String,
    }

    let found: Option<Row> =
        sql_query("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ? LIMIT 1;")
            .bind::<Text, _>(SESSION_SLOTS_TABLE)
            .get_result(connection)
            .optional()?;

    Ok(found.is_some_and(|row| row.name == SESSION_SLOTS_TABLE))
}

impl SessionStorage for SqliteSessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.read_slot(key)?)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        Ok(self.write_slot(key, value)?)
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        Ok(self.delete_slot(key)?)
    }
}

#[cfg(test)]
mod tests;
