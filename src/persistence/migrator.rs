//! Brings the session database up to date with the embedded migrations.

use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::telemetry::{TelemetryEvent, TelemetrySink};

use super::session_slots::session_slots_exist;
use super::{PersistenceError, open_connection};

/// Migrations compiled into the binary from `migrations/`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Version of the migration that creates `session_slots`.
pub const INITIAL_SCHEMA_VERSION: &str = "20251019000000";

/// Newest migration applied to a session database.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SchemaVersion(String);

impl SchemaVersion {
    /// Version string as recorded by Diesel.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Applies pending migrations so the session slots table can be used.
///
/// Running it against an up-to-date database applies nothing and leaves
/// stored slots untouched. Each successful run records
/// [`TelemetryEvent::SchemaVersionRecorded`].
///
/// # Errors
///
/// Returns [`PersistenceError::BlankDatabaseUrl`] or
/// [`PersistenceError::ConnectionFailed`] when the database cannot be opened,
/// [`PersistenceError::MigrationFailed`] when a migration fails, and
/// [`PersistenceError::SchemaNotInitialised`] when `session_slots` is still
/// missing afterwards.
pub fn migrate_database(
    database_url: &str,
    telemetry: &dyn TelemetrySink,
) -> Result<SchemaVersion, PersistenceError> {
    let mut connection = open_connection(database_url)?;

    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|error| PersistenceError::MigrationFailed {
            message: error.to_string(),
        })?
        .len();

    let schema_version = newest_applied(&mut connection)?;
    let slots_ready = session_slots_exist(&mut connection).map_err(|error| {
        PersistenceError::SchemaVersionQueryFailed {
            message: error.to_string(),
        }
    })?;
    if !slots_ready {
        return Err(PersistenceError::SchemaNotInitialised);
    }

    tracing::info!(
        schema_version = schema_version.as_str(),
        applied,
        "session database ready"
    );
    telemetry.record(TelemetryEvent::SchemaVersionRecorded {
        schema_version: schema_version.as_str().to_owned(),
    });
    Ok(schema_version)
}

fn newest_applied(connection: &mut SqliteConnection) -> Result<SchemaVersion, PersistenceError> {
    connection
        .applied_migrations()
        .map_err(|error| PersistenceError::SchemaVersionQueryFailed {
            message: error.to_string(),
        })?
        .into_iter()
        .map(|version| SchemaVersion(version.to_string()))
        .max()
        .ok_or(PersistenceError::MissingSchemaVersion)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{INITIAL_SCHEMA_VERSION, migrate_database};
    use crate::persistence::{PersistenceError, SqliteSessionStorage};
    use crate::telemetry::test_support::RecordingTelemetrySink;
    use crate::telemetry::{NoopTelemetrySink, TelemetryEvent};

    #[test]
    fn fresh_database_reaches_initial_version() {
        let telemetry = RecordingTelemetrySink::default();

        let version = migrate_database(":memory:", &telemetry).expect("migration should succeed");

        assert_eq!(version.as_str(), INITIAL_SCHEMA_VERSION);
        assert_eq!(
            telemetry.events(),
            vec![TelemetryEvent::SchemaVersionRecorded {
                schema_version: INITIAL_SCHEMA_VERSION.to_owned(),
            }]
        );
    }

    #[test]
    fn remigrating_keeps_existing_slots() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let url = dir.path().join("session.sqlite").display().to_string();
        migrate_database(&url, &NoopTelemetrySink).expect("first migration should succeed");
        let storage = SqliteSessionStorage::new(url.as_str()).expect("url should be valid");
        storage.write_slot("token", "abc").expect("write should succeed");

        migrate_database(&url, &NoopTelemetrySink).expect("second migration should succeed");

        assert_eq!(storage.read_slot("token"), Ok(Some("abc".to_owned())));
    }

    #[rstest]
    #[case::empty("")]
    #[case::spaces("  ")]
    fn blank_url_is_rejected_before_connecting(#[case] url: &str) {
        let telemetry = RecordingTelemetrySink::default();

        assert_eq!(
            migrate_database(url, &telemetry),
            Err(PersistenceError::BlankDatabaseUrl)
        );
        assert!(telemetry.events().is_empty());
    }
}
