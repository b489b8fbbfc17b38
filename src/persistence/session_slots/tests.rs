//! Tests for the SQLite-backed session slots.

type FixtureResult<T> = Result<T, Box<dyn std::error::Error>>;

use rstest::{fixture, rstest};
use serde_json::{Value, json};
use tempfile::TempDir;

use super::SqliteSessionStorage;
use crate::persistence::{PersistenceError, migrate_database};
use crate::session::{SessionError, SessionStorage, SessionStore, USER_KEY};
use crate::telemetry::NoopTelemetrySink;

#[fixture]
fn temp_db() -> FixtureResult<(TempDir, String)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("session.sqlite");
    Ok((temp_dir, db_path.to_string_lossy().to_string()))
}

#[fixture]
fn migrated_storage(
    temp_db: FixtureResult<(TempDir, String)>,
) -> FixtureResult<(TempDir, SqliteSessionStorage)> {
    let (temp_dir, database_url) = temp_db?;
    migrate_database(&database_url, &NoopTelemetrySink)?;

    let storage = SqliteSessionStorage::new(database_url)?;
    Ok((temp_dir, storage))
}

#[rstest]
fn slots_round_trip_and_overwrite(
    migrated_storage: FixtureResult<(TempDir, SqliteSessionStorage)>,
) {
    let (_temp_dir, storage) = migrated_storage.expect("fixture should succeed");

    storage.set("token", "first").expect("write should succeed");
    storage.set("token", "second").expect("overwrite should succeed");

    assert_eq!(storage.get("token"), Ok(Some("second".to_owned())));
    assert_eq!(storage.get("user"), Ok(None));
}

#[rstest]
fn delete_removes_slot_and_tolerates_absence(
    migrated_storage: FixtureResult<(TempDir, SqliteSessionStorage)>,
) {
    let (_temp_dir, storage) = migrated_storage.expect("fixture should succeed");

    storage.set("token", "abc").expect("write should succeed");
    storage.remove("token").expect("delete should succeed");
    storage.remove("token").expect("second delete should succeed");

    assert_eq!(storage.get("token"), Ok(None));
}

#[rstest]
fn session_store_survives_reopening_database(
    migrated_storage: FixtureResult<(TempDir, SqliteSessionStorage)>,
) {
    let (_temp_dir, storage) = migrated_storage.expect("fixture should succeed");
    let reopened = storage.clone();

    let store = SessionStore::new(storage);
    store.set_token(Some("abc")).expect("set token should succeed");
    store
        .set_user(Some(&json!({ "first_name": "Ada" })))
        .expect("set user should succeed");

    let second = SessionStore::new(reopened);
    assert_eq!(second.get_token(), Ok(Some("abc".to_owned())));
    assert_eq!(
        second.get_user::<Value>(),
        Ok(Some(json!({ "first_name": "Ada" })))
    );
}

#[rstest]
fn corrupt_profile_row_is_purged(
    migrated_storage: FixtureResult<(TempDir, SqliteSessionStorage)>,
) {
    let (_temp_dir, storage) = migrated_storage.expect("fixture should succeed");
    storage
        .set(USER_KEY, "undefined")
        .expect("raw write should succeed");

    let store = SessionStore::new(storage);

    assert_eq!(store.get_user::<Value>(), Ok(None));
    assert_eq!(store.storage().get(USER_KEY), Ok(None));
}

#[rstest]
fn unmigrated_database_reports_missing_schema(temp_db: FixtureResult<(TempDir, String)>) {
    let (_temp_dir, database_url) = temp_db.expect("fixture should succeed");
    let storage = SqliteSessionStorage::new(database_url).expect("storage should build");

    assert_eq!(
        storage.read_slot("token"),
        Err(PersistenceError::SchemaNotInitialised)
    );
    assert_eq!(
        storage.get("token"),
        Err(SessionError::Storage {
            message: PersistenceError::SchemaNotInitialised.to_string()
        })
    );
}

#[test]
fn blank_database_url_is_rejected() {
    assert!(matches!(
        SqliteSessionStorage::new("   "),
        Err(PersistenceError::BlankDatabaseUrl)
    ));
}
