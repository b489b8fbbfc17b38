//! Session store: auth token and user profile slots.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::api::BearerToken;

use super::error::SessionError;
use super::storage::SessionStorage;

/// Slot holding the raw bearer token.
pub const TOKEN_KEY: &str = "token";

/// Slot holding the JSON-serialised user profile.
pub const USER_KEY: &str = "user";

/// Literal values earlier clients wrote into the user slot by mistake.
const SENTINEL_USER_VALUES: [&str; 2] = ["undefined", "null"];

/// Persists the current user's auth token and profile.
///
/// The store is constructed once per process and passed by reference to
/// whatever needs the session. The backend is injected so tests can use
/// [`super::MemorySessionStorage`] and the CLI a `SQLite` database.
///
/// # Example
///
/// ```
/// use hotel_reviews::session::{MemorySessionStorage, SessionStore};
///
/// let store = SessionStore::new(MemorySessionStorage::new());
/// store.set_token(Some("abc")).expect("memory storage does not fail");
/// assert_eq!(store.get_token().expect("read"), Some("abc".to_owned()));
///
/// store.clear_auth().expect("memory storage does not fail");
/// assert_eq!(store.get_token().expect("read"), None);
/// ```
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Wraps a storage backend.
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Borrows the underlying backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns the persisted token, or `None` when no token is stored.
    ///
    /// # Errors
    ///
    /// Propagates backend failures as [`SessionError::Storage`].
    pub fn get_token(&self) -> Result<Option<String>, SessionError> {
        Ok(self
            .storage
            .get(TOKEN_KEY)?
            .filter(|token| !token.is_empty()))
    }

    /// Persists the token, or removes it when `token` is `None` or empty.
    ///
    /// Any non-empty string is stored verbatim, including whitespace.
    ///
    /// # Errors
    ///
    /// Propagates backend failures as [`SessionError::Storage`].
    pub fn set_token(&self, token: Option<&str>) -> Result<(), SessionError> {
        match token.filter(|value| !value.is_empty()) {
            Some(value) => self.storage.set(TOKEN_KEY, value),
            None => self.storage.remove(TOKEN_KEY),
        }
    }

    /// Returns the persisted token as a validated [`BearerToken`].
    ///
    /// # Errors
    ///
    /// Propagates backend failures as [`SessionError::Storage`].
    pub fn bearer_token(&self) -> Result<Option<BearerToken>, SessionError> {
        Ok(self
            .get_token()?
            .and_then(|token| BearerToken::new(token).ok()))
    }

    /// Returns the persisted user profile.
    ///
    /// Returns `None` when the slot is absent. A slot holding the literal
    /// `undefined` or `null`, or anything that does not parse as `T`, is
    /// removed and reported as absent.
    ///
    /// # Errors
    ///
    /// Propagates backend failures as [`SessionError::Storage`].
    pub fn get_user<T: DeserializeOwned>(&self) -> Result<Option<T>, SessionError> {
        let Some(raw) = self.storage.get(USER_KEY)? else {
            return Ok(None);
        };

        if SENTINEL_USER_VALUES.contains(&raw.trim()) {
            tracing::debug!(value = raw.trim(), "purging sentinel user profile");
            self.storage.remove(USER_KEY)?;
            return Ok(None);
        }

        match serde_json::from_str::<T>(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(error) => {
                tracing::warn!("purging corrupt user profile from session: {error}");
                self.storage.remove(USER_KEY)?;
                Ok(None)
            }
        }
    }

    /// Persists the user profile as JSON, or removes it when `user` is
    /// `None` or serialises to JSON `null`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Serialise`] when `user` cannot be serialised
    /// and propagates backend failures as [`SessionError::Storage`].
    pub fn set_user<T: Serialize + ?Sized>(&self, user: Option<&T>) -> Result<(), SessionError> {
        let Some(profile) = user else {
            return self.storage.remove(USER_KEY);
        };

        let value = serde_json::to_value(profile).map_err(|error| SessionError::Serialise {
            message: error.to_string(),
        })?;

        if value.is_null() {
            return self.storage.remove(USER_KEY);
        }

        self.storage.set(USER_KEY, &value.to_string())
    }

    /// Removes both the token and the user profile.
    ///
    /// # Errors
    ///
    /// Propagates backend failures as [`SessionError::Storage`].
    pub fn clear_auth(&self) -> Result<(), SessionError> {
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(USER_KEY)
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use serde::Deserialize;
    use serde_json::{Value, json};

    use super::{SessionStore, TOKEN_KEY, USER_KEY};
    use crate::session::{MemorySessionStorage, SessionStorage};

    #[fixture]
    fn store() -> SessionStore<MemorySessionStorage> {
        SessionStore::new(MemorySessionStorage::new())
    }

    #[rstest]
    fn token_round_trips_and_clears(store: SessionStore<MemorySessionStorage>) {
        store.set_token(Some("abc")).expect("set should succeed");
        assert_eq!(store.get_token(), Ok(Some("abc".to_owned())));

        store.set_token(None).expect("clear should succeed");
        assert_eq!(store.get_token(), Ok(None));
        assert_eq!(store.storage().get(TOKEN_KEY), Ok(None));
    }

    #[rstest]
    fn empty_token_removes_slot(store: SessionStore<MemorySessionStorage>) {
        store.set_token(Some("abc")).expect("set should succeed");

        store.set_token(Some("")).expect("set should succeed");

        assert_eq!(store.get_token(), Ok(None));
        assert_eq!(store.storage().get(TOKEN_KEY), Ok(None));
    }

    #[rstest]
    fn whitespace_token_is_stored_verbatim(store: SessionStore<MemorySessionStorage>) {
        store.set_token(Some("   ")).expect("set should succeed");

        assert_eq!(store.get_token(), Ok(Some("   ".to_owned())));
        assert_eq!(store.storage().get(TOKEN_KEY), Ok(Some("   ".to_owned())));
        assert_eq!(store.bearer_token(), Ok(None));
    }

    #[rstest]
    fn bearer_token_wraps_stored_token(store: SessionStore<MemorySessionStorage>) {
        assert_eq!(store.bearer_token(), Ok(None));

        store.set_token(Some("abc")).expect("set should succeed");

        let token = store
            .bearer_token()
            .expect("read should succeed")
            .expect("token should be present");
        assert_eq!(token.value(), "abc");
    }

    #[rstest]
    fn user_round_trips_as_json(store: SessionStore<MemorySessionStorage>) {
        store
            .set_user(Some(&json!({ "a": 1 })))
            .expect("set should succeed");

        assert_eq!(store.get_user::<Value>(), Ok(Some(json!({ "a": 1 }))));
    }

    #[rstest]
    fn set_user_none_removes_profile(store: SessionStore<MemorySessionStorage>) {
        store
            .set_user(Some(&json!({ "a": 1 })))
            .expect("set should succeed");

        store.set_user::<Value>(None).expect("clear should succeed");

        assert_eq!(store.get_user::<Value>(), Ok(None));
    }

    #[rstest]
    fn set_user_json_null_removes_profile(store: SessionStore<MemorySessionStorage>) {
        store
            .set_user(Some(&json!({ "a": 1 })))
            .expect("set should succeed");

        store
            .set_user(Some(&Value::Null))
            .expect("clear should succeed");

        assert_eq!(store.storage().get(USER_KEY), Ok(None));
    }

    #[rstest]
    #[case::undefined("undefined")]
    #[case::null("null")]
    #[case::malformed("{not json")]
    fn unusable_user_slot_is_purged(
        store: SessionStore<MemorySessionStorage>,
        #[case] raw: &str,
    ) {
        store
            .storage()
            .set(USER_KEY, raw)
            .expect("raw write should succeed");

        assert_eq!(store.get_user::<Value>(), Ok(None));
        assert_eq!(
            store.storage().get(USER_KEY),
            Ok(None),
            "slot holding {raw:?} should be removed"
        );
    }

    #[rstest]
    fn profile_with_wrong_shape_is_purged(store: SessionStore<MemorySessionStorage>) {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Profile {
            first_name: String,
        }

        store
            .set_user(Some(&json!({ "first_name": 7 })))
            .expect("set should succeed");

        assert_eq!(store.get_user::<Profile>(), Ok(None));
        assert_eq!(store.storage().get(USER_KEY), Ok(None));
    }

    #[rstest]
    fn clear_auth_removes_both_slots(store: SessionStore<MemorySessionStorage>) {
        store.set_token(Some("abc")).expect("set should succeed");
        store
            .set_user(Some(&json!({ "first_name": "Ada" })))
            .expect("set should succeed");

        store.clear_auth().expect("clear should succeed");

        assert_eq!(store.storage().is_empty(), Ok(true));
    }

    #[rstest]
    fn clear_auth_on_empty_store_succeeds(store: SessionStore<MemorySessionStorage>) {
        assert_eq!(store.clear_auth(), Ok(()));
    }
}
