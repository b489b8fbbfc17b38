//! Session persistence for the auth token and user profile.
//!
//! The store keeps two slots, `token` and `user`, in an injected
//! [`SessionStorage`] backend. Corrupt profile JSON is purged and reported as
//! absent; backend failures propagate.

mod error;
mod storage;
mod store;

pub use error::SessionError;
pub use storage::{MemorySessionStorage, SessionStorage};
pub use store::{SessionStore, TOKEN_KEY, USER_KEY};
