//! Hotel review sync client.
//!
//! The library talks to a hotel-scoped review REST resource, keeps the auth
//! session in a durable key-value store, validates review submissions
//! before they reach the network, and reconciles server responses into a
//! client-held review collection without duplicates or dropped items.

pub mod api;
pub mod config;
pub mod form;
pub mod persistence;
pub mod reviews;
pub mod session;
pub mod telemetry;

pub use api::{
    BearerToken, HotelId, HttpReviewGateway, PagedReviewQuery, Review, ReviewError,
    ReviewGateway, ReviewId, ReviewServiceLocator,
};
pub use config::{HotelReviewsConfig, OperationMode};
pub use form::{ReviewDraft, ReviewForm};
pub use reviews::{ReviewCollection, ReviewListComponent, ReviewScreen};
pub use session::{SessionStorage, SessionStore};
