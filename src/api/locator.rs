//! Identifier wrappers and URL construction for the hotel review resource.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use super::error::ReviewError;

/// Accepts identifiers the server sends either as strings or as numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawIdentifier {
    Text(String),
    Number(u64),
}

impl From<RawIdentifier> for String {
    fn from(raw: RawIdentifier) -> Self {
        match raw {
            RawIdentifier::Text(text) => text,
            RawIdentifier::Number(number) => number.to_string(),
        }
    }
}

macro_rules! opaque_identifier {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Validates that the identifier is non-blank and trims whitespace.
            ///
            /// # Errors
            ///
            /// Returns [`ReviewError::InvalidIdentifier`] when the value is blank.
            pub fn new(value: impl AsRef<str>) -> Result<Self, ReviewError> {
                let trimmed = value.as_ref().trim();
                if trimmed.is_empty() {
                    return Err(ReviewError::InvalidIdentifier { kind: $kind });
                }
                Ok(Self(trimmed.to_owned()))
            }

            /// Borrow the identifier value.
            #[must_use]
            pub const fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw: String = RawIdentifier::deserialize(deserializer)?.into();
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

opaque_identifier!(
    /// Hotel identifier scoping a review collection.
    HotelId,
    "hotel"
);

opaque_identifier!(
    /// Server-assigned review identifier.
    ReviewId,
    "review"
);

/// Bearer token wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::MissingToken`] when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, ReviewError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ReviewError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for BearerToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

// Tokens must never end up in logs.
impl fmt::Debug for BearerToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("BearerToken(***)")
    }
}

/// Base URL of the review service with helpers for resource paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewServiceLocator {
    api_base: Url,
}

impl ReviewServiceLocator {
    /// Parses the base URL the review resource hangs off.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::InvalidUrl`] when the value is not an absolute
    /// URL that can carry path segments.
    pub fn parse(api_base: &str) -> Result<Self, ReviewError> {
        let parsed =
            Url::parse(api_base.trim()).map_err(|error| ReviewError::InvalidUrl(error.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(ReviewError::InvalidUrl(format!(
                "{parsed} cannot be used as a base URL"
            )));
        }
        Ok(Self { api_base: parsed })
    }

    /// Returns the configured API base.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// URL of the review collection: `/hotels/{hotelId}/reviews`.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::InvalidUrl`] when the base cannot take segments.
    pub fn reviews_url(&self, hotel_id: &HotelId) -> Result<Url, ReviewError> {
        self.with_segments(&["hotels", hotel_id.as_str(), "reviews"])
    }

    /// URL of one review: `/hotels/{hotelId}/reviews/{reviewId}`.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::InvalidUrl`] when the base cannot take segments.
    pub fn review_url(&self, hotel_id: &HotelId, review_id: &ReviewId) -> Result<Url, ReviewError> {
        self.with_segments(&["hotels", hotel_id.as_str(), "reviews", review_id.as_str()])
    }

    fn with_segments(&self, segments: &[&str]) -> Result<Url, ReviewError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|()| ReviewError::InvalidUrl(format!("{} cannot be a base", self.api_base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}
