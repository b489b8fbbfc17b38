//! Error mapping helpers for the HTTP review gateway.

use http::StatusCode;

use crate::api::error::ReviewError;

/// Checks if a status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

pub(super) fn map_transport_error(operation: &str, error: &reqwest::Error) -> ReviewError {
    if error.is_decode() {
        return ReviewError::Decode {
            message: format!("{operation} failed: {error}"),
        };
    }

    ReviewError::Network {
        message: format!("{operation} failed: {error}"),
    }
}

pub(super) fn map_http_error(
    operation: &str,
    status: StatusCode,
    resource: &str,
    maybe_message: Option<String>,
) -> ReviewError {
    if status == StatusCode::NOT_FOUND {
        return ReviewError::NotFound {
            resource: resource.to_owned(),
        };
    }

    let message = maybe_message.unwrap_or_else(|| "unknown error".to_owned());
    if is_auth_failure(status) {
        ReviewError::Authentication {
            message: format!("{operation} failed: service returned {status} {message}"),
        }
    } else {
        ReviewError::Api {
            status: status.as_u16(),
            message: format!("{operation} failed: {message}"),
        }
    }
}
