// SPDX-License-Identifier: Apache-2.0

//! Conversion from forkthis-core errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use forkthis_core::ForkError;
use serde_json::json;

/// Error body sent for any failed request: `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// HTTP status of the response.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Message placed in the `error` field.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Maps error variants to status codes:
/// - `InvalidRepoFormat` -> 400
/// - `Upstream` -> GitHub's own status
/// - `CredentialsExhausted`, `GitHub` -> 502
/// - `AllProvidersFailed` -> 500 with the fallback banner
/// - all others -> 500
impl From<ForkError> for ApiError {
    fn from(err: ForkError) -> Self {
        let (status, message) = match &err {
            ForkError::InvalidRepoFormat { .. } => {
                (StatusCode::BAD_REQUEST, "Invalid repo format".to_string())
            }
            ForkError::Upstream { status } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                "GitHub API error".to_string(),
            ),
            ForkError::CredentialsExhausted { .. } => (StatusCode::BAD_GATEWAY, err.to_string()),
            ForkError::GitHub { .. } => {
                (StatusCode::BAD_GATEWAY, "GitHub API error".to_string())
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        };
        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), error = %err, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %err, "Request rejected");
        }
        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_repo_is_bad_request() {
        let err = ApiError::from(ForkError::InvalidRepoFormat {
            input: "x".to_string(),
        });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Invalid repo format");
    }

    #[test]
    fn upstream_status_passes_through() {
        let err = ApiError::from(ForkError::Upstream { status: 404 });
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "GitHub API error");
    }

    #[test]
    fn exhausted_credentials_are_bad_gateway() {
        let err = ApiError::from(ForkError::CredentialsExhausted { attempts: 2 });
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn transport_failure_is_bad_gateway() {
        let err = ApiError::from(ForkError::GitHub {
            message: "connection reset".to_string(),
        });
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.message(), "GitHub API error");
    }

    #[test]
    fn all_providers_failed_keeps_banner() {
        let err = ApiError::from(ForkError::AllProvidersFailed {
            attempted: 0,
            quota_exhausted: false,
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "AI summary failed. All fallback models failed.");
    }
}
