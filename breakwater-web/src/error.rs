//! Status-code mapping for gateway failures.
//!
//! Every stage of the request pipeline fails fast into one of these
//! variants; there is no retry or partial recovery. Responses carry a short
//! human-readable message, never internal paths or error chains - those go
//! to the server-side log only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use breakwater_core::catalog::CollaboratorError;
use breakwater_core::streaming::{RangeError, file_stream};
use thiserror::Error;
use tracing::error;

/// A request-terminating gateway failure.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Required query parameter absent or empty (400).
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// Token unknown or expired (401).
    #[error("invalid or expired session")]
    InvalidSession,

    /// Valid identity, insufficient entitlement (403).
    #[error("access denied: {0}")]
    AccessDenied(&'static str),

    /// Unknown resource, unresolvable physical path, or empty file (404).
    #[error("resource not found")]
    NotFound,

    /// Requested window outside file bounds, or multi-range (416).
    #[error(transparent)]
    Range(#[from] RangeError),

    /// Any unanticipated fault, including collaborator failures (500).
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<CollaboratorError> for GatewayError {
    fn from(error: CollaboratorError) -> Self {
        GatewayError::Internal(error.to_string())
    }
}

impl From<std::io::Error> for GatewayError {
    fn from(error: std::io::Error) -> Self {
        GatewayError::Internal(error.to_string())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            GatewayError::MissingParameter(name) => (
                StatusCode::BAD_REQUEST,
                format!("Missing required parameter: {name}"),
            )
                .into_response(),
            GatewayError::InvalidSession => (
                StatusCode::UNAUTHORIZED,
                "Invalid or expired session".to_string(),
            )
                .into_response(),
            GatewayError::AccessDenied(reason) => {
                (StatusCode::FORBIDDEN, format!("Access denied: {reason}")).into_response()
            }
            GatewayError::NotFound => {
                (StatusCode::NOT_FOUND, "Resource not found".to_string()).into_response()
            }
            GatewayError::Range(e) => file_stream::range_not_satisfiable(&e),
            GatewayError::Internal(detail) => {
                // Full detail stays server-side
                error!("internal gateway error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::header;

    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            GatewayError::MissingParameter("id")
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::InvalidSession.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            GatewayError::AccessDenied("payment required")
                .into_response()
                .status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            GatewayError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            GatewayError::Internal("boom".to_string())
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_range_error_carries_content_range() {
        let response =
            GatewayError::Range(RangeError::Unsatisfiable { file_size: 42 }).into_response();

        assert_eq!(response.status(), StatusCode::RANGE_NOT_SATISFIABLE);
        assert_eq!(
            response.headers().get(header::CONTENT_RANGE).unwrap(),
            "bytes */42"
        );
    }

    #[test]
    fn test_internal_error_hides_detail() {
        let response =
            GatewayError::Internal("store error: secret://dsn".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
