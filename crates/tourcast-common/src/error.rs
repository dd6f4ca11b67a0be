//! HTTP-facing error taxonomy.
//!
//! Every failure a handler can report maps onto one of these variants. The
//! JSON body always carries a machine-readable `kind` so clients can tell a
//! bad request apart from a failing upstream estimation service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed caller input.
    #[error("{0}")]
    BadRequest(String),

    /// The language-model collaborator has no credentials configured.
    #[error("estimation service is not configured: {0}")]
    UpstreamNotConfigured(String),

    /// The language-model collaborator failed or answered with garbage.
    #[error("estimation service failed: {0}")]
    UpstreamUnavailable(String),

    /// Unexpected failure inside the calculation itself.
    #[error("computation failed: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: &'a str,
    kind: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UpstreamNotConfigured(_) => StatusCode::BAD_REQUEST,
            ApiError::UpstreamUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "invalid_input",
            ApiError::UpstreamNotConfigured(_) | ApiError::UpstreamUnavailable(_) => {
                "upstream_failure"
            }
            ApiError::Internal(_) => "computation_failure",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind();

        let (error, details) = match &self {
            ApiError::BadRequest(msg) => (msg.as_str(), None),
            ApiError::UpstreamNotConfigured(msg) => {
                ("estimation service is not configured", Some(msg.as_str()))
            }
            ApiError::UpstreamUnavailable(msg) => ("estimation service failed", Some(msg.as_str())),
            ApiError::Internal(msg) => ("computation failed", Some(msg.as_str())),
        };

        if status.is_server_error() {
            tracing::error!(kind, details = details.unwrap_or(""), "{}", error);
        } else {
            tracing::warn!(kind, "{}", error);
        }

        let body = ErrorBody { success: false, error, kind, details };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credentials_is_client_error_but_upstream_kind() {
        let err = ApiError::UpstreamNotConfigured("OPENAI_API_KEY not set".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.kind(), "upstream_failure");
    }

    #[test]
    fn test_bad_request_and_upstream_are_distinct_kinds() {
        let bad = ApiError::BadRequest("missing artist data".into());
        let upstream = ApiError::UpstreamUnavailable("connection refused".into());
        assert_ne!(bad.kind(), upstream.kind());
        assert_eq!(upstream.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_into_response_sets_status() {
        let resp = ApiError::Internal("overflow".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
