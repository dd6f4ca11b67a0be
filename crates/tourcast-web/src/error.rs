//! Mapping of domain errors onto [`ApiError`].

use axum::extract::rejection::JsonRejection;
use tourcast_common::ApiError;
use tourcast_estimator::EstimateError;
use tourcast_llm::LlmError;

pub fn from_estimate(err: EstimateError) -> ApiError {
    match err {
        EstimateError::InvalidInput(msg) => ApiError::BadRequest(msg),
        EstimateError::Computation(stage) => ApiError::Internal(format!("non-finite value in {}", stage)),
    }
}

pub fn from_llm(err: LlmError) -> ApiError {
    match err {
        LlmError::MissingCredentials => ApiError::UpstreamNotConfigured(err.to_string()),
        other => ApiError::UpstreamUnavailable(other.to_string()),
    }
}

pub fn from_json_rejection(rejection: JsonRejection) -> ApiError {
    ApiError::BadRequest(format!("malformed request body: {}", rejection.body_text()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_invalid_input_is_400() {
        let api = from_estimate(EstimateError::InvalidInput("empty".into()));
        assert_eq!(api.status(), StatusCode::BAD_REQUEST);
        assert_eq!(api.kind(), "invalid_input");
    }

    #[test]
    fn test_timeout_is_upstream_500() {
        let api = from_llm(LlmError::Timeout);
        assert_eq!(api.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.kind(), "upstream_failure");
    }

    #[test]
    fn test_missing_key_is_upstream_400() {
        let api = from_llm(LlmError::MissingCredentials);
        assert_eq!(api.status(), StatusCode::BAD_REQUEST);
        assert_eq!(api.kind(), "upstream_failure");
    }
}
