/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers should return `Result<T, ApiError>` which automatically
/// converts to appropriate HTTP status codes. Profile-service error kinds
/// stay distinguishable by status/code even though internal details are
/// kept out of the outward messages.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use careerpath_shared::profile::ProfileError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Unauthorized (401)
    Unauthorized(String),

    /// Not found (404)
    NotFound(String),

    /// Conflict (409) - e.g., a lost insight-creation race
    Conflict(String),

    /// Unprocessable entity (422) - validation errors
    ValidationError(Vec<ValidationErrorDetail>),

    /// Internal server error (500)
    InternalError(String),

    /// Bad gateway (502) - the insight generator failed
    UpstreamError(String),

    /// Gateway timeout (504) - the profile transaction timed out
    GatewayTimeout(String),
}

/// Validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "bad_request", "unauthorized")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            ApiError::UpstreamError(msg) => write!(f, "Upstream error: {}", msg),
            ApiError::GatewayTimeout(msg) => write!(f, "Gateway timeout: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::ValidationError(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                "Request validation failed".to_string(),
                Some(errors),
            ),
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
            ApiError::UpstreamError(msg) => (StatusCode::BAD_GATEWAY, "upstream_error", msg, None),
            ApiError::GatewayTimeout(msg) => {
                (StatusCode::GATEWAY_TIMEOUT, "gateway_timeout", msg, None)
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Convert profile service errors to API errors
///
/// Outward messages stay generic; the distinct status/code per kind is what
/// clients (and tests) can rely on.
impl From<ProfileError> for ApiError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::Unauthenticated => {
                ApiError::Unauthorized("Not authenticated".to_string())
            }
            ProfileError::MissingContactInfo => ApiError::ValidationError(vec![
                ValidationErrorDetail {
                    field: "email".to_string(),
                    message: "No usable email address on the authenticated principal".to_string(),
                },
            ]),
            ProfileError::UserNotFound => ApiError::NotFound("User not found".to_string()),
            ProfileError::InsightGeneration(_) => ApiError::UpstreamError(
                "Failed to update user: insight generation failed".to_string(),
            ),
            ProfileError::TransactionTimeout => {
                ApiError::GatewayTimeout("Failed to update user: operation timed out".to_string())
            }
            ProfileError::UniqueViolation(_) => ApiError::Conflict(
                "Failed to update user: conflicting update in progress".to_string(),
            ),
            ProfileError::Database(e) => ApiError::InternalError(format!("Database error: {}", e)),
        }
    }
}

/// Convert request validation errors to API errors
impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        let errors: Vec<ValidationErrorDetail> = err
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();
        ApiError::ValidationError(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use careerpath_shared::insights::GeneratorError;

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("Invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: Invalid input");

        let err = ApiError::NotFound("User not found".to_string());
        assert_eq!(err.to_string(), "Not found: User not found");
    }

    #[test]
    fn test_profile_error_kinds_stay_distinguishable() {
        let cases = [
            (ProfileError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (ProfileError::UserNotFound, StatusCode::NOT_FOUND),
            (
                ProfileError::InsightGeneration(GeneratorError::Failed("x".to_string())),
                StatusCode::BAD_GATEWAY,
            ),
            (ProfileError::TransactionTimeout, StatusCode::GATEWAY_TIMEOUT),
            (
                ProfileError::UniqueViolation("industry_insights_pkey".to_string()),
                StatusCode::CONFLICT,
            ),
            (
                ProfileError::MissingContactInfo,
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
        ];

        for (profile_err, expected_status) in cases {
            let api_err: ApiError = profile_err.into();
            let response = api_err.into_response();
            assert_eq!(response.status(), expected_status);
        }
    }

    #[test]
    fn test_validation_error() {
        let errors = vec![
            ValidationErrorDetail {
                field: "industry".to_string(),
                message: "Industry is required".to_string(),
            },
            ValidationErrorDetail {
                field: "experience".to_string(),
                message: "Experience out of range".to_string(),
            },
        ];

        let err = ApiError::ValidationError(errors);
        assert_eq!(err.to_string(), "Validation failed: 2 errors");
    }
}
