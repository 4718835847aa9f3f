//! Response types and error handling for API endpoints
//!
//! Provides unified error handling and JSON response formatting.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;
use voucher_common::{domain_status, AppError, ErrorResponse};
use voucher_core::DomainError;
use voucher_service::ServiceError;

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid path parameter: {0}")]
    InvalidPath(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        let code = match self {
            Self::App(e) => e.status_code(),
            Self::Service(e) => e.status_code(),
            Self::Domain(e) => domain_status(e),
            Self::Validation(_) | Self::InvalidPath(_) | Self::InvalidBody(_) => 400,
            Self::Internal(_) => 500,
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::App(e) => e.error_code(),
            Self::Service(e) => e.error_code(),
            Self::Domain(e) => e.code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidPath(_) => "INVALID_PATH_PARAMETER",
            Self::InvalidBody(_) => "INVALID_REQUEST_BODY",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Structured details, when the error carries any
    #[must_use]
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::Service(e) => e.details(),
            Self::Validation(errors) => serde_json::to_value(errors).ok(),
            _ => None,
        }
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::InvalidBody(msg.into())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorResponse,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log server errors
        if status.is_server_error() {
            error!(error = ?self, "Server error occurred");
        }

        let body = ErrorBody {
            error: ErrorResponse {
                code: self.error_code().to_string(),
                message: self.to_string(),
                details: self.details(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Created response (201) with JSON body
pub struct Created<T>(pub T);

impl<T: IntoResponse> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        let mut response = self.0.into_response();
        *response.status_mut() = StatusCode::CREATED;
        response
    }
}

/// No content response (204)
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voucher_core::Snowflake;
    use voucher_service::IssuanceStep;

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(
            ApiError::invalid_path("test").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Service(ServiceError::not_found("Voucher", "42")).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Domain(DomainError::DatabaseError("connection reset".into())).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::internal(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_api_error_codes() {
        assert_eq!(
            ApiError::invalid_path("test").error_code(),
            "INVALID_PATH_PARAMETER"
        );
        assert_eq!(
            ApiError::invalid_body("missing field").error_code(),
            "INVALID_REQUEST_BODY"
        );
    }

    #[test]
    fn test_partial_issuance_details_are_rendered() {
        let err = ApiError::Service(ServiceError::PartialIssuance {
            step: IssuanceStep::Release,
            customer_id: Some(Snowflake::new(7)),
            voucher_id: Some(Snowflake::new(8)),
            source: DomainError::DatabaseError("timeout".into()),
        });

        assert_eq!(err.error_code(), "PARTIAL_ISSUANCE");
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        let details = err.details().unwrap();
        assert_eq!(details["step"], "create_release");
        assert_eq!(details["voucherId"], "8");
    }
}
