//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use std::fmt;

use serde_json::json;
use validator::ValidationErrors;
use voucher_common::{domain_status, AppError};
use voucher_core::{DomainError, Snowflake};

/// Issuance write that failed after earlier writes had already landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssuanceStep {
    Voucher,
    Release,
}

impl IssuanceStep {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Voucher => "create_voucher",
            Self::Release => "create_release",
        }
    }
}

impl fmt::Display for IssuanceStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation or storage failure
    Domain(DomainError),

    /// Application error (config, validation, etc.)
    App(AppError),

    /// Resource not found
    NotFound { resource: &'static str, id: String },

    /// Validation error
    Validation(String),

    /// Per-field validation failures, reported together
    InvalidFields(ValidationErrors),

    /// Conflict (e.g., duplicate resource)
    Conflict(String),

    /// An issuance step failed after earlier rows were written. The rows
    /// are left in place; the ids let an operator find them.
    PartialIssuance {
        step: IssuanceStep,
        customer_id: Option<Snowflake>,
        voucher_id: Option<Snowflake>,
        source: DomainError,
    },

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::InvalidFields(_) => write!(f, "Validation failed"),
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::PartialIssuance { step, source, .. } => {
                write!(f, "Issuance failed at {step}: {source}")
            }
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) | Self::PartialIssuance { source: e, .. } => Some(e),
            Self::App(e) => Some(e),
            Self::InvalidFields(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => domain_status(e),
            Self::App(e) => e.status_code(),
            Self::NotFound { .. } => 404,
            Self::Validation(_) | Self::InvalidFields(_) => 400,
            Self::Conflict(_) => 409,
            Self::PartialIssuance { source, .. } => {
                if source.is_transient() {
                    503
                } else {
                    500
                }
            }
            Self::Internal(_) => 500,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) | Self::InvalidFields(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::PartialIssuance { .. } => "PARTIAL_ISSUANCE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the caller may resubmit; the service itself never retries
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Domain(e) | Self::PartialIssuance { source: e, .. } => e.is_transient(),
            Self::App(e) => e.is_retryable(),
            _ => false,
        }
    }

    /// Structured detail for the error body, when there is any
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::InvalidFields(errors) => serde_json::to_value(errors).ok(),
            Self::PartialIssuance {
                step,
                customer_id,
                voucher_id,
                ..
            } => Some(json!({
                "step": step.as_str(),
                "customerId": customer_id,
                "voucherId": voucher_id,
            })),
            _ => None,
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(err: ValidationErrors) -> Self {
        Self::InvalidFields(err)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::NotFound { resource, id } => {
                AppError::NotFound(format!("{resource} {id}"))
            }
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::InvalidFields(errors) => AppError::Validation(errors.to_string()),
            ServiceError::Conflict(msg) => AppError::Conflict(msg),
            err @ ServiceError::PartialIssuance { .. } => {
                if err.is_retryable() {
                    AppError::Database(err.to_string())
                } else {
                    AppError::Internal(anyhow::anyhow!(err.to_string()))
                }
            }
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
