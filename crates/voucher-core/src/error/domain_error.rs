//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Customer not found: {0}")]
    CustomerNotFound(Snowflake),

    #[error("Voucher not found: {0}")]
    VoucherNotFound(String),

    #[error("Release not found: {0}")]
    ReleaseNotFound(Snowflake),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Discount must be a whole number between 0 and 100, got {0:?}")]
    InvalidDiscount(String),

    #[error("Event code must be in format ATK-XXX, got {0:?}")]
    InvalidEventCode(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Event code already exists: {0}")]
    EventCodeExists(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::CustomerNotFound(_) => "UNKNOWN_CUSTOMER",
            Self::VoucherNotFound(_) => "UNKNOWN_VOUCHER",
            Self::ReleaseNotFound(_) => "UNKNOWN_RELEASE",
            Self::EventNotFound(_) => "UNKNOWN_EVENT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidDiscount(_) => "INVALID_DISCOUNT",
            Self::InvalidEventCode(_) => "INVALID_EVENT_CODE",

            // Conflict
            Self::EventCodeExists(_) => "EVENT_CODE_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::CustomerNotFound(_)
                | Self::VoucherNotFound(_)
                | Self::ReleaseNotFound(_)
                | Self::EventNotFound(_)
        )
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InvalidDiscount(_) | Self::InvalidEventCode(_)
        )
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EventCodeExists(_))
    }

    /// Storage failures the caller may retry (network, timeout, pool exhaustion)
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::DatabaseError(_))
    }
}
