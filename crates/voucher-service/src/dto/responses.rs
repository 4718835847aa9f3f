//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;
use voucher_core::{Snowflake, VoucherStatus};

// ============================================================================
// Voucher Responses
// ============================================================================

/// A voucher with whatever recipient and release data could be resolved.
/// Relation fields are `null` for vouchers found by the voucher-only lookup.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherResponse {
    pub voucher_id: Snowflake,
    pub release_id: Option<Snowflake>,
    pub customer_id: Option<Snowflake>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub recipient_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub discount: u8,
    pub status: VoucherStatus,
    pub event_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub claimed_at: Option<DateTime<Utc>>,
}

/// Voucher detail including the text to render as a QR code
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherDetailResponse {
    #[serde(flatten)]
    pub voucher: VoucherResponse,
    pub qr_payload: String,
}

/// Status tallies for the voucher list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VoucherCounts {
    pub total: usize,
    pub unclaimed: usize,
    pub claimed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct VoucherListResponse {
    pub vouchers: Vec<VoucherResponse>,
    pub counts: VoucherCounts,
}

/// Result of a successful issuance
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedVoucherResponse {
    pub customer_id: Snowflake,
    pub voucher_id: Snowflake,
    pub release_id: Snowflake,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub discount: u8,
    pub status: VoucherStatus,
    pub event_code: String,
    /// Exact text to encode into the QR image
    pub qr_payload: String,
    /// False when the payload could not be cached; scanning still works
    pub qr_cached: bool,
}

// ============================================================================
// Scan Responses
// ============================================================================

/// Scan result. Every outcome is a normal response, including not-found.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ScanResponse {
    Claimed { voucher: Box<VoucherResponse> },
    AlreadyClaimed,
    NotFound,
    /// Another scan from this device was still in flight
    Ignored,
}

/// State of a device's scan gate
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannerResponse {
    pub device_id: String,
    pub locked: bool,
}

// ============================================================================
// Event Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub code: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub storage: String,
}

impl ReadinessResponse {
    pub fn ready(storage_healthy: bool) -> Self {
        Self {
            status: if storage_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                storage: if storage_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
