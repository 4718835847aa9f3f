//! Test fixtures and data generators
//!
//! Provides reusable request bodies and response shapes for integration tests.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Create event request
#[derive(Debug, Serialize)]
pub struct CreateEventRequest {
    pub name: String,
}

impl CreateEventRequest {
    pub fn unique() -> Self {
        Self {
            name: format!("Test Event {}", unique_suffix()),
        }
    }
}

/// Event response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub code: String,
    pub name: String,
    pub created_at: String,
}

/// Issue voucher request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueVoucherRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub discount: String,
    pub event_code: String,
}

impl IssueVoucherRequest {
    pub fn unique(event_code: &str) -> Self {
        let suffix = unique_suffix();
        Self {
            first_name: "Ana".to_string(),
            last_name: "Cruz".to_string(),
            email: format!("ana{suffix}@example.com"),
            phone_number: "09171234567".to_string(),
            discount: "20".to_string(),
            event_code: event_code.to_string(),
        }
    }
}

/// Issued voucher response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedVoucherResponse {
    pub customer_id: String,
    pub voucher_id: String,
    pub release_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub discount: u8,
    pub status: String,
    pub event_code: String,
    pub qr_payload: String,
    pub qr_cached: bool,
}

/// Voucher response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherResponse {
    pub voucher_id: String,
    pub release_id: Option<String>,
    pub customer_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub recipient_name: Option<String>,
    pub email: Option<String>,
    pub discount: u8,
    pub status: String,
    pub event_code: Option<String>,
    pub claimed_at: Option<String>,
}

/// Voucher detail response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherDetailResponse {
    #[serde(flatten)]
    pub voucher: VoucherResponse,
    pub qr_payload: String,
}

/// Voucher status tallies
#[derive(Debug, Deserialize)]
pub struct VoucherCounts {
    pub total: usize,
    pub unclaimed: usize,
    pub claimed: usize,
}

/// Voucher list response
#[derive(Debug, Deserialize)]
pub struct VoucherListResponse {
    pub vouchers: Vec<VoucherResponse>,
    pub counts: VoucherCounts,
}

/// Scan request
#[derive(Debug, Serialize)]
pub struct ScanRequest {
    pub data: String,
}

impl ScanRequest {
    pub fn new(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }
}

/// Scan response, discriminated by `outcome`
#[derive(Debug, Deserialize)]
pub struct ScanResponse {
    pub outcome: String,
    pub voucher: Option<VoucherResponse>,
}

/// Scanner gate state
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannerResponse {
    pub device_id: String,
    pub locked: bool,
}

/// Error response body
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}
