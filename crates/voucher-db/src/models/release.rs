//! Release database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for releases table
#[derive(Debug, Clone, FromRow)]
pub struct ReleaseModel {
    pub id: i64,
    pub customer_id: i64,
    pub voucher_id: i64,
    pub event_code: String,
    pub created_at: DateTime<Utc>,
}

/// Release joined with its voucher and (optionally) its customer
#[derive(Debug, Clone, FromRow)]
pub struct ReleaseBundleRow {
    pub release_id: i64,
    pub customer_id: i64,
    pub voucher_id: i64,
    pub event_code: String,
    pub release_created_at: DateTime<Utc>,

    pub discount: i16,
    pub status: String,
    pub voucher_created_at: DateTime<Utc>,
    pub claimed_at: Option<DateTime<Utc>>,

    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub customer_created_at: Option<DateTime<Utc>>,
    pub customer_updated_at: Option<DateTime<Utc>>,
}
