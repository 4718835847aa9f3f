//! Voucher database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for vouchers table
#[derive(Debug, Clone, FromRow)]
pub struct VoucherModel {
    pub id: i64,
    pub discount: i16,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub claimed_at: Option<DateTime<Utc>>,
}
