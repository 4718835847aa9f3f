//! QR record database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for qr_records table
#[derive(Debug, Clone, FromRow)]
pub struct QrRecordModel {
    pub release_id: i64,
    pub payload: String,
    pub created_at: DateTime<Utc>,
}
