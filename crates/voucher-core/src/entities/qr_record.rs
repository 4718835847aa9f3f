//! Cached QR payload, keyed by release

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// The exact text encoded into a voucher's QR image. Advisory only: a
/// missing record never prevents a scan from resolving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrRecord {
    pub release_id: Snowflake,
    pub payload: String,
    pub created_at: DateTime<Utc>,
}

impl QrRecord {
    pub fn new(release_id: Snowflake, payload: String) -> Self {
        Self {
            release_id,
            payload,
            created_at: Utc::now(),
        }
    }
}
