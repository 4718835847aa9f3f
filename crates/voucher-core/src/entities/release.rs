//! Release entity - binds a customer, a voucher and an event at issuance

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// The record a printed QR code ultimately points at. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub id: Snowflake,
    pub customer_id: Snowflake,
    pub voucher_id: Snowflake,
    /// Free text: the event row is not required to exist
    pub event_code: String,
    pub created_at: DateTime<Utc>,
}

impl Release {
    pub fn new(
        id: Snowflake,
        customer_id: Snowflake,
        voucher_id: Snowflake,
        event_code: String,
    ) -> Self {
        Self {
            id,
            customer_id,
            voucher_id,
            event_code,
            created_at: Utc::now(),
        }
    }
}
