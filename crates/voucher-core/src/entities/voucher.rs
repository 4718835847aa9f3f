//! Voucher entity and its claim lifecycle

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::{Discount, Snowflake};

/// Lifecycle of a voucher. The only transition is `Unclaimed -> Claimed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoucherStatus {
    #[default]
    Unclaimed,
    Claimed,
}

impl VoucherStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unclaimed => "unclaimed",
            Self::Claimed => "claimed",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "unclaimed" => Ok(Self::Unclaimed),
            "claimed" => Ok(Self::Claimed),
            other => Err(DomainError::InternalError(format!(
                "unknown voucher status: {other}"
            ))),
        }
    }
}

impl fmt::Display for VoucherStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voucher {
    pub id: Snowflake,
    pub discount: Discount,
    pub status: VoucherStatus,
    pub created_at: DateTime<Utc>,
    pub claimed_at: Option<DateTime<Utc>>,
}

impl Voucher {
    /// New vouchers always start unclaimed
    pub fn new(id: Snowflake, discount: Discount) -> Self {
        Self {
            id,
            discount,
            status: VoucherStatus::Unclaimed,
            created_at: Utc::now(),
            claimed_at: None,
        }
    }

    #[inline]
    pub fn is_claimed(&self) -> bool {
        self.status == VoucherStatus::Claimed
    }
}
