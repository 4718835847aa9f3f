//! Voucher entity <-> model mapper
//!
//! Conversions are fallible: a row that violates the discount range or
//! carries an unknown status is reported instead of silently coerced.

use voucher_core::entities::{Voucher, VoucherStatus};
use voucher_core::error::DomainError;
use voucher_core::value_objects::{Discount, Snowflake};

use crate::models::VoucherModel;

impl TryFrom<VoucherModel> for Voucher {
    type Error = DomainError;

    fn try_from(model: VoucherModel) -> Result<Self, Self::Error> {
        Ok(Voucher {
            id: Snowflake::new(model.id),
            discount: Discount::try_from(model.discount)?,
            status: VoucherStatus::parse(&model.status)?,
            created_at: model.created_at,
            claimed_at: model.claimed_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn row(discount: i16, status: &str) -> VoucherModel {
        VoucherModel {
            id: 10,
            discount,
            status: status.to_string(),
            created_at: Utc::now(),
            claimed_at: None,
        }
    }

    #[test]
    fn test_valid_row() {
        let voucher = Voucher::try_from(row(25, "unclaimed")).unwrap();
        assert_eq!(voucher.discount.percent(), 25);
        assert_eq!(voucher.status, VoucherStatus::Unclaimed);
    }

    #[test]
    fn test_corrupt_rows_are_rejected() {
        assert!(Voucher::try_from(row(140, "unclaimed")).is_err());
        assert!(Voucher::try_from(row(10, "void")).is_err());
    }
}
