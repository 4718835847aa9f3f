//! Release entity <-> model mappers

use voucher_core::entities::{Customer, Release, Voucher, VoucherBundle, VoucherStatus};
use voucher_core::error::DomainError;
use voucher_core::value_objects::{Discount, Snowflake};

use crate::models::{ReleaseBundleRow, ReleaseModel};

impl From<ReleaseModel> for Release {
    fn from(model: ReleaseModel) -> Self {
        Release {
            id: Snowflake::new(model.id),
            customer_id: Snowflake::new(model.customer_id),
            voucher_id: Snowflake::new(model.voucher_id),
            event_code: model.event_code,
            created_at: model.created_at,
        }
    }
}

impl TryFrom<ReleaseBundleRow> for VoucherBundle {
    type Error = DomainError;

    fn try_from(row: ReleaseBundleRow) -> Result<Self, Self::Error> {
        let voucher = Voucher {
            id: Snowflake::new(row.voucher_id),
            discount: Discount::try_from(row.discount)?,
            status: VoucherStatus::parse(&row.status)?,
            created_at: row.voucher_created_at,
            claimed_at: row.claimed_at,
        };

        let release = Release {
            id: Snowflake::new(row.release_id),
            customer_id: Snowflake::new(row.customer_id),
            voucher_id: voucher.id,
            event_code: row.event_code,
            created_at: row.release_created_at,
        };

        // all customer columns come from the same LEFT JOIN
        let customer = match (
            row.first_name,
            row.last_name,
            row.email,
            row.phone_number,
            row.customer_created_at,
            row.customer_updated_at,
        ) {
            (Some(first_name), Some(last_name), Some(email), Some(phone_number), Some(created_at), Some(updated_at)) => {
                Some(Customer {
                    id: release.customer_id,
                    first_name,
                    last_name,
                    email,
                    phone_number,
                    created_at,
                    updated_at,
                })
            }
            _ => None,
        };

        Ok(VoucherBundle::new(voucher, release, customer))
    }
}
