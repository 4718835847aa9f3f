//! Voucher administration: list, detail, edit, delete
//!
//! Lookups go through the resolver in edit order (voucher id, then release
//! id), so an admin can paste either id.

use tracing::{info, instrument};
use validator::Validate;
use voucher_core::entities::VoucherBundle;
use voucher_core::{Discount, Snowflake, VoucherStatus};

use crate::dto::{UpdateVoucherRequest, VoucherCounts};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::resolver::ResolverService;

/// Every issued voucher, newest first, with status tallies
#[derive(Debug, Clone)]
pub struct VoucherList {
    pub bundles: Vec<VoucherBundle>,
    pub counts: VoucherCounts,
}

/// A voucher plus the text its QR image should encode
#[derive(Debug, Clone)]
pub struct VoucherDetail {
    pub bundle: VoucherBundle,
    pub qr_payload: String,
}

/// Ids touched by a delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedVoucher {
    pub voucher_id: Snowflake,
    pub release_id: Option<Snowflake>,
    /// Set only when the customer had no other release and was removed
    pub customer_id: Option<Snowflake>,
}

/// Voucher administration service
pub struct VoucherService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VoucherService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list_vouchers(&self) -> ServiceResult<VoucherList> {
        let bundles = self.ctx.release_repo().list_bundles().await?;
        let claimed = bundles
            .iter()
            .filter(|b| b.voucher.status == VoucherStatus::Claimed)
            .count();

        let counts = VoucherCounts {
            total: bundles.len(),
            unclaimed: bundles.len() - claimed,
            claimed,
        };
        Ok(VoucherList { bundles, counts })
    }

    /// Detail view. The QR text is the cached payload when there is one,
    /// else the bare release id (or voucher id for a voucher with no release).
    #[instrument(skip(self))]
    pub async fn get_voucher(&self, id: &str) -> ServiceResult<VoucherDetail> {
        let bundle = self.find(id).await?;

        let qr_payload = match &bundle.release {
            Some(release) => match self.ctx.qr_repo().find_by_release(release.id).await? {
                Some(record) => record.payload,
                None => release.id.to_string(),
            },
            None => bundle.voucher.id.to_string(),
        };

        Ok(VoucherDetail { bundle, qr_payload })
    }

    /// Change the discount and recipient details. Status is never touched,
    /// and the cached QR payload is kept as printed.
    #[instrument(skip(self, request))]
    pub async fn update_voucher(
        &self,
        id: &str,
        request: UpdateVoucherRequest,
    ) -> ServiceResult<VoucherBundle> {
        request.validate()?;
        let bundle = self.find(id).await?;
        let voucher_id = bundle.voucher.id;

        if request.touches_customer() {
            let Some(mut customer) = bundle.customer else {
                return Err(ServiceError::validation(
                    "Voucher has no recipient to update",
                ));
            };
            let first_name = request.first_name.unwrap_or_else(|| customer.first_name.clone());
            let last_name = request.last_name.unwrap_or_else(|| customer.last_name.clone());
            let email = request.email.unwrap_or_else(|| customer.email.clone());
            let phone_number = request
                .phone_number
                .unwrap_or_else(|| customer.phone_number.clone());
            customer.set_details(first_name, last_name, email, phone_number);
            self.ctx.customer_repo().update(&customer).await?;
        }

        if let Some(discount) = request.discount.as_deref() {
            let discount = Discount::parse(discount)?;
            self.ctx
                .voucher_repo()
                .update_discount(voucher_id, discount)
                .await?;
        }

        info!(voucher_id = %voucher_id, "Voucher updated");
        self.find(&voucher_id.to_string()).await
    }

    /// Delete in reverse dependency order: QR record, release, customer
    /// (only when nothing else references it), voucher
    #[instrument(skip(self))]
    pub async fn delete_voucher(&self, id: &str) -> ServiceResult<DeletedVoucher> {
        let bundle = self.find(id).await?;
        let voucher_id = bundle.voucher.id;
        let release_id = bundle.release.as_ref().map(|r| r.id);

        if let Some(release_id) = release_id {
            self.ctx.qr_repo().delete_by_release(release_id).await?;
            self.ctx.release_repo().delete(release_id).await?;
        }

        let mut deleted_customer = None;
        if let Some(customer) = &bundle.customer {
            if self.ctx.release_repo().count_by_customer(customer.id).await? == 0 {
                self.ctx.customer_repo().delete(customer.id).await?;
                deleted_customer = Some(customer.id);
            }
        }

        self.ctx.voucher_repo().delete(voucher_id).await?;

        info!(
            voucher_id = %voucher_id,
            release_id = ?release_id,
            customer_id = ?deleted_customer,
            "Voucher deleted"
        );
        Ok(DeletedVoucher {
            voucher_id,
            release_id,
            customer_id: deleted_customer,
        })
    }

    async fn find(&self, id: &str) -> ServiceResult<VoucherBundle> {
        ResolverService::new(self.ctx)
            .find_for_edit(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Voucher", id))
    }
}
