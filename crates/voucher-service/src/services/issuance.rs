//! Voucher issuance workflow
//!
//! Writes customer, voucher, release and QR record as four separate calls
//! with no transaction. A failure after the first write leaves the earlier
//! rows in place and reports them in `PartialIssuance`. The QR record is a
//! cache: failing to store it does not fail the issuance.

use std::borrow::Cow;

use tracing::{info, instrument, warn};
use validator::{Validate, ValidationError, ValidationErrors};
use voucher_core::entities::{Customer, QrRecord, Release, Voucher};
use voucher_core::{Discount, EventCode, QrPayload};

use crate::dto::IssueVoucherRequest;

use super::context::ServiceContext;
use super::error::{IssuanceStep, ServiceError, ServiceResult};

/// Everything created (or reused) by one issuance
#[derive(Debug, Clone)]
pub struct IssuedVoucher {
    pub customer: Customer,
    pub voucher: Voucher,
    pub release: Release,
    pub qr_payload: String,
    pub qr_cached: bool,
}

/// Issuance service
pub struct IssuanceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> IssuanceService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Validate the form, then write customer, voucher, release and QR record
    #[instrument(skip(self, request), fields(event_code = %request.event_code))]
    pub async fn issue(&self, request: IssueVoucherRequest) -> ServiceResult<IssuedVoucher> {
        let (discount, event_code) = self.validate(&request).await?;

        // 1. find or create the customer
        let existing = self.ctx.customer_repo().find_by_email(&request.email).await?;
        let (customer, created_customer) = match existing {
            Some(customer) => (customer, None),
            None => {
                let customer = Customer::new(
                    self.ctx.generate_id(),
                    request.first_name,
                    request.last_name,
                    request.email,
                    request.phone_number,
                );
                self.ctx.customer_repo().create(&customer).await?;
                let id = customer.id;
                (customer, Some(id))
            }
        };

        // 2. voucher
        let voucher = Voucher::new(self.ctx.generate_id(), discount);
        if let Err(source) = self.ctx.voucher_repo().create(&voucher).await {
            return Err(ServiceError::PartialIssuance {
                step: IssuanceStep::Voucher,
                customer_id: created_customer,
                voucher_id: None,
                source,
            });
        }

        // 3. release
        let release = Release::new(
            self.ctx.generate_id(),
            customer.id,
            voucher.id,
            event_code.to_string(),
        );
        if let Err(source) = self.ctx.release_repo().create(&release).await {
            warn!(voucher_id = %voucher.id, "Release failed; voucher left without a release");
            return Err(ServiceError::PartialIssuance {
                step: IssuanceStep::Release,
                customer_id: created_customer,
                voucher_id: Some(voucher.id),
                source,
            });
        }

        // 4. QR cache, best effort
        let (qr_payload, qr_cached) = self.cache_payload(&release, &customer, discount).await;

        info!(
            release_id = %release.id,
            voucher_id = %voucher.id,
            customer_id = %customer.id,
            reused_customer = created_customer.is_none(),
            "Voucher issued"
        );

        Ok(IssuedVoucher {
            customer,
            voucher,
            release,
            qr_payload,
            qr_cached,
        })
    }

    /// Field rules plus the event-existence rule, all reported together.
    /// Nothing is written when this fails.
    async fn validate(
        &self,
        request: &IssueVoucherRequest,
    ) -> ServiceResult<(Discount, EventCode)> {
        let mut errors = match request.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if let Ok(code) = EventCode::parse(&request.event_code) {
            if self.ctx.event_repo().find_by_code(code).await?.is_none() {
                errors.add(
                    "eventCode",
                    ValidationError::new("event_not_found")
                        .with_message(Cow::Borrowed("No event exists with this code")),
                );
            }
        }

        if !errors.is_empty() {
            return Err(ServiceError::InvalidFields(errors));
        }

        // both parse: the field rules above already accepted them
        let discount = Discount::parse(&request.discount)?;
        let event_code = EventCode::parse(&request.event_code)?;
        Ok((discount, event_code))
    }

    /// Serialize and store the QR payload. Returns the payload and whether
    /// it was stored; falls back to the bare release id if encoding fails.
    async fn cache_payload(
        &self,
        release: &Release,
        customer: &Customer,
        discount: Discount,
    ) -> (String, bool) {
        let payload = match QrPayload::new(release, customer, discount).encode() {
            Ok(payload) => payload,
            Err(e) => {
                warn!(release_id = %release.id, error = %e, "QR payload encoding failed");
                return (release.id.to_string(), false);
            }
        };

        let record = QrRecord::new(release.id, payload);
        match self.ctx.qr_repo().upsert(&record).await {
            Ok(()) => (record.payload, true),
            Err(e) => {
                warn!(release_id = %release.id, error = %e, "QR payload not cached");
                (record.payload, false)
            }
        }
    }
}
