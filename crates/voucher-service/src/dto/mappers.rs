//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities and service results
//! to response DTOs.

use voucher_core::entities::{Event, VoucherBundle};

use crate::services::{IssuedVoucher, ScanOutcome, VoucherDetail, VoucherList};

use super::responses::{
    EventResponse, IssuedVoucherResponse, ScanResponse, VoucherDetailResponse,
    VoucherListResponse, VoucherResponse,
};

// ============================================================================
// Voucher Mappers
// ============================================================================

impl From<&VoucherBundle> for VoucherResponse {
    fn from(bundle: &VoucherBundle) -> Self {
        let voucher = &bundle.voucher;
        let customer = bundle.customer.as_ref();
        Self {
            voucher_id: voucher.id,
            release_id: bundle.release.as_ref().map(|r| r.id),
            customer_id: bundle.release.as_ref().map(|r| r.customer_id),
            first_name: customer.map(|c| c.first_name.clone()),
            last_name: customer.map(|c| c.last_name.clone()),
            recipient_name: bundle.recipient_name(),
            email: customer.map(|c| c.email.clone()),
            phone_number: customer.map(|c| c.phone_number.clone()),
            discount: voucher.discount.percent(),
            status: voucher.status,
            event_code: bundle.event_code().map(str::to_string),
            created_at: voucher.created_at,
            claimed_at: voucher.claimed_at,
        }
    }
}

impl From<VoucherBundle> for VoucherResponse {
    fn from(bundle: VoucherBundle) -> Self {
        Self::from(&bundle)
    }
}

impl From<VoucherDetail> for VoucherDetailResponse {
    fn from(detail: VoucherDetail) -> Self {
        Self {
            voucher: VoucherResponse::from(&detail.bundle),
            qr_payload: detail.qr_payload,
        }
    }
}

impl From<VoucherList> for VoucherListResponse {
    fn from(list: VoucherList) -> Self {
        Self {
            vouchers: list.bundles.iter().map(VoucherResponse::from).collect(),
            counts: list.counts,
        }
    }
}

impl From<IssuedVoucher> for IssuedVoucherResponse {
    fn from(issued: IssuedVoucher) -> Self {
        let IssuedVoucher {
            customer,
            voucher,
            release,
            qr_payload,
            qr_cached,
        } = issued;
        Self {
            customer_id: customer.id,
            voucher_id: voucher.id,
            release_id: release.id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            email: customer.email,
            phone_number: customer.phone_number,
            discount: voucher.discount.percent(),
            status: voucher.status,
            event_code: release.event_code,
            qr_payload,
            qr_cached,
        }
    }
}

// ============================================================================
// Scan Mappers
// ============================================================================

impl From<ScanOutcome> for ScanResponse {
    fn from(outcome: ScanOutcome) -> Self {
        match outcome {
            ScanOutcome::Claimed(bundle) => Self::Claimed {
                voucher: Box::new(VoucherResponse::from(bundle.as_ref())),
            },
            ScanOutcome::AlreadyClaimed => Self::AlreadyClaimed,
            ScanOutcome::NotFound => Self::NotFound,
            ScanOutcome::Ignored => Self::Ignored,
        }
    }
}

// ============================================================================
// Event Mappers
// ============================================================================

impl From<&Event> for EventResponse {
    fn from(event: &Event) -> Self {
        Self {
            code: event.code.to_string(),
            name: event.name.clone(),
            created_at: event.created_at,
        }
    }
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self::from(&event)
    }
}
