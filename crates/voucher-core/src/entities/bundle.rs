//! Resolved read model: a voucher plus whatever relations could be found

use crate::entities::{Customer, Release, Voucher};

/// Voucher together with its release and recipient.
///
/// `release` and `customer` are `None` when the voucher was found directly
/// by id and no joined data was loaded; callers render those as unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoucherBundle {
    pub voucher: Voucher,
    pub release: Option<Release>,
    pub customer: Option<Customer>,
}

impl VoucherBundle {
    pub fn new(voucher: Voucher, release: Release, customer: Option<Customer>) -> Self {
        Self {
            voucher,
            release: Some(release),
            customer,
        }
    }

    /// Bundle for a voucher whose release and recipient are unknown
    pub fn voucher_only(voucher: Voucher) -> Self {
        Self {
            voucher,
            release: None,
            customer: None,
        }
    }

    pub fn event_code(&self) -> Option<&str> {
        self.release.as_ref().map(|r| r.event_code.as_str())
    }

    pub fn recipient_name(&self) -> Option<String> {
        self.customer.as_ref().map(Customer::full_name)
    }

    /// True when the bundle came from the voucher-only lookup
    pub fn is_partial(&self) -> bool {
        self.release.is_none()
    }
}
