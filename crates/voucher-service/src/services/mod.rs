//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod claim;
pub mod context;
pub mod error;
pub mod event;
pub mod issuance;
pub mod resolver;
pub mod scan;
pub mod voucher;

#[cfg(test)]
mod test_support;

// Re-export all services for convenience
pub use claim::{ClaimResult, ClaimService};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{IssuanceStep, ServiceError, ServiceResult};
pub use event::EventService;
pub use issuance::{IssuanceService, IssuedVoucher};
pub use resolver::ResolverService;
pub use scan::{ScanOutcome, ScanService};
pub use voucher::{DeletedVoucher, VoucherDetail, VoucherList, VoucherService};
