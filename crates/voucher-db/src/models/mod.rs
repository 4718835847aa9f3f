//! Database models - SQLx-compatible structs for PostgreSQL tables

mod customer;
mod event;
mod qr_record;
mod release;
mod voucher;

pub use customer::CustomerModel;
pub use event::EventModel;
pub use qr_record::QrRecordModel;
pub use release::{ReleaseBundleRow, ReleaseModel};
pub use voucher::VoucherModel;
