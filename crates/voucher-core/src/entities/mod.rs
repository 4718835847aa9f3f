//! Domain entities - core business objects

mod bundle;
mod customer;
mod event;
mod qr_record;
mod release;
mod voucher;

pub use bundle::VoucherBundle;
pub use customer::Customer;
pub use event::Event;
pub use qr_record::QrRecord;
pub use release::Release;
pub use voucher::{Voucher, VoucherStatus};
