//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in voucher-core.
//! Each repository handles database operations for a specific domain entity.

mod customer;
mod error;
mod event;
mod health;
mod qr;
mod release;
mod voucher;

pub use customer::PgCustomerRepository;
pub use event::PgEventRepository;
pub use health::PgStorageHealth;
pub use qr::PgQrRepository;
pub use release::PgReleaseRepository;
pub use voucher::PgVoucherRepository;
