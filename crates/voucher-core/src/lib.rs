//! # voucher-core
//!
//! Domain layer containing entities, value objects, repository traits and
//! the pure scan logic (payload classification and debouncing).
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod scan;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Customer, Event, QrRecord, Release, Voucher, VoucherBundle, VoucherStatus};
pub use error::DomainError;
pub use scan::{normalize, QrPayload, Reference, ScanGate, ScanPermit};
pub use traits::{
    CustomerRepository, EventRepository, QrRepository, ReleaseRepository, RepoResult,
    StorageHealth, VoucherRepository,
};
pub use value_objects::{Discount, EventCode, Snowflake, SnowflakeGenerator, SnowflakeParseError};
