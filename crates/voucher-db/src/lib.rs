//! # voucher-db
//!
//! Storage layer implementing the voucher-core repository traits.
//!
//! ## Overview
//!
//! Two backends are provided:
//!
//! - PostgreSQL via SQLx: connection pool, migrations, row models, mappers
//!   and one repository per table
//! - [`MemoryStore`]: a process-local store implementing every trait, used
//!   for local runs and tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use voucher_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use voucher_db::repositories::PgVoucherRepository;
//! use voucher_core::traits::VoucherRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::default()).await?;
//!     run_migrations(&pool).await?;
//!     let voucher_repo = PgVoucherRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::MemoryStore;
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgCustomerRepository, PgEventRepository, PgQrRepository, PgReleaseRepository,
    PgStorageHealth, PgVoucherRepository,
};
