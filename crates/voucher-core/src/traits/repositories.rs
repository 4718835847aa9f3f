//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer states which remote operations it needs; `voucher-db`
//! provides PostgreSQL and in-memory implementations. Every lookup returns
//! `Ok(None)` for a missing row so callers can chain fallbacks without
//! treating absence as an error.

use async_trait::async_trait;

use crate::entities::{Customer, Event, QrRecord, Release, Voucher, VoucherBundle};
use crate::error::DomainError;
use crate::value_objects::{Discount, EventCode, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Customer Repository
// ============================================================================

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Customer>>;

    /// Exact (case-sensitive) email match
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Customer>>;

    async fn create(&self, customer: &Customer) -> RepoResult<()>;

    /// Overwrite name, email and phone
    async fn update(&self, customer: &Customer) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Voucher Repository
// ============================================================================

#[async_trait]
pub trait VoucherRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Voucher>>;

    /// Insert a voucher (status taken from the entity, normally unclaimed)
    async fn create(&self, voucher: &Voucher) -> RepoResult<()>;

    async fn update_discount(&self, id: Snowflake, discount: Discount) -> RepoResult<()>;

    /// Atomically move the voucher from unclaimed to claimed.
    ///
    /// Returns the number of rows changed: `1` when this call performed the
    /// claim, `0` when the voucher is missing or was already claimed. The
    /// check and the write must be a single compare-and-set at the store.
    async fn conditional_claim(&self, id: Snowflake) -> RepoResult<u64>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Release Repository
// ============================================================================

#[async_trait]
pub trait ReleaseRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Release>>;

    /// Release joined with its voucher and customer
    async fn find_bundle(&self, id: Snowflake) -> RepoResult<Option<VoucherBundle>>;

    /// The release a voucher was issued through, if any
    async fn find_by_voucher(&self, voucher_id: Snowflake) -> RepoResult<Option<Release>>;

    /// Every release bundle, newest first
    async fn list_bundles(&self) -> RepoResult<Vec<VoucherBundle>>;

    async fn create(&self, release: &Release) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Releases still pointing at a customer
    async fn count_by_customer(&self, customer_id: Snowflake) -> RepoResult<i64>;
}

// ============================================================================
// Event Repository
// ============================================================================

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn find_by_code(&self, code: EventCode) -> RepoResult<Option<Event>>;

    /// All events ordered by code
    async fn list(&self) -> RepoResult<Vec<Event>>;

    /// Fails with `EventCodeExists` when the code is taken
    async fn create(&self, event: &Event) -> RepoResult<()>;

    /// Highest numeric suffix among existing codes
    async fn max_code_number(&self) -> RepoResult<Option<u32>>;
}

// ============================================================================
// QR Record Repository
// ============================================================================

#[async_trait]
pub trait QrRepository: Send + Sync {
    /// Record whose payload is byte-for-byte equal to `payload`
    async fn find_by_payload(&self, payload: &str) -> RepoResult<Option<QrRecord>>;

    async fn find_by_release(&self, release_id: Snowflake) -> RepoResult<Option<QrRecord>>;

    /// Insert or replace the record for `record.release_id`
    async fn upsert(&self, record: &QrRecord) -> RepoResult<()>;

    /// Remove the record if present; absence is not an error
    async fn delete_by_release(&self, release_id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Storage health
// ============================================================================

#[async_trait]
pub trait StorageHealth: Send + Sync {
    /// Cheap round trip proving the store is reachable
    async fn ping(&self) -> RepoResult<()>;
}
