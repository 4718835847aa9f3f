//! In-memory storage backend
//!
//! Implements every repository trait over a single lock-protected set of
//! tables. Used for local runs without PostgreSQL and by the service and
//! HTTP tests. Foreign keys are checked the way the schema enforces them, so
//! code that works here does not trip constraints in production.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::instrument;

use voucher_core::entities::{Customer, Event, QrRecord, Release, Voucher, VoucherBundle, VoucherStatus};
use voucher_core::error::DomainError;
use voucher_core::traits::{
    CustomerRepository, EventRepository, QrRepository, ReleaseRepository, RepoResult,
    StorageHealth, VoucherRepository,
};
use voucher_core::value_objects::{Discount, EventCode, Snowflake};

#[derive(Debug, Default)]
struct Tables {
    customers: BTreeMap<Snowflake, Customer>,
    vouchers: BTreeMap<Snowflake, Voucher>,
    releases: BTreeMap<Snowflake, Release>,
    events: BTreeMap<u32, Event>,
    qr_records: BTreeMap<Snowflake, QrRecord>,
}

impl Tables {
    fn bundle(&self, release: &Release) -> Option<VoucherBundle> {
        let voucher = self.vouchers.get(&release.voucher_id)?.clone();
        let customer = self.customers.get(&release.customer_id).cloned();
        Some(VoucherBundle::new(voucher, release.clone(), customer))
    }
}

fn fk_violation(table: &str, detail: impl std::fmt::Display) -> DomainError {
    DomainError::DatabaseError(format!("foreign key violation on {table}: {detail}"))
}

fn duplicate_key(table: &str, id: impl std::fmt::Display) -> DomainError {
    DomainError::DatabaseError(format!("duplicate key in {table}: {id}"))
}

/// Shared handle to the in-memory tables; clones see the same data
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Customer>> {
        Ok(self.tables.read().customers.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Customer>> {
        // BTreeMap iterates in id order, so the oldest match wins
        Ok(self
            .tables
            .read()
            .customers
            .values()
            .find(|c| c.email == email)
            .cloned())
    }

    #[instrument(skip(self, customer), fields(customer_id = %customer.id))]
    async fn create(&self, customer: &Customer) -> RepoResult<()> {
        let mut tables = self.tables.write();
        if tables.customers.contains_key(&customer.id) {
            return Err(duplicate_key("customers", customer.id));
        }
        tables.customers.insert(customer.id, customer.clone());
        Ok(())
    }

    async fn update(&self, customer: &Customer) -> RepoResult<()> {
        let mut tables = self.tables.write();
        let existing = tables
            .customers
            .get_mut(&customer.id)
            .ok_or(DomainError::CustomerNotFound(customer.id))?;
        existing.first_name.clone_from(&customer.first_name);
        existing.last_name.clone_from(&customer.last_name);
        existing.email.clone_from(&customer.email);
        existing.phone_number.clone_from(&customer.phone_number);
        existing.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut tables = self.tables.write();
        if tables.releases.values().any(|r| r.customer_id == id) {
            return Err(fk_violation("releases", format!("customer {id} is referenced")));
        }
        tables
            .customers
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::CustomerNotFound(id))
    }
}

#[async_trait]
impl VoucherRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Voucher>> {
        Ok(self.tables.read().vouchers.get(&id).cloned())
    }

    #[instrument(skip(self, voucher), fields(voucher_id = %voucher.id))]
    async fn create(&self, voucher: &Voucher) -> RepoResult<()> {
        let mut tables = self.tables.write();
        if tables.vouchers.contains_key(&voucher.id) {
            return Err(duplicate_key("vouchers", voucher.id));
        }
        tables.vouchers.insert(voucher.id, voucher.clone());
        Ok(())
    }

    async fn update_discount(&self, id: Snowflake, discount: Discount) -> RepoResult<()> {
        let mut tables = self.tables.write();
        let voucher = tables
            .vouchers
            .get_mut(&id)
            .ok_or_else(|| DomainError::VoucherNotFound(id.to_string()))?;
        voucher.discount = discount;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn conditional_claim(&self, id: Snowflake) -> RepoResult<u64> {
        // check and write under one write lock
        let mut tables = self.tables.write();
        match tables.vouchers.get_mut(&id) {
            Some(voucher) if voucher.status == VoucherStatus::Unclaimed => {
                voucher.status = VoucherStatus::Claimed;
                voucher.claimed_at = Some(Utc::now());
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut tables = self.tables.write();
        if tables.releases.values().any(|r| r.voucher_id == id) {
            return Err(fk_violation("releases", format!("voucher {id} is referenced")));
        }
        tables
            .vouchers
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::VoucherNotFound(id.to_string()))
    }
}

#[async_trait]
impl ReleaseRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Release>> {
        Ok(self.tables.read().releases.get(&id).cloned())
    }

    async fn find_bundle(&self, id: Snowflake) -> RepoResult<Option<VoucherBundle>> {
        let tables = self.tables.read();
        Ok(tables.releases.get(&id).and_then(|r| tables.bundle(r)))
    }

    async fn find_by_voucher(&self, voucher_id: Snowflake) -> RepoResult<Option<Release>> {
        Ok(self
            .tables
            .read()
            .releases
            .values()
            .find(|r| r.voucher_id == voucher_id)
            .cloned())
    }

    async fn list_bundles(&self) -> RepoResult<Vec<VoucherBundle>> {
        let tables = self.tables.read();
        Ok(tables
            .releases
            .values()
            .rev()
            .filter_map(|r| tables.bundle(r))
            .collect())
    }

    #[instrument(skip(self, release), fields(release_id = %release.id))]
    async fn create(&self, release: &Release) -> RepoResult<()> {
        let mut tables = self.tables.write();
        if !tables.customers.contains_key(&release.customer_id) {
            return Err(fk_violation(
                "releases",
                format!("customer {} does not exist", release.customer_id),
            ));
        }
        if !tables.vouchers.contains_key(&release.voucher_id) {
            return Err(fk_violation(
                "releases",
                format!("voucher {} does not exist", release.voucher_id),
            ));
        }
        if tables.releases.contains_key(&release.id) {
            return Err(duplicate_key("releases", release.id));
        }
        tables.releases.insert(release.id, release.clone());
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut tables = self.tables.write();
        if tables.qr_records.contains_key(&id) {
            return Err(fk_violation("qr_records", format!("release {id} is referenced")));
        }
        tables
            .releases
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::ReleaseNotFound(id))
    }

    async fn count_by_customer(&self, customer_id: Snowflake) -> RepoResult<i64> {
        let count = self
            .tables
            .read()
            .releases
            .values()
            .filter(|r| r.customer_id == customer_id)
            .count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }
}

#[async_trait]
impl EventRepository for MemoryStore {
    async fn find_by_code(&self, code: EventCode) -> RepoResult<Option<Event>> {
        Ok(self.tables.read().events.get(&code.number()).cloned())
    }

    async fn list(&self) -> RepoResult<Vec<Event>> {
        Ok(self.tables.read().events.values().cloned().collect())
    }

    #[instrument(skip(self, event), fields(code = %event.code))]
    async fn create(&self, event: &Event) -> RepoResult<()> {
        let mut tables = self.tables.write();
        let number = event.code.number();
        if tables.events.contains_key(&number) {
            return Err(DomainError::EventCodeExists(event.code.to_string()));
        }
        tables.events.insert(number, event.clone());
        Ok(())
    }

    async fn max_code_number(&self) -> RepoResult<Option<u32>> {
        Ok(self.tables.read().events.keys().next_back().copied())
    }
}

#[async_trait]
impl QrRepository for MemoryStore {
    async fn find_by_payload(&self, payload: &str) -> RepoResult<Option<QrRecord>> {
        Ok(self
            .tables
            .read()
            .qr_records
            .values()
            .find(|q| q.payload == payload)
            .cloned())
    }

    async fn find_by_release(&self, release_id: Snowflake) -> RepoResult<Option<QrRecord>> {
        Ok(self.tables.read().qr_records.get(&release_id).cloned())
    }

    async fn upsert(&self, record: &QrRecord) -> RepoResult<()> {
        let mut tables = self.tables.write();
        if !tables.releases.contains_key(&record.release_id) {
            return Err(fk_violation(
                "qr_records",
                format!("release {} does not exist", record.release_id),
            ));
        }
        tables
            .qr_records
            .entry(record.release_id)
            .and_modify(|existing| existing.payload.clone_from(&record.payload))
            .or_insert_with(|| record.clone());
        Ok(())
    }

    async fn delete_by_release(&self, release_id: Snowflake) -> RepoResult<()> {
        self.tables.write().qr_records.remove(&release_id);
        Ok(())
    }
}

#[async_trait]
impl StorageHealth for MemoryStore {
    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}
