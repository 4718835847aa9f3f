//! Shared fixtures for the service tests

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use voucher_core::entities::{Customer, Event, QrRecord, Release, Voucher, VoucherBundle};
use voucher_core::traits::{
    CustomerRepository, EventRepository, QrRepository, ReleaseRepository, RepoResult,
    StorageHealth, VoucherRepository,
};
use voucher_core::{DomainError, Discount, EventCode, Snowflake, SnowflakeGenerator};
use voucher_db::MemoryStore;

use crate::dto::IssueVoucherRequest;

use super::context::ServiceContext;

pub fn context(store: MemoryStore) -> ServiceContext {
    ServiceContext::from_store(store, Arc::new(SnowflakeGenerator::new(1)))
}

/// Memory-backed context with event `ATK-001` already created
pub async fn context_with_event() -> (ServiceContext, MemoryStore) {
    let store = MemoryStore::new();
    seed_event(&store).await;
    (context(store.clone()), store)
}

pub async fn seed_event(store: &MemoryStore) {
    EventRepository::create(store, &Event::new(EventCode::FIRST, "Opening".to_string()))
        .await
        .unwrap();
}

pub fn ana_request() -> IssueVoucherRequest {
    IssueVoucherRequest {
        first_name: "Ana".to_string(),
        last_name: "Cruz".to_string(),
        email: "ana@example.com".to_string(),
        phone_number: "09171234567".to_string(),
        discount: "20".to_string(),
        event_code: "ATK-001".to_string(),
    }
}

/// Voucher inserted directly, with no release or customer
pub async fn loose_voucher(store: &MemoryStore, id: i64) -> Voucher {
    let voucher = Voucher::new(Snowflake::new(id), Discount::new(10).unwrap());
    VoucherRepository::create(store, &voucher).await.unwrap();
    voucher
}

fn injected() -> DomainError {
    DomainError::DatabaseError("injected failure".to_string())
}

/// Memory store whose individual writes can be made to fail
#[derive(Default)]
pub struct FaultyStore {
    pub inner: MemoryStore,
    pub fail_customer_lookup: AtomicBool,
    pub fail_voucher_create: AtomicBool,
    pub fail_release_create: AtomicBool,
    pub fail_qr_upsert: AtomicBool,
}

impl FaultyStore {
    pub async fn with_event() -> Arc<Self> {
        let store = Self::default();
        seed_event(&store.inner).await;
        Arc::new(store)
    }

    pub fn context(self: &Arc<Self>) -> ServiceContext {
        ServiceContext::new(
            self.clone(),
            self.clone(),
            self.clone(),
            self.clone(),
            self.clone(),
            self.clone(),
            Arc::new(SnowflakeGenerator::new(2)),
        )
    }

    fn check(flag: &AtomicBool) -> RepoResult<()> {
        if flag.load(Ordering::SeqCst) {
            Err(injected())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CustomerRepository for FaultyStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Customer>> {
        CustomerRepository::find_by_id(&self.inner, id).await
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Customer>> {
        Self::check(&self.fail_customer_lookup)?;
        self.inner.find_by_email(email).await
    }

    async fn create(&self, customer: &Customer) -> RepoResult<()> {
        CustomerRepository::create(&self.inner, customer).await
    }

    async fn update(&self, customer: &Customer) -> RepoResult<()> {
        self.inner.update(customer).await
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        CustomerRepository::delete(&self.inner, id).await
    }
}

#[async_trait]
impl VoucherRepository for FaultyStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Voucher>> {
        VoucherRepository::find_by_id(&self.inner, id).await
    }

    async fn create(&self, voucher: &Voucher) -> RepoResult<()> {
        Self::check(&self.fail_voucher_create)?;
        VoucherRepository::create(&self.inner, voucher).await
    }

    async fn update_discount(&self, id: Snowflake, discount: Discount) -> RepoResult<()> {
        self.inner.update_discount(id, discount).await
    }

    async fn conditional_claim(&self, id: Snowflake) -> RepoResult<u64> {
        self.inner.conditional_claim(id).await
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        VoucherRepository::delete(&self.inner, id).await
    }
}

#[async_trait]
impl ReleaseRepository for FaultyStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Release>> {
        ReleaseRepository::find_by_id(&self.inner, id).await
    }

    async fn find_bundle(&self, id: Snowflake) -> RepoResult<Option<VoucherBundle>> {
        self.inner.find_bundle(id).await
    }

    async fn find_by_voucher(&self, voucher_id: Snowflake) -> RepoResult<Option<Release>> {
        self.inner.find_by_voucher(voucher_id).await
    }

    async fn list_bundles(&self) -> RepoResult<Vec<VoucherBundle>> {
        self.inner.list_bundles().await
    }

    async fn create(&self, release: &Release) -> RepoResult<()> {
        Self::check(&self.fail_release_create)?;
        ReleaseRepository::create(&self.inner, release).await
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        ReleaseRepository::delete(&self.inner, id).await
    }

    async fn count_by_customer(&self, customer_id: Snowflake) -> RepoResult<i64> {
        self.inner.count_by_customer(customer_id).await
    }
}

#[async_trait]
impl EventRepository for FaultyStore {
    async fn find_by_code(&self, code: EventCode) -> RepoResult<Option<Event>> {
        self.inner.find_by_code(code).await
    }

    async fn list(&self) -> RepoResult<Vec<Event>> {
        EventRepository::list(&self.inner).await
    }

    async fn create(&self, event: &Event) -> RepoResult<()> {
        EventRepository::create(&self.inner, event).await
    }

    async fn max_code_number(&self) -> RepoResult<Option<u32>> {
        self.inner.max_code_number().await
    }
}

#[async_trait]
impl QrRepository for FaultyStore {
    async fn find_by_payload(&self, payload: &str) -> RepoResult<Option<QrRecord>> {
        self.inner.find_by_payload(payload).await
    }

    async fn find_by_release(&self, release_id: Snowflake) -> RepoResult<Option<QrRecord>> {
        self.inner.find_by_release(release_id).await
    }

    async fn upsert(&self, record: &QrRecord) -> RepoResult<()> {
        Self::check(&self.fail_qr_upsert)?;
        self.inner.upsert(record).await
    }

    async fn delete_by_release(&self, release_id: Snowflake) -> RepoResult<()> {
        self.inner.delete_by_release(release_id).await
    }
}

#[async_trait]
impl StorageHealth for FaultyStore {
    async fn ping(&self) -> RepoResult<()> {
        self.inner.ping().await
    }
}
