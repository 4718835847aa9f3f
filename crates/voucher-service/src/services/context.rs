//! Service context - dependency container for services
//!
//! Holds all repositories and the id generator needed by services.

use std::sync::Arc;

use voucher_core::traits::{
    CustomerRepository, EventRepository, QrRepository, ReleaseRepository, StorageHealth,
    VoucherRepository,
};
use voucher_core::{Snowflake, SnowflakeGenerator};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Storage repositories (PostgreSQL or in-memory, behind traits)
/// - A storage health probe for readiness checks
/// - Snowflake generator for ID generation
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    customer_repo: Arc<dyn CustomerRepository>,
    voucher_repo: Arc<dyn VoucherRepository>,
    release_repo: Arc<dyn ReleaseRepository>,
    event_repo: Arc<dyn EventRepository>,
    qr_repo: Arc<dyn QrRepository>,
    storage_health: Arc<dyn StorageHealth>,

    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        customer_repo: Arc<dyn CustomerRepository>,
        voucher_repo: Arc<dyn VoucherRepository>,
        release_repo: Arc<dyn ReleaseRepository>,
        event_repo: Arc<dyn EventRepository>,
        qr_repo: Arc<dyn QrRepository>,
        storage_health: Arc<dyn StorageHealth>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            customer_repo,
            voucher_repo,
            release_repo,
            event_repo,
            qr_repo,
            storage_health,
            snowflake_generator,
        }
    }

    /// Context where a single store backs every repository
    pub fn from_store<S>(store: S, snowflake_generator: Arc<SnowflakeGenerator>) -> Self
    where
        S: CustomerRepository
            + VoucherRepository
            + ReleaseRepository
            + EventRepository
            + QrRepository
            + StorageHealth
            + 'static,
    {
        let store = Arc::new(store);
        Self::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store,
            snowflake_generator,
        )
    }

    // === Repositories ===

    pub fn customer_repo(&self) -> &dyn CustomerRepository {
        self.customer_repo.as_ref()
    }

    pub fn voucher_repo(&self) -> &dyn VoucherRepository {
        self.voucher_repo.as_ref()
    }

    pub fn release_repo(&self) -> &dyn ReleaseRepository {
        self.release_repo.as_ref()
    }

    pub fn event_repo(&self) -> &dyn EventRepository {
        self.event_repo.as_ref()
    }

    pub fn qr_repo(&self) -> &dyn QrRepository {
        self.qr_repo.as_ref()
    }

    pub fn storage_health(&self) -> &dyn StorageHealth {
        self.storage_health.as_ref()
    }

    // === Services ===

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("worker_id", &self.snowflake_generator.worker_id())
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    customer_repo: Option<Arc<dyn CustomerRepository>>,
    voucher_repo: Option<Arc<dyn VoucherRepository>>,
    release_repo: Option<Arc<dyn ReleaseRepository>>,
    event_repo: Option<Arc<dyn EventRepository>>,
    qr_repo: Option<Arc<dyn QrRepository>>,
    storage_health: Option<Arc<dyn StorageHealth>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn customer_repo(mut self, repo: Arc<dyn CustomerRepository>) -> Self {
        self.customer_repo = Some(repo);
        self
    }

    pub fn voucher_repo(mut self, repo: Arc<dyn VoucherRepository>) -> Self {
        self.voucher_repo = Some(repo);
        self
    }

    pub fn release_repo(mut self, repo: Arc<dyn ReleaseRepository>) -> Self {
        self.release_repo = Some(repo);
        self
    }

    pub fn event_repo(mut self, repo: Arc<dyn EventRepository>) -> Self {
        self.event_repo = Some(repo);
        self
    }

    pub fn qr_repo(mut self, repo: Arc<dyn QrRepository>) -> Self {
        self.qr_repo = Some(repo);
        self
    }

    pub fn storage_health(mut self, probe: Arc<dyn StorageHealth>) -> Self {
        self.storage_health = Some(probe);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
        }

        Ok(ServiceContext::new(
            required(self.customer_repo, "customer_repo")?,
            required(self.voucher_repo, "voucher_repo")?,
            required(self.release_repo, "release_repo")?,
            required(self.event_repo, "event_repo")?,
            required(self.qr_repo, "qr_repo")?,
            required(self.storage_health, "storage_health")?,
            required(self.snowflake_generator, "snowflake_generator")?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voucher_db::MemoryStore;

    #[test]
    fn test_builder_requires_every_dependency() {
        let store = Arc::new(MemoryStore::new());
        let err = ServiceContextBuilder::new()
            .customer_repo(store.clone())
            .voucher_repo(store)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("release_repo is required"));
    }

    #[test]
    fn test_from_store_shares_generator() {
        let ctx = ServiceContext::from_store(MemoryStore::new(), Arc::new(SnowflakeGenerator::new(7)));
        assert_eq!(ctx.snowflake_generator().worker_id(), 7);
        assert_ne!(ctx.generate_id(), ctx.generate_id());
    }
}
