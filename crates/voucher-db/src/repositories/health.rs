//! PostgreSQL reachability probe

use async_trait::async_trait;
use sqlx::PgPool;

use voucher_core::traits::{RepoResult, StorageHealth};

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgStorageHealth {
    pool: PgPool,
}

impl PgStorageHealth {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StorageHealth for PgStorageHealth {
    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
