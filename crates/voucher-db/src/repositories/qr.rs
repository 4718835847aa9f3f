//! PostgreSQL implementation of QrRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use voucher_core::entities::QrRecord;
use voucher_core::traits::{QrRepository, RepoResult};
use voucher_core::value_objects::Snowflake;

use crate::models::QrRecordModel;

use super::error::map_db_error;

/// PostgreSQL implementation of QrRepository
#[derive(Clone)]
pub struct PgQrRepository {
    pool: PgPool,
}

impl PgQrRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QrRepository for PgQrRepository {
    #[instrument(skip(self, payload), fields(payload_len = payload.len()))]
    async fn find_by_payload(&self, payload: &str) -> RepoResult<Option<QrRecord>> {
        let result = sqlx::query_as::<_, QrRecordModel>(
            r"
            SELECT release_id, payload, created_at
            FROM qr_records
            WHERE payload = $1
            ORDER BY release_id
            LIMIT 1
            ",
        )
        .bind(payload)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(QrRecord::from))
    }

    #[instrument(skip(self))]
    async fn find_by_release(&self, release_id: Snowflake) -> RepoResult<Option<QrRecord>> {
        let result = sqlx::query_as::<_, QrRecordModel>(
            "SELECT release_id, payload, created_at FROM qr_records WHERE release_id = $1",
        )
        .bind(release_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(QrRecord::from))
    }

    #[instrument(skip(self, record), fields(release_id = %record.release_id))]
    async fn upsert(&self, record: &QrRecord) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO qr_records (release_id, payload, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (release_id) DO UPDATE SET payload = EXCLUDED.payload
            ",
        )
        .bind(record.release_id.into_inner())
        .bind(&record.payload)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_by_release(&self, release_id: Snowflake) -> RepoResult<()> {
        sqlx::query("DELETE FROM qr_records WHERE release_id = $1")
            .bind(release_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}
