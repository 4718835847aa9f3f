//! PostgreSQL implementation of ReleaseRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use voucher_core::entities::{Release, VoucherBundle};
use voucher_core::traits::{ReleaseRepository, RepoResult};
use voucher_core::value_objects::Snowflake;

use crate::models::{ReleaseBundleRow, ReleaseModel};

use super::error::{map_db_error, release_not_found};

/// Columns shared by every bundle query; callers append WHERE / ORDER BY
const BUNDLE_SELECT: &str = r"
    SELECT r.id AS release_id, r.customer_id, r.voucher_id, r.event_code,
           r.created_at AS release_created_at,
           v.discount, v.status, v.created_at AS voucher_created_at, v.claimed_at,
           c.first_name, c.last_name, c.email, c.phone_number,
           c.created_at AS customer_created_at, c.updated_at AS customer_updated_at
    FROM releases r
    JOIN vouchers v ON v.id = r.voucher_id
    LEFT JOIN customers c ON c.id = r.customer_id
";

/// PostgreSQL implementation of ReleaseRepository
#[derive(Clone)]
pub struct PgReleaseRepository {
    pool: PgPool,
}

impl PgReleaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReleaseRepository for PgReleaseRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Release>> {
        let result = sqlx::query_as::<_, ReleaseModel>(
            r"
            SELECT id, customer_id, voucher_id, event_code, created_at
            FROM releases
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Release::from))
    }

    #[instrument(skip(self))]
    async fn find_bundle(&self, id: Snowflake) -> RepoResult<Option<VoucherBundle>> {
        let sql = format!("{BUNDLE_SELECT} WHERE r.id = $1");
        let row = sqlx::query_as::<_, ReleaseBundleRow>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        row.map(VoucherBundle::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_voucher(&self, voucher_id: Snowflake) -> RepoResult<Option<Release>> {
        let result = sqlx::query_as::<_, ReleaseModel>(
            r"
            SELECT id, customer_id, voucher_id, event_code, created_at
            FROM releases
            WHERE voucher_id = $1
            ORDER BY id
            LIMIT 1
            ",
        )
        .bind(voucher_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Release::from))
    }

    #[instrument(skip(self))]
    async fn list_bundles(&self) -> RepoResult<Vec<VoucherBundle>> {
        let sql = format!("{BUNDLE_SELECT} ORDER BY r.id DESC");
        let rows = sqlx::query_as::<_, ReleaseBundleRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        rows.into_iter().map(VoucherBundle::try_from).collect()
    }

    #[instrument(skip(self, release), fields(release_id = %release.id))]
    async fn create(&self, release: &Release) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO releases (id, customer_id, voucher_id, event_code, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(release.id.into_inner())
        .bind(release.customer_id.into_inner())
        .bind(release.voucher_id.into_inner())
        .bind(&release.event_code)
        .bind(release.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM releases WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(release_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count_by_customer(&self, customer_id: Snowflake) -> RepoResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM releases WHERE customer_id = $1")
            .bind(customer_id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(count)
    }
}
