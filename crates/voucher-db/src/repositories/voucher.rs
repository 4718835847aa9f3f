//! PostgreSQL implementation of VoucherRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use voucher_core::entities::Voucher;
use voucher_core::traits::{RepoResult, VoucherRepository};
use voucher_core::value_objects::{Discount, Snowflake};

use crate::models::VoucherModel;

use super::error::{map_db_error, voucher_not_found};

/// PostgreSQL implementation of VoucherRepository
#[derive(Clone)]
pub struct PgVoucherRepository {
    pool: PgPool,
}

impl PgVoucherRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VoucherRepository for PgVoucherRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Voucher>> {
        let result = sqlx::query_as::<_, VoucherModel>(
            r"
            SELECT id, discount, status, created_at, claimed_at
            FROM vouchers
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Voucher::try_from).transpose()
    }

    #[instrument(skip(self, voucher), fields(voucher_id = %voucher.id))]
    async fn create(&self, voucher: &Voucher) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO vouchers (id, discount, status, created_at, claimed_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(voucher.id.into_inner())
        .bind(i16::from(voucher.discount))
        .bind(voucher.status.as_str())
        .bind(voucher.created_at)
        .bind(voucher.claimed_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_discount(&self, id: Snowflake, discount: Discount) -> RepoResult<()> {
        let result = sqlx::query("UPDATE vouchers SET discount = $2 WHERE id = $1")
            .bind(id.into_inner())
            .bind(i16::from(discount))
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(voucher_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn conditional_claim(&self, id: Snowflake) -> RepoResult<u64> {
        // single statement: the row lock taken by UPDATE serializes
        // concurrent claims, and the loser re-evaluates the WHERE clause
        let result = sqlx::query(
            r"
            UPDATE vouchers
            SET status = 'claimed', claimed_at = NOW()
            WHERE id = $1 AND status = 'unclaimed'
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM vouchers WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(voucher_not_found(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgVoucherRepository>();
    }
}
