//! PostgreSQL implementation of CustomerRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use voucher_core::entities::Customer;
use voucher_core::traits::{CustomerRepository, RepoResult};
use voucher_core::value_objects::Snowflake;

use crate::models::CustomerModel;

use super::error::{customer_not_found, map_db_error};

/// PostgreSQL implementation of CustomerRepository
#[derive(Clone)]
pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Customer>> {
        let result = sqlx::query_as::<_, CustomerModel>(
            r"
            SELECT id, first_name, last_name, email, phone_number, created_at, updated_at
            FROM customers
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Customer::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Customer>> {
        // oldest match wins when historical data holds duplicates
        let result = sqlx::query_as::<_, CustomerModel>(
            r"
            SELECT id, first_name, last_name, email, phone_number, created_at, updated_at
            FROM customers
            WHERE email = $1
            ORDER BY id
            LIMIT 1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Customer::from))
    }

    #[instrument(skip(self, customer), fields(customer_id = %customer.id))]
    async fn create(&self, customer: &Customer) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO customers (id, first_name, last_name, email, phone_number, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(customer.id.into_inner())
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.email)
        .bind(&customer.phone_number)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, customer), fields(customer_id = %customer.id))]
    async fn update(&self, customer: &Customer) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE customers
            SET first_name = $2, last_name = $3, email = $4, phone_number = $5, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(customer.id.into_inner())
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.email)
        .bind(&customer.phone_number)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(customer_not_found(customer.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(customer_not_found(id));
        }

        Ok(())
    }
}
