//! PostgreSQL implementation of EventRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use voucher_core::entities::Event;
use voucher_core::error::DomainError;
use voucher_core::traits::{EventRepository, RepoResult};
use voucher_core::value_objects::EventCode;

use crate::mappers::event_number;
use crate::models::EventModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of EventRepository
#[derive(Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    #[instrument(skip(self), fields(code = %code))]
    async fn find_by_code(&self, code: EventCode) -> RepoResult<Option<Event>> {
        let result = sqlx::query_as::<_, EventModel>(
            "SELECT code, number, name, created_at FROM events WHERE code = $1",
        )
        .bind(code.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Event::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventModel>(
            "SELECT code, number, name, created_at FROM events ORDER BY number",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(Event::try_from).collect()
    }

    #[instrument(skip(self, event), fields(code = %event.code))]
    async fn create(&self, event: &Event) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO events (code, number, name, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(event.code.to_string())
        .bind(event_number(event.code))
        .bind(&event.name)
        .bind(event.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EventCodeExists(event.code.to_string())))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn max_code_number(&self) -> RepoResult<Option<u32>> {
        let (max,): (Option<i32>,) = sqlx::query_as("SELECT MAX(number) FROM events")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(max.and_then(|n| u32::try_from(n).ok()))
    }
}
