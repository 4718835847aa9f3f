//! Event database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for events table
#[derive(Debug, Clone, FromRow)]
pub struct EventModel {
    pub code: String,
    pub number: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
