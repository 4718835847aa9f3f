//! Customer database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for customers table
#[derive(Debug, Clone, FromRow)]
pub struct CustomerModel {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
