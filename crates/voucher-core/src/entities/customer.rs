//! Customer entity - the recipient a voucher is issued to

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: Snowflake,
    pub first_name: String,
    pub last_name: String,
    /// Customers are matched by email during issuance
    pub email: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(
        id: Snowflake,
        first_name: String,
        last_name: String,
        email: String,
        phone_number: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            first_name,
            last_name,
            email,
            phone_number,
            created_at: now,
            updated_at: now,
        }
    }

    /// "First Last", as printed on the voucher and shown after a claim
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Replace the contact details. Identity (id) never changes.
    pub fn set_details(
        &mut self,
        first_name: String,
        last_name: String,
        email: String,
        phone_number: String,
    ) {
        self.first_name = first_name;
        self.last_name = last_name;
        self.email = email;
        self.phone_number = phone_number;
        self.updated_at = Utc::now();
    }
}
