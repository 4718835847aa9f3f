//! Event entity - a named campaign vouchers are released under

use chrono::{DateTime, Utc};

use crate::value_objects::EventCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub code: EventCode,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn new(code: EventCode, name: String) -> Self {
        Self {
            code,
            name,
            created_at: Utc::now(),
        }
    }
}
