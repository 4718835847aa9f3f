//! Event entity <-> model mapper

use voucher_core::entities::Event;
use voucher_core::error::DomainError;
use voucher_core::value_objects::EventCode;

use crate::models::EventModel;

impl TryFrom<EventModel> for Event {
    type Error = DomainError;

    fn try_from(model: EventModel) -> Result<Self, Self::Error> {
        Ok(Event {
            code: EventCode::parse(&model.code)?,
            name: model.name,
            created_at: model.created_at,
        })
    }
}

/// Numeric suffix stored alongside the code for `MAX()` queries
pub fn event_number(code: EventCode) -> i32 {
    i32::try_from(code.number()).unwrap_or(i32::MAX)
}
