//! Event service
//!
//! Events get sequential codes (`ATK-001`, `ATK-002`, ...). The next code is
//! derived from the current maximum, so two concurrent creations can pick
//! the same code; the loser sees `EventCodeExists` and tries the next one.

use tracing::{debug, info, instrument};
use validator::Validate;
use voucher_core::entities::Event;
use voucher_core::{DomainError, EventCode};

use crate::dto::CreateEventRequest;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Attempts at allocating a free code before giving up
const MAX_CODE_ATTEMPTS: usize = 5;

/// Event service
pub struct EventService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EventService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create an event under the next free code
    #[instrument(skip(self, request))]
    pub async fn create_event(&self, request: CreateEventRequest) -> ServiceResult<Event> {
        request.validate()?;
        let name = request.name.trim().to_string();

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let max = self.ctx.event_repo().max_code_number().await?;
            let event = Event::new(EventCode::next_after(max), name.clone());

            match self.ctx.event_repo().create(&event).await {
                Ok(()) => {
                    info!(code = %event.code, "Event created");
                    return Ok(event);
                }
                Err(DomainError::EventCodeExists(code)) => {
                    debug!(%code, attempt, "Event code taken, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(ServiceError::conflict(
            "Could not allocate an event code, try again",
        ))
    }

    pub async fn list_events(&self) -> ServiceResult<Vec<Event>> {
        Ok(self.ctx.event_repo().list().await?)
    }

    #[instrument(skip(self))]
    pub async fn get_event(&self, code: &str) -> ServiceResult<Event> {
        let parsed = EventCode::parse(code)?;
        self.ctx
            .event_repo()
            .find_by_code(parsed)
            .await?
            .ok_or_else(|| ServiceError::not_found("Event", code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::context;
    use voucher_core::traits::EventRepository;
    use voucher_db::MemoryStore;

    fn request(name: &str) -> CreateEventRequest {
        CreateEventRequest {
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_codes_are_sequential() {
        let ctx = context(MemoryStore::new());
        let events = EventService::new(&ctx);

        let first = events.create_event(request("Opening")).await.unwrap();
        let second = events.create_event(request("Gala")).await.unwrap();
        assert_eq!(first.code.to_string(), "ATK-001");
        assert_eq!(second.code.to_string(), "ATK-002");

        let listed = events.list_events().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(events.get_event("ATK-002").await.unwrap().name, "Gala");
    }

    #[tokio::test]
    async fn test_code_follows_highest_existing() {
        let store = MemoryStore::new();
        EventRepository::create(&store, &Event::new(EventCode::from_number(41), "Old".into()))
            .await
            .unwrap();
        let ctx = context(store);

        let event = EventService::new(&ctx).create_event(request("New")).await.unwrap();
        assert_eq!(event.code.to_string(), "ATK-042");
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_codes() {
        let ctx = std::sync::Arc::new(context(MemoryStore::new()));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let ctx = ctx.clone();
                tokio::spawn(async move {
                    EventService::new(&ctx)
                        .create_event(request(&format!("Event {i}")))
                        .await
                        .unwrap()
                        .code
                })
            })
            .collect();

        let mut codes = Vec::new();
        for handle in handles {
            codes.push(handle.await.unwrap());
        }
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), 4);
    }

    #[tokio::test]
    async fn test_get_event_errors() {
        let ctx = context(MemoryStore::new());
        let events = EventService::new(&ctx);

        let err = events.get_event("ATK-005").await.unwrap_err();
        assert_eq!(err.status_code(), 404);

        let err = events.get_event("bogus").await.unwrap_err();
        assert_eq!(err.status_code(), 400);

        let err = events.create_event(request("")).await.unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }
}
