//! Event handlers

use axum::{extract::State, Json};
use voucher_service::{CreateEventRequest, EventResponse, EventService};

use crate::extractors::{ApiPath, EventCodePath, JsonBody};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Create an event with the next free code
///
/// POST /events
pub async fn create_event(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateEventRequest>,
) -> ApiResult<Created<Json<EventResponse>>> {
    let service = EventService::new(state.service_context());
    let event = service.create_event(request).await?;
    Ok(Created(Json(event.into())))
}

/// GET /events
pub async fn list_events(State(state): State<AppState>) -> ApiResult<Json<Vec<EventResponse>>> {
    let service = EventService::new(state.service_context());
    let events = service.list_events().await?;
    Ok(Json(events.into_iter().map(EventResponse::from).collect()))
}

/// GET /events/{code}
pub async fn get_event(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<EventCodePath>,
) -> ApiResult<Json<EventResponse>> {
    let service = EventService::new(state.service_context());
    let event = service.get_event(&path.code).await?;
    Ok(Json(event.into()))
}
