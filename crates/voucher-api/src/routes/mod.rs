//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{routing::{get, post}, Router};

use crate::handlers::{events, health, scanners, vouchers};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        // API v1 endpoints
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(voucher_routes())
        .merge(event_routes())
        .merge(scanner_routes())
}

/// Voucher issuance and administration
fn voucher_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/vouchers",
            get(vouchers::list_vouchers).post(vouchers::issue_voucher),
        )
        .route(
            "/vouchers/:id",
            get(vouchers::get_voucher)
                .patch(vouchers::update_voucher)
                .delete(vouchers::delete_voucher),
        )
}

/// Event routes
fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(events::list_events).post(events::create_event))
        .route("/events/:code", get(events::get_event))
}

/// Scanner device routes
fn scanner_routes() -> Router<AppState> {
    Router::new()
        .route("/scanners/:device_id/scans", post(scanners::submit_scan))
        .route("/scanners/:device_id/foreground", post(scanners::foreground))
}
