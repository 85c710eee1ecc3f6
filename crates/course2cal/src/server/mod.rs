use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::server::endpoints::{events, parse, status};
use crate::types::AppState;

pub mod cache;
mod endpoints;
mod types;

/// Creates a router that can be used by `axum`.
///
/// # Parameters
/// - `app_state`: The app server state.
///
/// # Returns
/// The router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(status::get_health))
        .route("/periods", get(status::get_periods))
        .route("/parse", post(parse::post_parse))
        .route("/parse/invalidate_cache", post(parse::invalidate_cache))
        .route("/events", post(events::post_events))
        .route("/events/payloads", post(events::post_payloads))
        .with_state(app_state)
}
