use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::schedule::PeriodClock;

/// GET /health
pub async fn get_health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// GET /periods
/// Returns the period-to-clock table
pub async fn get_periods() -> impl IntoResponse {
    (StatusCode::OK, Json(PeriodClock::table()))
}
