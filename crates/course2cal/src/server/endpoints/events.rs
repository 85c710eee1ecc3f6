//! Endpoints that turn sessions into calendar events.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::calendar::{CalendarPayload, EventBatch, EventDescriptor, OccurrenceEngine, SemesterConfig};
use crate::schedule::CourseSession;
use crate::server::types::ApiErrorType;
use crate::types::AppState;

#[derive(Debug, Deserialize)]
pub struct EventsRequest {
    pub sessions: Vec<CourseSession>,
    /// Overrides the configured semester.
    #[serde(default)]
    pub semester: Option<SemesterConfig>,
}

#[derive(Debug, Serialize)]
pub struct EventsResponse<T> {
    pub events: Vec<T>,
    /// Selected sessions for which no occurrence could be computed.
    pub skipped: Vec<CourseSession>,
}

fn build_batch(state: &AppState, request: EventsRequest) -> Result<EventBatch, Response> {
    let Some(semester) = request.semester.or_else(|| state.semester.clone()) else {
        warn!("events requested without a semester start date");
        return Err(ApiErrorType::from((
            StatusCode::BAD_REQUEST,
            "No semester configured",
            Some("pass `semester.start_date` or set it in the config file".to_string()),
        ))
        .into_response());
    };

    Ok(OccurrenceEngine::build_events(&request.sessions, &semester))
}

/// POST /events
/// Returns calendar-agnostic event descriptors for the selected sessions
pub async fn post_events(
    State(s): State<Arc<AppState>>,
    Json(request): Json<EventsRequest>,
) -> Response {
    info!(sessions = request.sessions.len(), "POST /events");

    match build_batch(&s, request) {
        Ok(batch) => {
            let body: EventsResponse<EventDescriptor> = EventsResponse {
                events: batch.events,
                skipped: batch.skipped,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(response) => response,
    }
}

/// POST /events/payloads
/// Same as `/events`, rendered as remote calendar API request bodies
pub async fn post_payloads(
    State(s): State<Arc<AppState>>,
    Json(request): Json<EventsRequest>,
) -> Response {
    info!(sessions = request.sessions.len(), "POST /events/payloads");

    match build_batch(&s, request) {
        Ok(batch) => {
            let body = EventsResponse {
                events: batch.events.iter().map(CalendarPayload::from).collect(),
                skipped: batch.skipped,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(response) => response,
    }
}
