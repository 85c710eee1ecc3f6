//! Endpoint that turns pasted portal text into sessions.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

use crate::schedule::{group_sessions, CourseGroup, CourseSession};
use crate::server::cache::InputKey;
use crate::server::types::ApiErrorType;
use crate::types::AppState;

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    /// False when nothing in the text looked like a course.
    pub found: bool,
    pub sessions: Vec<CourseSession>,
    pub groups: Vec<CourseGroup>,
}

impl ParseResponse {
    fn new(sessions: Vec<CourseSession>) -> Self {
        Self {
            found: !sessions.is_empty(),
            groups: group_sessions(&sessions),
            sessions,
        }
    }
}

/// POST /parse
///
/// Takes the pasted text as a plain body. An unrecognisable body is not an
/// error; it comes back with `found: false`.
pub async fn post_parse(State(s): State<Arc<AppState>>, body: String) -> Response {
    let key = InputKey::from_text(&body);
    info!(input = %key, len = body.len(), "POST /parse");

    if let Some(sessions) = s.parse_cache.get(&key) {
        info!(input = %key, "returning cached parse");
        return (StatusCode::OK, Json(ParseResponse::new(sessions))).into_response();
    }

    let state = s.clone();
    let parsed = tokio::task::spawn_blocking(move || state.parser.parse(&body)).await;

    match parsed {
        Ok(sessions) => {
            s.parse_cache.cleanup_expired();
            s.parse_cache.insert(key, sessions.clone());
            (StatusCode::OK, Json(ParseResponse::new(sessions))).into_response()
        }
        Err(e) => {
            error!("Parse task failed: {}", e);
            ApiErrorType::from((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to parse course text",
                Some(e.to_string()),
            ))
            .into_response()
        }
    }
}

/// POST /parse/invalidate_cache
pub async fn invalidate_cache(State(s): State<Arc<AppState>>) -> Response {
    let cleared = s.parse_cache.len();
    s.parse_cache.clear();
    info!(cleared, "parse cache cleared");
    (StatusCode::OK, Json(serde_json::json!({ "cleared": cleared }))).into_response()
}
