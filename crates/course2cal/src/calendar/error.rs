//! Error types for occurrence computation and export.

use thiserror::Error;

/// Errors raised while turning sessions into exported calendar events.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// No first occurrence could be computed for the session
    #[error("No occurrence for {course} on weekday {weekday}")]
    OccurrenceUnresolvable { course: String, weekday: u8 },

    /// The exporter could not reach its backend
    #[error("Export transport error: {message}")]
    Transport { message: String },

    /// The backend refused the event
    #[error("Export rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The exporter is not allowed to write to the calendar
    #[error("Calendar access denied: {message}")]
    AccessDenied { message: String },
}

impl CalendarError {
    /// Returns true if retrying the same export might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            CalendarError::Transport { .. } => true,
            CalendarError::Rejected { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
