/// Semester settings passed to the occurrence engine
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Time zone the NTU portal schedule is written in.
pub const DEFAULT_TIME_ZONE: &str = "Asia/Taipei";

/// Minutes of advance reminder used when none is configured.
pub const DEFAULT_REMINDER_MINUTES: u32 = 10;

/// Per-call semester configuration.
///
/// The time zone is an IANA name that is passed through to exported events
/// as-is; no conversion happens here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterConfig {
    /// First class day of the semester.
    pub start_date: NaiveDate,
    #[serde(default = "default_reminder")]
    pub reminder_minutes_before: u32,
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
}

fn default_reminder() -> u32 {
    DEFAULT_REMINDER_MINUTES
}

fn default_time_zone() -> String {
    DEFAULT_TIME_ZONE.to_string()
}

impl SemesterConfig {
    /// Config starting on `start_date` with the default reminder and zone.
    pub fn starting(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            reminder_minutes_before: DEFAULT_REMINDER_MINUTES,
            time_zone: default_time_zone(),
        }
    }

    pub fn with_reminder(mut self, minutes: u32) -> Self {
        self.reminder_minutes_before = minutes;
        self
    }

    pub fn with_time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = time_zone.into();
        self
    }
}
