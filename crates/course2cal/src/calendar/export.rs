//! Hand-off of events to calendar backends.
//!
//! Backends implement [`CalendarExporter`] for a single event; batching,
//! concurrency and result aggregation live here so every backend reports
//! partial success the same way.

use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::fmt;
use std::future::Future;
use tracing::{info, warn};

use super::config::SemesterConfig;
use super::engine::OccurrenceEngine;
use super::error::CalendarError;
use super::types::{EventDescriptor, EventTime};
use crate::schedule::CourseSession;

const PAYLOAD_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A calendar backend that can store one event.
pub trait CalendarExporter: Sync {
    fn export(&self, event: &EventDescriptor) -> impl Future<Output = Result<(), CalendarError>> + Send;
}

/// JSON body for remote calendar APIs (Google Calendar event resource shape).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarPayload {
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start: PayloadTime,
    pub end: PayloadTime,
    pub recurrence: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminders: Option<PayloadReminders>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadTime {
    pub date_time: String,
    pub time_zone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadReminders {
    pub use_default: bool,
    pub overrides: Vec<ReminderOverride>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderOverride {
    pub method: String,
    pub minutes: u32,
}

impl From<&EventTime> for PayloadTime {
    fn from(time: &EventTime) -> Self {
        Self {
            date_time: time.instant.format(PAYLOAD_TIME_FORMAT).to_string(),
            time_zone: time.timezone.clone(),
        }
    }
}

impl From<&EventDescriptor> for CalendarPayload {
    fn from(event: &EventDescriptor) -> Self {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());

        Self {
            summary: event.title.clone(),
            location: non_empty(&event.location),
            description: non_empty(&event.description),
            start: PayloadTime::from(&event.start),
            end: PayloadTime::from(&event.end),
            recurrence: vec![event.recurrence.to_content_line()],
            reminders: event.reminder_minutes_before.map(|minutes| PayloadReminders {
                use_default: false,
                overrides: vec![ReminderOverride {
                    method: "popup".to_string(),
                    minutes,
                }],
            }),
        }
    }
}

/// One session that could not be exported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFailure {
    pub course: String,
    pub weekday: u8,
    pub error: CalendarError,
    /// Whether exporting the same event again might succeed.
    pub retryable: bool,
}

/// Per-session results of a batch export.
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub failures: Vec<ExportFailure>,
}

/// Aggregate result shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    NothingSelected,
    AllSucceeded(usize),
    Partial { succeeded: usize, failed: usize },
    AllFailed(usize),
}

impl ExportOutcome {
    /// True when at least one event was exported.
    pub fn any_succeeded(&self) -> bool {
        matches!(self, ExportOutcome::AllSucceeded(_) | ExportOutcome::Partial { .. })
    }
}

impl fmt::Display for ExportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportOutcome::NothingSelected => write!(f, "沒有勾選要匯出的課程"),
            ExportOutcome::AllSucceeded(n) => write!(f, "成功匯出 {n} 堂課"),
            ExportOutcome::Partial { succeeded, failed } => {
                write!(f, "成功匯出 {succeeded} 堂課，有 {failed} 堂失敗")
            }
            ExportOutcome::AllFailed(n) => write!(f, "{n} 堂課全部匯出失敗"),
        }
    }
}

impl ExportReport {
    pub fn outcome(&self) -> ExportOutcome {
        let failed = self.failures.len();
        match (self.attempted, self.succeeded, failed) {
            (0, _, _) => ExportOutcome::NothingSelected,
            (_, n, 0) => ExportOutcome::AllSucceeded(n),
            (_, 0, m) => ExportOutcome::AllFailed(m),
            (_, succeeded, failed) => ExportOutcome::Partial { succeeded, failed },
        }
    }
}

/// Exports every selected session, at most `concurrency` at a time.
///
/// Each session succeeds or fails on its own; sessions without a first
/// occurrence are recorded as failures and never stop the rest.
pub async fn export_selected<E: CalendarExporter>(
    exporter: &E,
    sessions: &[CourseSession],
    config: &SemesterConfig,
    concurrency: usize,
) -> ExportReport {
    let selected: Vec<&CourseSession> = sessions.iter().filter(|s| s.selected).collect();
    let mut report = ExportReport {
        attempted: selected.len(),
        ..ExportReport::default()
    };

    let results: Vec<(&CourseSession, Result<(), CalendarError>)> = stream::iter(selected)
        .map(|session| async move {
            let result = match OccurrenceEngine::build_event(session, config) {
                Some(event) => exporter.export(&event).await,
                None => Err(CalendarError::OccurrenceUnresolvable {
                    course: session.name.clone(),
                    weekday: session.weekday,
                }),
            };
            (session, result)
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    for (session, result) in results {
        match result {
            Ok(()) => report.succeeded += 1,
            Err(error) => {
                let retryable = error.is_retryable();
                warn!(
                    course = %session.name,
                    weekday = session.weekday,
                    retryable,
                    error = %error,
                    "export failed"
                );
                report.failures.push(ExportFailure {
                    course: session.name.clone(),
                    weekday: session.weekday,
                    error,
                    retryable,
                });
            }
        }
    }

    info!(
        attempted = report.attempted,
        succeeded = report.succeeded,
        failed = report.failures.len(),
        "export finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    /// Records exported titles; fails for titles listed in `reject`.
    struct MemoryExporter {
        exported: Mutex<Vec<String>>,
        reject: Vec<&'static str>,
    }

    impl MemoryExporter {
        fn new(reject: Vec<&'static str>) -> Self {
            Self {
                exported: Mutex::new(Vec::new()),
                reject,
            }
        }
    }

    impl CalendarExporter for MemoryExporter {
        async fn export(&self, event: &EventDescriptor) -> Result<(), CalendarError> {
            if self.reject.contains(&event.title.as_str()) {
                return Err(CalendarError::Rejected {
                    status: 400,
                    message: "bad event".into(),
                });
            }
            self.exported.lock().unwrap().push(event.title.clone());
            Ok(())
        }
    }

    fn session(name: &str, weekday: u8) -> CourseSession {
        CourseSession {
            name: name.into(),
            teacher: "王小明".into(),
            location: String::new(),
            raw_time_text: "一 1".into(),
            weekday,
            periods: vec![1],
            credits: None,
            notes: String::new(),
            selected: true,
        }
    }

    fn config() -> SemesterConfig {
        SemesterConfig::starting(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap())
    }

    #[tokio::test]
    async fn test_all_succeeded() {
        let exporter = MemoryExporter::new(vec![]);
        let sessions = vec![session("a", 2), session("b", 3)];
        let report = export_selected(&exporter, &sessions, &config(), 4).await;
        assert_eq!(report.outcome(), ExportOutcome::AllSucceeded(2));
        assert_eq!(exporter.exported.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_partial_success_is_reported() {
        let exporter = MemoryExporter::new(vec!["b"]);
        let sessions = vec![session("a", 2), session("b", 3), session("c", 0)];
        let report = export_selected(&exporter, &sessions, &config(), 2).await;

        assert_eq!(report.outcome(), ExportOutcome::Partial { succeeded: 1, failed: 2 });
        assert!(report.outcome().any_succeeded());
        assert!(report
            .failures
            .iter()
            .any(|f| matches!(f.error, CalendarError::OccurrenceUnresolvable { .. })));
        assert_eq!(report.outcome().to_string(), "成功匯出 1 堂課，有 2 堂失敗");
    }

    #[tokio::test]
    async fn test_all_failed_and_nothing_selected() {
        let exporter = MemoryExporter::new(vec!["a"]);
        let report = export_selected(&exporter, &[session("a", 2)], &config(), 1).await;
        assert_eq!(report.outcome(), ExportOutcome::AllFailed(1));
        assert!(!report.outcome().any_succeeded());

        let mut unselected = session("a", 2);
        unselected.selected = false;
        let report = export_selected(&exporter, &[unselected], &config(), 1).await;
        assert_eq!(report.outcome(), ExportOutcome::NothingSelected);
    }

    struct OfflineExporter;

    impl CalendarExporter for OfflineExporter {
        async fn export(&self, _event: &EventDescriptor) -> Result<(), CalendarError> {
            Err(CalendarError::Transport {
                message: "connection reset".into(),
            })
        }
    }

    #[tokio::test]
    async fn test_failures_carry_retryability() {
        let report = export_selected(&OfflineExporter, &[session("a", 2)], &config(), 1).await;
        assert_eq!(report.outcome(), ExportOutcome::AllFailed(1));
        assert!(report.failures[0].retryable);

        let exporter = MemoryExporter::new(vec!["b"]);
        let sessions = vec![session("b", 2), session("c", 0)];
        let report = export_selected(&exporter, &sessions, &config(), 2).await;
        assert_eq!(report.failures.len(), 2);
        assert!(report.failures.iter().all(|f| !f.retryable));
    }

    #[tokio::test]
    async fn test_zero_concurrency_still_runs() {
        let exporter = MemoryExporter::new(vec![]);
        let report = export_selected(&exporter, &[session("a", 2)], &config(), 0).await;
        assert_eq!(report.succeeded, 1);
    }

    #[test]
    fn test_payload_shape() {
        let mut s = session("微積分甲上", 2);
        s.notes = "限本系".into();
        let event = OccurrenceEngine::build_event(&s, &config()).unwrap();
        let json = serde_json::to_value(CalendarPayload::from(&event)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "summary": "微積分甲上",
                "description": "授課老師：王小明\n\n限本系",
                "start": { "dateTime": "2025-09-01T08:10:00", "timeZone": "Asia/Taipei" },
                "end": { "dateTime": "2025-09-01T09:00:00", "timeZone": "Asia/Taipei" },
                "recurrence": ["RRULE:FREQ=WEEKLY;COUNT=16"],
                "reminders": { "useDefault": false, "overrides": [{ "method": "popup", "minutes": 10 }] }
            })
        );
    }
}
