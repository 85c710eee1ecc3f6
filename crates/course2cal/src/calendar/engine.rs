//! Maps weekday/period sessions onto concrete semester dates.

use chrono::{Datelike, Days, Duration, NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

use super::config::SemesterConfig;
use super::types::{EventDescriptor, EventTime, RecurrenceRule};
use crate::schedule::{CourseSession, PeriodClock, PERIOD_MINUTES};

/// Label put in front of the teacher name in event descriptions.
const TEACHER_LABEL: &str = "授課老師：";

/// Events built from a batch of sessions.
#[derive(Debug, Clone, Default)]
pub struct EventBatch {
    pub events: Vec<EventDescriptor>,
    /// Selected sessions that had no resolvable first occurrence.
    pub skipped: Vec<CourseSession>,
}

/// Stateless occurrence computation. All inputs are passed per call.
pub struct OccurrenceEngine;

impl OccurrenceEngine {
    /// Days from `start_date` forward to the next `weekday` (1 = Sunday),
    /// zero when the start date already falls on it. `None` for weekdays
    /// outside `1..=7`.
    pub fn day_delta(weekday: u8, start_date: NaiveDate) -> Option<u32> {
        if !(1..=7).contains(&weekday) {
            return None;
        }
        let start_weekday = start_date.weekday().number_from_sunday();
        Some((u32::from(weekday) + 7 - start_weekday) % 7)
    }

    /// Start of the first meeting on or after the semester start.
    ///
    /// The clock time is that of the numerically smallest period, whatever
    /// order the list is in.
    pub fn first_occurrence(session: &CourseSession, config: &SemesterConfig) -> Option<NaiveDateTime> {
        let first_period = session.first_period()?;
        let delta = Self::day_delta(session.weekday, config.start_date)?;
        let date = config
            .start_date
            .checked_add_days(Days::new(u64::from(delta)))?;

        Some(date.and_time(PeriodClock::start_of_period(first_period)))
    }

    /// 50 minutes per listed period, gaps between periods ignored.
    pub fn duration(session: &CourseSession) -> Duration {
        Duration::minutes(PERIOD_MINUTES * session.periods.len() as i64)
    }

    /// Every `(start, end)` pair of the session over the semester.
    pub fn occurrences(session: &CourseSession, config: &SemesterConfig) -> Vec<(NaiveDateTime, NaiveDateTime)> {
        let Some(first) = Self::first_occurrence(session, config) else {
            return Vec::new();
        };
        let duration = Self::duration(session);
        let rule = RecurrenceRule::semester();

        (0..rule.count)
            .map_while(|week| {
                let start = first.checked_add_days(Days::new(7 * u64::from(week)))?;
                Some((start, start.checked_add_signed(duration)?))
            })
            .collect()
    }

    /// Builds the exportable event for one session.
    pub fn build_event(session: &CourseSession, config: &SemesterConfig) -> Option<EventDescriptor> {
        let start = Self::first_occurrence(session, config)?;
        let end = start.checked_add_signed(Self::duration(session))?;

        Some(EventDescriptor {
            title: session.name.clone(),
            location: session.location.clone(),
            description: describe(session),
            start: EventTime {
                instant: start,
                timezone: config.time_zone.clone(),
            },
            end: EventTime {
                instant: end,
                timezone: config.time_zone.clone(),
            },
            recurrence: RecurrenceRule::semester(),
            reminder_minutes_before: (config.reminder_minutes_before > 0)
                .then_some(config.reminder_minutes_before),
        })
    }

    /// Builds events for every selected session. Sessions without an
    /// occurrence are reported in `skipped` and do not affect the others.
    pub fn build_events(sessions: &[CourseSession], config: &SemesterConfig) -> EventBatch {
        let mut batch = EventBatch::default();

        for session in sessions.iter().filter(|s| s.selected) {
            match Self::build_event(session, config) {
                Some(event) => batch.events.push(event),
                None => {
                    warn!(
                        course = %session.name,
                        weekday = session.weekday,
                        "no first occurrence, skipping session"
                    );
                    batch.skipped.push(session.clone());
                }
            }
        }

        debug!(
            events = batch.events.len(),
            skipped = batch.skipped.len(),
            start_date = %config.start_date,
            "built calendar events"
        );
        batch
    }
}

/// Teacher line, then the notes as a separate paragraph when present.
fn describe(session: &CourseSession) -> String {
    let mut description = format!("{TEACHER_LABEL}{}", session.teacher);
    if !session.notes.is_empty() {
        description.push_str("\n\n");
        description.push_str(&session.notes);
    }
    description
}
