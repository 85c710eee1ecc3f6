/// Types for calendar events produced from course sessions
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Number of weekly meetings in one NTU semester.
pub const SEMESTER_WEEKS: u32 = 16;

/// Repetition frequency of a recurrence rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Weekly,
}

impl Frequency {
    fn as_rrule(self) -> &'static str {
        match self {
            Frequency::Weekly => "WEEKLY",
        }
    }
}

/// Count-bounded recurrence rule, rendered in iCalendar RRULE syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    pub count: u32,
}

impl RecurrenceRule {
    /// Weekly for a full semester.
    pub fn semester() -> Self {
        Self {
            frequency: Frequency::Weekly,
            count: SEMESTER_WEEKS,
        }
    }

    /// Content line form, `RRULE:FREQ=WEEKLY;COUNT=16`.
    pub fn to_content_line(&self) -> String {
        format!("RRULE:{self}")
    }
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FREQ={};COUNT={}", self.frequency.as_rrule(), self.count)
    }
}

/// Serialized as a one-element list of rule strings.
impl Serialize for RecurrenceRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(std::iter::once(self.to_string()))
    }
}

/// Wall-clock time plus the IANA zone it is expressed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventTime {
    pub instant: NaiveDateTime,
    pub timezone: String,
}

/// Calendar-agnostic description of one recurring course event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDescriptor {
    pub title: String,
    pub location: String,
    pub description: String,
    pub start: EventTime,
    pub end: EventTime,
    pub recurrence: RecurrenceRule,
    /// `None` when no reminder is wanted.
    pub reminder_minutes_before: Option<u32>,
}
