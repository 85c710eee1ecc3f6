/// Types for parsed course data
use serde::{Deserialize, Serialize};

/// Weekday characters as printed on the portal, Sunday first.
///
/// Index `i` corresponds to weekday number `i + 1`, so `日` is 1 (Sunday)
/// and `一` is 2 (Monday).
pub const WEEKDAY_CHARS: [char; 7] = ['日', '一', '二', '三', '四', '五', '六'];

/// Weekday number for Monday, the fallback when a segment names no day.
pub const MONDAY: u8 = 2;

/// Returns the portal character for a Sunday-first weekday number (1..=7).
pub fn weekday_char(weekday: u8) -> Option<char> {
    weekday
        .checked_sub(1)
        .and_then(|i| WEEKDAY_CHARS.get(usize::from(i)))
        .copied()
}

/// One course meeting on one weekday.
///
/// A course that meets on several days is parsed into several sessions that
/// share everything except `weekday` and `periods`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSession {
    pub name: String,
    pub teacher: String,
    pub location: String,
    /// Full time field of the course, e.g. `"一 1,2 / 三 5,6"`, identical on
    /// every sibling session.
    pub raw_time_text: String,
    /// 1 = Sunday ... 7 = Saturday.
    pub weekday: u8,
    /// Period indices for this weekday, ascending. Never empty.
    pub periods: Vec<u8>,
    #[serde(default)]
    pub credits: Option<u32>,
    #[serde(default)]
    pub notes: String,
    #[serde(default = "default_selected")]
    pub selected: bool,
}

fn default_selected() -> bool {
    true
}

impl CourseSession {
    /// Key used to regroup sibling sessions of one course.
    pub fn identity_key(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.name, self.teacher, self.location, self.raw_time_text
        )
    }

    /// Earliest period by value.
    pub fn first_period(&self) -> Option<u8> {
        self.periods.iter().copied().min()
    }

    /// Latest period by value.
    pub fn last_period(&self) -> Option<u8> {
        self.periods.iter().copied().max()
    }
}
