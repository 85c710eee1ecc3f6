/// Parsing of pasted course-portal text into weekly course sessions
pub mod group;
pub mod parser;
pub mod period;
pub mod segment;
mod types;

pub use group::{group_at, group_sessions, set_group_selected, time_lines, CourseGroup};
pub use parser::{parse_courses, CourseBlockParser};
pub use period::{PeriodClock, PeriodSlot, MAX_PERIOD, PERIOD_MINUTES};
pub use segment::{parse_segment, parse_segment_with, ParsePolicy, TimeSegment, UnknownPeriodPolicy};
pub use types::*;
