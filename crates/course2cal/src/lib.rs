//! Course2Cal: converts text copied from the NTU course portal into weekly
//! course sessions and recurring calendar events.
//!
//! ```
//! use chrono::NaiveDate;
//! use course2cal::calendar::{OccurrenceEngine, SemesterConfig};
//! use course2cal::schedule::parse_courses;
//!
//! let sessions = parse_courses("微積分甲上\n王小明\n一 1,2\n新101\n4 學分\n");
//! let config = SemesterConfig::starting(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
//! let batch = OccurrenceEngine::build_events(&sessions, &config);
//! assert_eq!(batch.events.len(), 1);
//! ```

pub mod calendar;
pub mod config;
pub mod schedule;
pub mod server;
pub mod types;
