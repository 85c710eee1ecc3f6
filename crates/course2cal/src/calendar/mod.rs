/// Occurrence computation and calendar hand-off for parsed sessions
mod config;
pub mod engine;
pub mod error;
pub mod export;
mod types;

pub use config::*;
pub use engine::{EventBatch, OccurrenceEngine};
pub use error::CalendarError;
pub use export::{
    export_selected, CalendarExporter, CalendarPayload, ExportFailure, ExportOutcome, ExportReport,
};
pub use types::*;
