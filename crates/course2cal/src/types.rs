/// Shared state handed to every request handler
use std::time::Duration;

use crate::calendar::SemesterConfig;
use crate::config::AppConfig;
use crate::schedule::CourseBlockParser;
use crate::server::cache::ParseCache;

pub struct AppState {
    pub parser: CourseBlockParser,
    pub parse_cache: ParseCache,
    /// Semester used when a request does not name one.
    pub semester: Option<SemesterConfig>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            parser: CourseBlockParser::new(),
            parse_cache: ParseCache::new(Duration::from_secs(config.parse_cache_ttl_secs)),
            semester: config.semester.clone(),
        }
    }
}
