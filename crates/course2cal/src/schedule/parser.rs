//! Course block parser for text copied from the course portal.
//!
//! Each course in the pasted buffer looks like
//!
//! ```text
//! 微積分甲上
//! 王小明
//! 一 1,2 / 三 5,6
//! 新生教學館101
//! 10001
//! MATH4006
//! 4 學分
//! 必修
//! 138 人
//! 限本系所學生
//! 已選上
//! ```
//!
//! Parsing happens in two steps. [`split_blocks`] cuts the buffer in front of
//! every `已選上` marker line, then [`extract_block`] matches the fixed
//! five-field template inside one chunk. Field cleanup and time expansion
//! happen afterwards in [`CourseBlockParser::expand`].

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info};

use super::segment::{parse_segment_with, ParsePolicy};
use super::types::CourseSession;

/// Line that terminates a course block on the portal.
pub const SELECTED_MARKER: &str = "已選上";

static BLOCK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?P<name>.+)\n",
        r"(?P<teacher>.+)\n",
        r"(?P<time>[一二三四五六日][^\n]+)\n",
        r"(?P<location>.+)",
        // A block may end right after the location line, even at end of input.
        r"(?:\n(?P<details>(?s:.*)))?",
    ))
    .unwrap()
});
static CAPACITY_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\s*人$").unwrap());
static DIGITS_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// The five captured fields of one block, before any cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock<'a> {
    pub name: &'a str,
    pub teacher: &'a str,
    pub time: &'a str,
    pub location: &'a str,
    pub details: &'a str,
}

/// Fields pulled out of the metadata lines that follow the location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockDetails {
    pub credits: Option<u32>,
    pub notes: String,
}

/// Normalises line endings to `\n`.
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Splits a normalised buffer into chunks holding at most one course each.
///
/// Every chunk after the first starts at the newline preceding a
/// `已選上` line, so the marker line itself becomes leading noise of the
/// following chunk.
pub fn split_blocks(text: &str) -> Vec<&str> {
    let needle = format!("\n{SELECTED_MARKER}");
    let mut chunks = Vec::new();
    let mut start = 0;

    for (idx, _) in text.match_indices(&needle) {
        if idx > start {
            chunks.push(&text[start..idx]);
        }
        start = idx;
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }

    chunks
}

/// Matches the block template against one chunk.
///
/// The earliest position where all four single-line fields line up wins,
/// which skips stray header lines above the course name.
pub fn extract_block(chunk: &str) -> Option<RawBlock<'_>> {
    let caps = BLOCK_REGEX.captures(chunk)?;
    let field = |name| caps.name(name).map_or("", |m| m.as_str());

    Some(RawBlock {
        name: field("name"),
        teacher: field("teacher"),
        time: field("time"),
        location: field("location"),
        details: field("details"),
    })
}

/// Extracts credits and notes from the metadata part of a block.
///
/// Credits come from the first number on the first `學分` line that has one.
/// Notes are every line after the last `<digits> 人` capacity line; without
/// such a line there are no notes.
pub fn parse_details(details: &str) -> BlockDetails {
    let lines: Vec<&str> = details
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut credits = None;
    let mut last_capacity = None;

    for (idx, line) in lines.iter().enumerate() {
        if credits.is_none() && line.contains("學分") {
            credits = DIGITS_REGEX
                .find(line)
                .and_then(|m| m.as_str().parse::<u32>().ok());
        }
        if CAPACITY_REGEX.is_match(line) {
            last_capacity = Some(idx);
        }
    }

    let notes = match last_capacity {
        Some(idx) => lines[idx + 1..].join("\n"),
        None => String::new(),
    };

    BlockDetails { credits, notes }
}

/// Turns pasted portal text into course sessions.
#[derive(Debug, Clone, Default)]
pub struct CourseBlockParser {
    policy: ParsePolicy,
}

impl CourseBlockParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: ParsePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ParsePolicy {
        &self.policy
    }

    /// Parses the whole buffer.
    ///
    /// Malformed content is never an error: blocks that do not match, and
    /// time segments without usable periods, simply produce no sessions. An
    /// empty result means nothing could be recognised.
    pub fn parse(&self, text: &str) -> Vec<CourseSession> {
        let text = normalize_newlines(text);
        let chunks = split_blocks(&text);
        let mut sessions = Vec::new();
        let mut matched = 0usize;

        for chunk in chunks {
            let Some(block) = extract_block(chunk) else {
                debug!(len = chunk.len(), "chunk did not match course template");
                continue;
            };
            matched += 1;
            sessions.extend(self.expand(&block));
        }

        if sessions.is_empty() {
            info!(blocks = matched, "no courses found in pasted text");
        } else {
            info!(blocks = matched, sessions = sessions.len(), "parsed course text");
        }

        sessions
    }

    /// Builds one session per usable weekday segment of a matched block.
    pub fn expand(&self, block: &RawBlock<'_>) -> Vec<CourseSession> {
        let name = block
            .name
            .lines()
            .last()
            .unwrap_or(block.name)
            .trim()
            .to_string();
        let teacher = block.teacher.trim().to_string();
        let location = block.location.trim().to_string();
        let raw_time_text = block.time.trim().to_string();
        let details = parse_details(block.details);

        let mut sessions = Vec::new();
        for segment in raw_time_text.split('/').map(str::trim) {
            if segment.is_empty() {
                continue;
            }

            let parsed = parse_segment_with(segment, &self.policy);
            if parsed.periods.is_empty() {
                debug!(course = %name, segment, "segment has no usable periods");
                continue;
            }

            let mut periods = parsed.periods;
            periods.sort_unstable();

            sessions.push(CourseSession {
                name: name.clone(),
                teacher: teacher.clone(),
                location: location.clone(),
                raw_time_text: raw_time_text.clone(),
                weekday: parsed.weekday,
                periods,
                credits: details.credits,
                notes: details.notes.clone(),
                selected: true,
            });
        }

        sessions
    }
}

/// Parses with the default fallback policy.
pub fn parse_courses(text: &str) -> Vec<CourseSession> {
    CourseBlockParser::new().parse(text)
}
