/// Regrouping of sibling sessions back into courses for display
use serde::Serialize;
use sha2::{Digest, Sha256};

use super::period::PeriodClock;
use super::segment::parse_segment;
use super::types::{weekday_char, CourseSession};

/// All sessions of one course, identified by `name|teacher|location|raw time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseGroup {
    /// Short stable id derived from the identity key.
    pub id: String,
    pub name: String,
    pub teacher: String,
    pub location: String,
    pub raw_time_text: String,
    pub credits: Option<u32>,
    pub notes: String,
    /// Positions of the member sessions in the input slice.
    pub indices: Vec<usize>,
    /// True when every member is selected.
    pub selected: bool,
    /// One readable line per time segment.
    pub time_lines: Vec<String>,
}

/// Derives the group id from an identity key.
///
/// The key is hashed so ids are short and safe to use in URLs.
pub fn group_id(key: &str) -> String {
    let digest = Sha256::digest(key.as_bytes());
    hex::encode(&digest[..8])
}

/// Groups sessions by identity key, in order of first appearance.
pub fn group_sessions(sessions: &[CourseSession]) -> Vec<CourseGroup> {
    let mut groups: Vec<(String, CourseGroup)> = Vec::new();

    for (idx, session) in sessions.iter().enumerate() {
        let key = session.identity_key();
        if let Some((_, group)) = groups.iter_mut().find(|(k, _)| *k == key) {
            group.indices.push(idx);
            group.selected &= session.selected;
            continue;
        }

        let group = CourseGroup {
            id: group_id(&key),
            name: session.name.clone(),
            teacher: session.teacher.clone(),
            location: session.location.clone(),
            raw_time_text: session.raw_time_text.clone(),
            credits: session.credits,
            notes: session.notes.clone(),
            indices: vec![idx],
            selected: session.selected,
            time_lines: time_lines(&session.raw_time_text),
        };
        groups.push((key, group));
    }

    groups.into_iter().map(|(_, g)| g).collect()
}

/// Sets `selected` on every session of the group with `group_id`.
///
/// Returns the number of sessions touched; zero when no group matches.
pub fn set_group_selected(sessions: &mut [CourseSession], group_id: &str, selected: bool) -> usize {
    let Some(key) = sessions
        .iter()
        .map(CourseSession::identity_key)
        .find(|k| self::group_id(k) == group_id)
    else {
        return 0;
    };

    let mut touched = 0;
    for session in sessions.iter_mut().filter(|s| s.identity_key() == key) {
        session.selected = selected;
        touched += 1;
    }
    touched
}

/// Finds the group that occupies `period` on `weekday` in a weekly grid.
pub fn group_at(sessions: &[CourseSession], weekday: u8, period: u8) -> Option<CourseGroup> {
    let hit = sessions
        .iter()
        .find(|s| s.weekday == weekday && s.periods.contains(&period))?;
    let key = hit.identity_key();
    group_sessions(sessions)
        .into_iter()
        .find(|g| g.id == group_id(&key))
}

/// Renders each `/`-separated segment of a raw time field, e.g.
/// `"一 1,2 / 三 5,6"` becomes
/// `["週一 1 ~ 2 節（08:10 ~ 10:00）", "週三 5 ~ 6 節（12:20 ~ 14:10）"]`.
///
/// Segments without a weekday token or without usable periods are left out.
pub fn time_lines(raw_time_text: &str) -> Vec<String> {
    raw_time_text
        .split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(format_segment)
        .collect()
}

fn format_segment(segment: &str) -> Option<String> {
    if segment.split_whitespace().count() < 2 {
        return None;
    }

    let parsed = parse_segment(segment);
    let first = parsed.periods.iter().copied().min()?;
    let last = parsed.periods.iter().copied().max()?;
    let day = weekday_char(parsed.weekday)?;

    let range = if first == last {
        format!("{} 節", PeriodClock::label(first))
    } else {
        format!(
            "{} ~ {} 節",
            PeriodClock::label(first),
            PeriodClock::label(last)
        )
    };

    Some(format!(
        "週{} {}（{} ~ {}）",
        day,
        range,
        PeriodClock::start_of_period(first).format("%H:%M"),
        PeriodClock::end_of_period(last).format("%H:%M"),
    ))
}
