//! Parsing of a single `weekday periods` segment such as `一 1,2` or `五 A,B,C,D`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::period::PeriodClock;
use super::types::{MONDAY, WEEKDAY_CHARS};

/// What to do with a period sub-token that is neither a number nor `A`-`D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownPeriodPolicy {
    /// Skip the token, keep its siblings.
    #[default]
    Drop,
    /// Treat the whole segment as unusable.
    DiscardSegment,
}

/// Fallbacks applied to malformed segments.
///
/// Pasted text is noisy, so the defaults degrade instead of rejecting:
/// a segment without a weekday character is assumed to be on Monday, and
/// unrecognised period tokens are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsePolicy {
    /// Weekday used when the segment has no weekday character. `None`
    /// discards such segments instead.
    pub default_weekday: Option<u8>,
    pub unknown_period: UnknownPeriodPolicy,
}

impl Default for ParsePolicy {
    fn default() -> Self {
        Self {
            default_weekday: Some(MONDAY),
            unknown_period: UnknownPeriodPolicy::Drop,
        }
    }
}

/// Result of parsing one segment. `periods` keeps the order the tokens
/// appeared in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSegment {
    pub weekday: u8,
    pub periods: Vec<u8>,
}

/// Parses a trimmed segment with the default policy.
///
/// Never fails: an unusable segment comes back with an empty period list.
pub fn parse_segment(segment: &str) -> TimeSegment {
    parse_segment_with(segment, &ParsePolicy::default())
}

/// Parses a trimmed segment with an explicit fallback policy.
pub fn parse_segment_with(segment: &str, policy: &ParsePolicy) -> TimeSegment {
    let weekday = match detect_weekday(segment).or(policy.default_weekday) {
        Some(w) => w,
        None => {
            debug!(segment, "no weekday in segment, discarding");
            return TimeSegment {
                weekday: 0,
                periods: Vec::new(),
            };
        }
    };

    let Some(token) = segment.split_whitespace().last() else {
        return TimeSegment {
            weekday,
            periods: Vec::new(),
        };
    };

    let mut periods = Vec::new();
    for raw in token.split(',') {
        let sub = raw.trim();
        match parse_period_token(sub) {
            Some(p) => periods.push(p),
            None => match policy.unknown_period {
                UnknownPeriodPolicy::Drop => {
                    debug!(token = sub, segment, "dropping unrecognised period token");
                }
                UnknownPeriodPolicy::DiscardSegment => {
                    debug!(token = sub, segment, "unrecognised period token, discarding segment");
                    periods.clear();
                    break;
                }
            },
        }
    }

    TimeSegment { weekday, periods }
}

/// Finds the weekday by checking characters in `日一二三四五六` order; the
/// first character of that list present anywhere in the segment wins.
fn detect_weekday(segment: &str) -> Option<u8> {
    WEEKDAY_CHARS
        .iter()
        .position(|c| segment.contains(*c))
        .and_then(|i| u8::try_from(i + 1).ok())
}

fn parse_period_token(token: &str) -> Option<u8> {
    token
        .parse::<u8>()
        .ok()
        .or_else(|| PeriodClock::from_letter(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monday_day_periods() {
        let seg = parse_segment("一 1,2");
        assert_eq!(seg.weekday, 2);
        assert_eq!(seg.periods, vec![1, 2]);
    }

    #[test]
    fn test_evening_letters() {
        let seg = parse_segment("五 A,B,C,D");
        assert_eq!(seg.weekday, 6);
        assert_eq!(seg.periods, vec![11, 12, 13, 14]);
    }

    #[test]
    fn test_sunday() {
        let seg = parse_segment("日 3");
        assert_eq!(seg.weekday, 1);
        assert_eq!(seg.periods, vec![3]);
    }

    #[test]
    fn test_encounter_order_is_kept() {
        let seg = parse_segment("三 7,5,6");
        assert_eq!(seg.periods, vec![7, 5, 6]);
    }

    #[test]
    fn test_unknown_tokens_dropped_siblings_kept() {
        let seg = parse_segment("二 1,X,3,");
        assert_eq!(seg.weekday, 3);
        assert_eq!(seg.periods, vec![1, 3]);
    }

    #[test]
    fn test_missing_weekday_defaults_to_monday() {
        let seg = parse_segment("8,9");
        assert_eq!(seg.weekday, MONDAY);
        assert_eq!(seg.periods, vec![8, 9]);
    }

    #[test]
    fn test_weekday_list_order_wins() {
        // 日 is checked before 三 regardless of position
        let seg = parse_segment("三日 4");
        assert_eq!(seg.weekday, 1);
    }

    #[test]
    fn test_last_whitespace_token_is_used() {
        let seg = parse_segment("四   2  10,A");
        assert_eq!(seg.weekday, 5);
        assert_eq!(seg.periods, vec![10, 11]);
    }

    #[test]
    fn test_policy_without_default_weekday() {
        let policy = ParsePolicy {
            default_weekday: None,
            ..ParsePolicy::default()
        };
        assert!(parse_segment_with("1,2", &policy).periods.is_empty());
        assert_eq!(parse_segment_with("六 1,2", &policy).periods, vec![1, 2]);
    }

    #[test]
    fn test_policy_discard_segment() {
        let policy = ParsePolicy {
            unknown_period: UnknownPeriodPolicy::DiscardSegment,
            ..ParsePolicy::default()
        };
        assert!(parse_segment_with("一 1,?,2", &policy).periods.is_empty());
        assert_eq!(parse_segment_with("一 1,2", &policy).periods, vec![1, 2]);
    }

    #[test]
    fn test_empty_segment() {
        let seg = parse_segment("");
        assert_eq!(seg.weekday, MONDAY);
        assert!(seg.periods.is_empty());
    }
}
