//! NTU class-period clock.
//!
//! Periods 0-10 are the daytime lecture slots, 11-14 are the evening slots
//! printed as `A`-`D` on the course portal. The slot boundaries are not an
//! arithmetic progression (the breaks after periods 2 and 7 are twice as long), so
//! they are kept as a literal table.

use chrono::NaiveTime;
use serde::Serialize;

/// Highest valid period index (`D`).
pub const MAX_PERIOD: u8 = 14;

/// Length of one period when computing event durations.
pub const PERIOD_MINUTES: i64 = 50;

/// Evening period letters, in order, starting at period 11.
const EVENING_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

/// (start, end) as (hour, minute) pairs, indexed by period.
const PERIOD_TABLE: [((u32, u32), (u32, u32)); 15] = [
    ((7, 10), (8, 0)),
    ((8, 10), (9, 0)),
    ((9, 10), (10, 0)),
    ((10, 20), (11, 10)),
    ((11, 20), (12, 10)),
    ((12, 20), (13, 10)),
    ((13, 20), (14, 10)),
    ((14, 20), (15, 10)),
    ((15, 30), (16, 20)),
    ((16, 30), (17, 20)),
    ((17, 30), (18, 20)),
    ((18, 25), (19, 15)), // A
    ((19, 20), (20, 10)), // B
    ((20, 15), (21, 5)),  // C
    ((21, 10), (22, 0)),  // D
];

/// One row of the period table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodSlot {
    pub period: u8,
    pub label: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Static period-to-clock lookup.
pub struct PeriodClock;

impl PeriodClock {
    /// Returns the slot for `period`, or `None` when it is outside `0..=14`.
    pub fn slot(period: u8) -> Option<PeriodSlot> {
        let ((sh, sm), (eh, em)) = *PERIOD_TABLE.get(usize::from(period))?;
        Some(PeriodSlot {
            period,
            label: Self::label(period),
            start: NaiveTime::from_hms_opt(sh, sm, 0)?,
            end: NaiveTime::from_hms_opt(eh, em, 0)?,
        })
    }

    /// Start of `period`. Out-of-range periods yield midnight, so callers
    /// that care must check [`PeriodClock::is_valid`] first.
    pub fn start_of_period(period: u8) -> NaiveTime {
        Self::slot(period).map_or(NaiveTime::MIN, |s| s.start)
    }

    /// End of `period`, midnight when out of range.
    pub fn end_of_period(period: u8) -> NaiveTime {
        Self::slot(period).map_or(NaiveTime::MIN, |s| s.end)
    }

    pub fn is_valid(period: u8) -> bool {
        period <= MAX_PERIOD
    }

    /// Display label: `"A"`-`"D"` for 11-14, the number otherwise.
    pub fn label(period: u8) -> String {
        match period {
            11..=14 => EVENING_LETTERS[usize::from(period - 11)].to_string(),
            p => p.to_string(),
        }
    }

    /// Maps an evening letter back to its index.
    pub fn from_letter(token: &str) -> Option<u8> {
        let mut chars = token.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        EVENING_LETTERS
            .iter()
            .position(|&l| l == c)
            .and_then(|i| u8::try_from(i).ok())
            .map(|i| i + 11)
    }

    /// The whole table, in period order.
    pub fn table() -> Vec<PeriodSlot> {
        (0..=MAX_PERIOD).filter_map(Self::slot).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_day_and_evening_bounds() {
        assert_eq!(PeriodClock::start_of_period(0), hm(7, 10));
        assert_eq!(PeriodClock::end_of_period(10), hm(18, 20));
        assert_eq!(PeriodClock::start_of_period(11), hm(18, 25));
        assert_eq!(PeriodClock::end_of_period(14), hm(22, 0));
    }

    #[test]
    fn test_irregular_breaks() {
        // 20-minute breaks before periods 3 and 8
        assert_eq!(PeriodClock::end_of_period(2), hm(10, 0));
        assert_eq!(PeriodClock::start_of_period(3), hm(10, 20));
        assert_eq!(PeriodClock::end_of_period(7), hm(15, 10));
        assert_eq!(PeriodClock::start_of_period(8), hm(15, 30));
    }

    #[test]
    fn test_out_of_range_is_midnight() {
        assert_eq!(PeriodClock::start_of_period(15), NaiveTime::MIN);
        assert_eq!(PeriodClock::end_of_period(99), NaiveTime::MIN);
        assert!(PeriodClock::slot(15).is_none());
        assert!(!PeriodClock::is_valid(15));
    }

    #[test]
    fn test_labels() {
        assert_eq!(PeriodClock::label(3), "3");
        assert_eq!(PeriodClock::label(10), "10");
        assert_eq!(PeriodClock::label(11), "A");
        assert_eq!(PeriodClock::label(14), "D");
    }

    #[test]
    fn test_from_letter() {
        assert_eq!(PeriodClock::from_letter("A"), Some(11));
        assert_eq!(PeriodClock::from_letter("D"), Some(14));
        assert_eq!(PeriodClock::from_letter("E"), None);
        assert_eq!(PeriodClock::from_letter("AB"), None);
        assert_eq!(PeriodClock::from_letter("a"), None);
    }

    #[test]
    fn test_table_is_complete() {
        let table = PeriodClock::table();
        assert_eq!(table.len(), 15);
        assert!(table.windows(2).all(|w| w[0].end <= w[1].start));
    }
}
