use chrono::{Datelike, Duration, NaiveDate};
use course2cal::calendar::{CalendarPayload, OccurrenceEngine, SemesterConfig};
use course2cal::schedule::{group_sessions, parse_courses, set_group_selected};

/// Shaped like a copy of the "selected courses" page, including a header
/// line above the first course.
const PORTAL_TEXT: &str = "\
選課結果
微積分甲上
王小明
一 1,2 / 三 5,6
新生教學館101
10001
MATH4006
4 學分
必修
138 人
限本系所學生
第二週起上課
已選上
普通物理學甲上
李大華
五 A,B,C,D
博理館201
20002
PHYS1001
3.0 學分
選修
60 人
已選上
體育：羽球
張教練
四 8,9
綜合體育館
30003
PE1010
0 學分
30 人
自備球拍
已選上
";

fn semester() -> SemesterConfig {
    // Tuesday
    SemesterConfig::starting(NaiveDate::from_ymd_opt(2025, 9, 2).unwrap())
}

#[test]
fn test_portal_text_to_sessions() {
    let sessions = parse_courses(PORTAL_TEXT);
    assert_eq!(sessions.len(), 4);

    let names: Vec<&str> = sessions.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["微積分甲上", "微積分甲上", "普通物理學甲上", "體育：羽球"]);

    let pe = &sessions[3];
    assert_eq!(pe.credits, Some(0));
    assert_eq!(pe.notes, "自備球拍");
    assert_eq!(pe.weekday, 5);
}

#[test]
fn test_groups_and_selection() {
    let mut sessions = parse_courses(PORTAL_TEXT);
    let groups = group_sessions(&sessions);
    assert_eq!(groups.len(), 3);
    assert_eq!(groups[0].time_lines.len(), 2);

    set_group_selected(&mut sessions, &groups[0].id, false);
    let batch = OccurrenceEngine::build_events(&sessions, &semester());
    assert_eq!(batch.events.len(), 2);
    assert!(batch.skipped.is_empty());
}

#[test]
fn test_events_follow_semester_rules() {
    let sessions = parse_courses(PORTAL_TEXT);
    let config = semester();
    let batch = OccurrenceEngine::build_events(&sessions, &config);
    assert_eq!(batch.events.len(), sessions.len());

    for (session, event) in sessions.iter().zip(&batch.events) {
        let start = event.start.instant;
        assert!(start.date() >= config.start_date);
        assert!(start.date() - config.start_date < Duration::days(7));
        assert_eq!(start.date().weekday().number_from_sunday(), u32::from(session.weekday));
        assert_eq!(
            event.end.instant - start,
            Duration::minutes(50 * session.periods.len() as i64)
        );
        assert_eq!(event.recurrence.to_string(), "FREQ=WEEKLY;COUNT=16");
    }

    // Monday calculus wraps to the following week
    assert_eq!(batch.events[0].start.instant.date(), NaiveDate::from_ymd_opt(2025, 9, 8).unwrap());
}

#[test]
fn test_payloads_for_remote_calendar() {
    let sessions = parse_courses(PORTAL_TEXT);
    let batch = OccurrenceEngine::build_events(&sessions, &semester().with_reminder(0));
    let payload = CalendarPayload::from(&batch.events[2]);

    assert_eq!(payload.summary, "普通物理學甲上");
    assert_eq!(payload.start.date_time, "2025-09-05T18:25:00");
    assert_eq!(payload.end.date_time, "2025-09-05T21:45:00");
    assert_eq!(payload.recurrence, vec!["RRULE:FREQ=WEEKLY;COUNT=16".to_string()]);
    assert!(payload.reminders.is_none());
}
