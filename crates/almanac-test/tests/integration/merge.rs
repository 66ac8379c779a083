use almanac_test::ical::{Calendar, EventIter, Occurrence};
use almanac_test::{calendar_text, labels, load, utc_date};
use chrono::TimeDelta;

const UTC_PLUS_ONE: &str = "
    BEGIN:VTIMEZONE
    TZID:UTC+1
    BEGIN:STANDARD
    DTSTART:19700101T000000
    TZOFFSETFROM:+0100
    TZOFFSETTO:+0100
    END:STANDARD
    END:VTIMEZONE
";

fn scenario() -> Calendar {
    load(&calendar_text(&[
        UTC_PLUS_ONE,
        "
        BEGIN:VEVENT
        UID:a
        DTSTART;TZID=UTC+1:20240101T090000
        DTEND;TZID=UTC+1:20240101T100000
        SUMMARY:Single
        END:VEVENT
        ",
        "
        BEGIN:VEVENT
        UID:b
        DTSTART;TZID=UTC+1:20240101T080000
        DURATION:PT1H
        RRULE:FREQ=DAILY;COUNT=3
        SUMMARY:Daily
        END:VEVENT
        ",
    ]))
    .unwrap()
}

#[test_log::test]
fn two_events_in_fixed_offset_zone() {
    let cal = scenario();
    let iter = cal.iter(Some(utc_date(2024, 1, 1)), Some(utc_date(2024, 1, 3))).unwrap();

    assert_eq!(
        labels(iter),
        vec![
            "b@2024-01-01T08:00+01:00",
            "a@2024-01-01T09:00+01:00",
            "b@2024-01-02T08:00+01:00",
        ]
    );
}

#[test]
fn merged_output_matches_individual_expansions() {
    let cal = scenario();
    let (begin, end) = (Some(utc_date(2023, 12, 1)), Some(utc_date(2024, 2, 1)));

    let merged: Vec<_> = cal.iter(begin, end).unwrap().collect();
    assert!(merged.windows(2).all(|w| w[0].start <= w[1].start));

    let mut individual: Vec<_> = cal
        .events()
        .iter()
        .enumerate()
        .flat_map(|(index, event)| EventIter::new(event, index, begin, end))
        .collect();
    assert_eq!(merged.len(), individual.len());

    let mut sorted = merged.clone();
    let key = |o: &Occurrence| (o.start, o.uid.clone());
    sorted.sort_by_key(key);
    individual.sort_by_key(key);
    assert_eq!(sorted, individual);
}

#[test]
fn window_clips_single_event() {
    let cal = scenario();

    // a starts at 08:00Z; b's first start is 07:00Z.
    let begin = utc_date(2024, 1, 1) + TimeDelta::minutes(481);
    let after = labels(cal.iter(Some(begin), None).unwrap());
    assert!(!after.iter().any(|l| l.starts_with("a@")));

    let end = utc_date(2024, 1, 1) + TimeDelta::hours(9);
    let inside = labels(cal.iter(None, Some(end)).unwrap());
    assert_eq!(inside, vec!["b@2024-01-01T08:00+01:00", "a@2024-01-01T09:00+01:00"]);

    let a: Vec<_> = cal.iter(None, None).unwrap().filter(|o| o.uid.as_ref() == "a").collect();
    assert_eq!(a.len(), 1);
    assert_eq!(a[0].start, cal.events()[0].start());
    assert_eq!(a[0].span, cal.events()[0].span());
}

#[test]
fn current_tracks_advance() {
    let cal = scenario();
    let mut iter = cal.iter(None, None).unwrap();

    assert!(iter.current().is_err());
    let mut seen = Vec::new();
    while iter.advance() {
        seen.push(iter.current().unwrap().uid.to_string());
    }
    assert_eq!(seen, vec!["b", "a", "b", "b"]);
    assert!(iter.current().is_err());
    assert!(!iter.advance());
}

#[test]
fn empty_calendar_yields_nothing() {
    let cal = load("BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n").unwrap();
    assert!(cal.events().is_empty());
    assert_eq!(cal.iter(None, None).unwrap().count(), 0);
}
