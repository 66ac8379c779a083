use almanac_test::ical::{Calendar, ParseErrorKind, TzMap};
use almanac_test::{calendar_text, labels, load};

const TOKYO: &str = "
    BEGIN:VTIMEZONE
    TZID:Asia/Tokyo
    BEGIN:STANDARD
    DTSTART:19390101T000000
    TZOFFSETFROM:+0900
    TZOFFSETTO:+0900
    TZNAME:JST
    END:STANDARD
    END:VTIMEZONE
";

#[test_log::test]
fn unknown_tzid_aborts_load() {
    let err = load(&calendar_text(&[
        "BEGIN:VEVENT\nUID:x\nDTSTART;TZID=Asia/Tokyo:20240101T090000\nEND:VEVENT",
    ]))
    .unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnknownTimezone);
    assert_eq!(err.line, 6);
    assert_eq!(err.to_string(), "no matching timezone at line 6: Asia/Tokyo");
}

#[test]
fn timezone_must_precede_its_events() {
    let err = load(&calendar_text(&[
        "BEGIN:VEVENT\nUID:x\nDTSTART;TZID=Asia/Tokyo:20240101T090000\nEND:VEVENT",
        TOKYO,
    ]))
    .unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnknownTimezone);
    assert_eq!(err.line, 6);
}

#[test]
fn timezones_carry_over_between_loads() -> anyhow::Result<()> {
    let first = load(&calendar_text(&[TOKYO]))?;
    assert!(first.events().is_empty());

    let second_text = calendar_text(&[
        "BEGIN:VEVENT\nUID:later\nDTSTART;TZID=Asia/Tokyo:20240101T090000\nEND:VEVENT",
    ]);
    let second = Calendar::load_with(second_text.as_bytes(), first.into_timezones(), |_| true)?;

    assert_eq!(labels(second.iter(None, None)?), vec!["later@2024-01-01T09:00+09:00"]);
    assert!(second.timezones().contains("Asia/Tokyo"));
    Ok(())
}

#[test]
fn floating_times_are_utc() {
    let cal = load(&calendar_text(&["BEGIN:VEVENT\nUID:f\nDTSTART:20240101T090000\nEND:VEVENT"]))
        .unwrap();
    assert_eq!(labels(cal.iter(None, None).unwrap()), vec!["f@2024-01-01T09:00+00:00"]);
}

#[test]
fn daylight_only_zone() {
    let cal_text = calendar_text(&[
        "
        BEGIN:VTIMEZONE
        TZID:Summer
        BEGIN:DAYLIGHT
        TZOFFSETFROM:+0100
        TZOFFSETTO:+0200
        END:DAYLIGHT
        END:VTIMEZONE
        ",
        "BEGIN:VEVENT\nUID:s\nDTSTART;TZID=Summer:20240701T120000\nEND:VEVENT",
    ]);
    let cal = Calendar::load_with(cal_text.as_bytes(), TzMap::new(), |_| true).unwrap();
    assert_eq!(labels(cal.iter(None, None).unwrap()), vec!["s@2024-07-01T12:00+02:00"]);
}
