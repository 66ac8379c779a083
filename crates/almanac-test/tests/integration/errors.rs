use almanac_test::RfcError;
use almanac_test::ical::ParseErrorKind;
use almanac_test::{calendar_text, load, utc_date};

fn load_err(text: &str) -> almanac_test::ical::ParseError {
    load(text).unwrap_err()
}

#[test_log::test]
fn missing_root_is_rejected() {
    let err = load_err("BEGIN:VEVENT\r\nUID:x\r\nDTSTART:20240101\r\nEND:VEVENT\r\n");
    assert_eq!(err.kind, ParseErrorKind::MissingRoot);

    let err = load_err("UID:x\r\n");
    assert_eq!(err.kind, ParseErrorKind::ExpectedBegin);

    assert_eq!(load_err("").kind, ParseErrorKind::EmptyStream);
}

#[test]
fn mismatched_block_names_both_sides() {
    let err = load_err(
        "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nUID:x\r\nDTSTART:20240101\r\nEND:VTIMEZONE\r\nEND:VCALENDAR\r\n",
    );
    assert_eq!(err.kind, ParseErrorKind::MismatchedComponent);
    let message = err.to_string();
    assert!(message.contains("VEVENT"), "{message}");
    assert!(message.contains("VTIMEZONE"), "{message}");
}

#[test]
fn truncated_input_is_rejected() {
    let err = load_err("BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nUID:x\r\n");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
}

#[test]
fn unsupported_and_invalid_rules() {
    let event = |rule: &str| {
        calendar_text(&[&format!(
            "BEGIN:VEVENT\nUID:x\nDTSTART:20240101T000000Z\nRRULE:{rule}\nEND:VEVENT"
        )])
    };

    for rule in [
        "FREQ=MONTHLY;BYDAY=1MO",
        "FREQ=DAILY;BYHOUR=9",
        "FREQ=MONTHLY;BYMONTH=2",
        "FREQ=YEARLY;BYSETPOS=1",
    ] {
        assert_eq!(load_err(&event(rule)).kind, ParseErrorKind::UnsupportedRRule, "{rule}");
    }

    assert_eq!(load_err(&event("FREQ=DAILY;FOO=1")).kind, ParseErrorKind::InvalidRRule);
    assert_eq!(load_err(&event("COUNT=3")).kind, ParseErrorKind::InvalidRRule);
    assert_eq!(
        load_err(&event("FREQ=DAILY;COUNT=3;UNTIL=20240105")).kind,
        ParseErrorKind::UntilCountConflict
    );
}

#[test]
fn event_without_uid_aborts_load() {
    let err = load_err(&calendar_text(&["BEGIN:VEVENT\nDTSTART:20240101\nEND:VEVENT"]));
    assert_eq!(err.kind, ParseErrorKind::MissingRequiredProperty);
    assert_eq!(err.line, 4);
}

#[test]
fn duration_past_the_date_range_aborts_load() {
    let err = load_err(&calendar_text(&[
        "BEGIN:VEVENT\nUID:far\nDTSTART:20240101T000000Z\nDURATION:P20000000W\nEND:VEVENT",
    ]));
    assert_eq!(err.kind, ParseErrorKind::InvalidDuration);
    assert_eq!(err.line, 7);
}

#[test]
fn inverted_window() -> anyhow::Result<()> {
    let cal = load(&calendar_text(&[]))?;
    let err = cal.iter(Some(utc_date(2024, 2, 1)), Some(utc_date(2024, 1, 1))).unwrap_err();
    assert!(matches!(err, RfcError::ValueError(_)));
    assert_eq!(err.to_string(), "Value error: Begin and end describe a negative range");
    Ok(())
}
