use almanac_test::{calendar_text, labels, load, utc_date};

fn expand(start: &str, rule: &str) -> Vec<String> {
    let cal = load(&calendar_text(&[&format!(
        "BEGIN:VEVENT\nUID:r\nDTSTART:{start}\nRRULE:{rule}\nEND:VEVENT"
    )]))
    .unwrap();
    labels(cal.iter(None, None).unwrap())
}

#[test_log::test]
fn count_and_until_bound_the_series() {
    assert_eq!(expand("20240101T100000Z", "FREQ=DAILY;INTERVAL=2;COUNT=3").len(), 3);

    assert_eq!(
        expand("20240101T100000Z", "FREQ=WEEKLY;UNTIL=20240115T100000Z"),
        vec![
            "r@2024-01-01T10:00+00:00",
            "r@2024-01-08T10:00+00:00",
            "r@2024-01-15T10:00+00:00",
        ]
    );
}

#[test]
fn byday_with_week_start() {
    // 2024-01-07 is a Sunday; with WKST=SU it opens its own week.
    assert_eq!(
        expand("20240107T120000Z", "FREQ=WEEKLY;INTERVAL=2;WKST=SU;BYDAY=SU,SA;COUNT=4"),
        vec![
            "r@2024-01-07T12:00+00:00",
            "r@2024-01-13T12:00+00:00",
            "r@2024-01-21T12:00+00:00",
            "r@2024-01-27T12:00+00:00",
        ]
    );
}

#[test]
fn bymonthday_and_bymonth() {
    assert_eq!(
        expand("20240115T080000Z", "FREQ=MONTHLY;BYMONTHDAY=15,-1;COUNT=4"),
        vec![
            "r@2024-01-15T08:00+00:00",
            "r@2024-01-31T08:00+00:00",
            "r@2024-02-15T08:00+00:00",
            "r@2024-02-29T08:00+00:00",
        ]
    );

    assert_eq!(
        expand("20240601T080000Z", "FREQ=YEARLY;BYMONTH=1,6;COUNT=3"),
        vec![
            "r@2024-06-01T08:00+00:00",
            "r@2025-01-01T08:00+00:00",
            "r@2025-06-01T08:00+00:00",
        ]
    );
}

#[test]
fn nonexistent_dates_are_skipped() {
    assert_eq!(
        expand("20240229T000000Z", "FREQ=YEARLY;COUNT=2"),
        vec!["r@2024-02-29T00:00+00:00", "r@2028-02-29T00:00+00:00"]
    );
    assert_eq!(
        expand("20240131T000000Z", "FREQ=MONTHLY;COUNT=3"),
        vec![
            "r@2024-01-31T00:00+00:00",
            "r@2024-03-31T00:00+00:00",
            "r@2024-05-31T00:00+00:00",
        ]
    );
}

#[test]
fn unbounded_rule_in_distant_window() {
    let cal = load(&calendar_text(&[
        "BEGIN:VEVENT\nUID:r\nDTSTART:20000101T060000Z\nRRULE:FREQ=HOURLY;INTERVAL=6\nEND:VEVENT",
    ]))
    .unwrap();

    let starts = labels(cal.iter(Some(utc_date(2040, 3, 1)), Some(utc_date(2040, 3, 2))).unwrap());
    assert_eq!(
        starts,
        vec![
            "r@2040-03-01T00:00+00:00",
            "r@2040-03-01T06:00+00:00",
            "r@2040-03-01T12:00+00:00",
            "r@2040-03-01T18:00+00:00",
        ]
    );
}

#[test]
fn all_day_series() {
    let cal = load(&calendar_text(&[
        "BEGIN:VEVENT\nUID:holiday\nDTSTART;VALUE=DATE:20241225\nRRULE:FREQ=YEARLY;COUNT=2\nEND:VEVENT",
    ]))
    .unwrap();

    let occurrences: Vec<_> = cal.iter(None, None).unwrap().collect();
    assert_eq!(occurrences.len(), 2);
    assert_eq!(occurrences[1].start.to_rfc3339(), "2025-12-25T00:00:00+00:00");
    assert_eq!(occurrences[1].end().to_rfc3339(), "2025-12-26T00:00:00+00:00");
}
