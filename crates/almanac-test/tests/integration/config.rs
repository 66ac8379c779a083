use almanac_core::config::Settings;
use almanac_core::error::CoreError;
use almanac_test::{calendar_text, labels, load};

#[test_log::test]
fn configured_window_drives_iteration() -> anyhow::Result<()> {
    let settings = Settings::from_toml(
        r#"
[window]
begin = "2024-03-02T00:00:00Z"
end = "2024-03-04T00:00:00Z"
"#,
    )?;
    let (begin, end) = settings.window.bounds()?;

    let cal = load(&calendar_text(&[
        "BEGIN:VEVENT\nUID:w\nDTSTART:20240301T120000Z\nRRULE:FREQ=DAILY\nEND:VEVENT",
    ]))?;
    assert_eq!(
        labels(cal.iter(begin, end)?),
        vec!["w@2024-03-02T12:00+00:00", "w@2024-03-03T12:00+00:00"]
    );
    Ok(())
}

#[test]
fn inverted_configured_window_is_rejected() {
    let settings = Settings::from_toml(
        r#"
[window]
begin = "2024-03-04T00:00:00Z"
end = "2024-03-02T00:00:00Z"
"#,
    )
    .unwrap();
    assert!(matches!(settings.window.bounds(), Err(CoreError::ValidationError(_))));
}
