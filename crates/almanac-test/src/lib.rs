//! Almanac calendar pipeline - integration test support.
//!
//! Re-exports the workspace crates so integration tests can use
//! `almanac_test::` paths, plus a few shared helpers.

pub use almanac_rfc::{RfcError, RfcResult};
pub use almanac_rfc::rfc::ical;

use almanac_rfc::rfc::ical::{Calendar, Occurrence, ParseResult};
use chrono::{DateTime, TimeZone, Utc};

/// Loads a calendar from in-memory text.
///
/// ## Errors
/// Returns any load error unchanged.
pub fn load(text: &str) -> ParseResult<Calendar> {
    Calendar::load(text.as_bytes())
}

/// Midnight UTC on the given date.
///
/// ## Panics
/// Panics if the date does not exist.
#[must_use]
#[expect(clippy::unwrap_used, reason = "test helper with literal dates")]
pub fn utc_date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

/// Wraps VEVENT/VTIMEZONE bodies in a VCALENDAR with CRLF line endings.
#[must_use]
pub fn calendar_text(blocks: &[&str]) -> String {
    let mut out = String::from("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//almanac//test//EN\r\n");
    for block in blocks {
        for line in block.lines().map(str::trim).filter(|l| !l.is_empty()) {
            out.push_str(line);
            out.push_str("\r\n");
        }
    }
    out.push_str("END:VCALENDAR\r\n");
    out
}

/// Renders occurrences as `uid@start` for compact assertions.
#[must_use]
pub fn labels(occurrences: impl IntoIterator<Item = Occurrence>) -> Vec<String> {
    occurrences
        .into_iter()
        .map(|o| format!("{}@{}", o.uid, o.start.format("%Y-%m-%dT%H:%M%:z")))
        .collect()
}
