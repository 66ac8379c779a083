use std::io::Write;
use std::path::PathBuf;

use almanac_core::config::Settings;
use almanac_rfc::rfc::ical::Calendar;
use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};

/// ## Summary
/// Picks the calendar file: the first argument, else `input.path` from the settings.
///
/// ## Errors
/// Returns an error if neither names a file or extra arguments are given.
pub fn input_path(mut args: impl Iterator<Item = String>, settings: &Settings) -> Result<PathBuf> {
    let path = args.next().or_else(|| settings.input.path.clone());
    if let Some(extra) = args.next() {
        bail!("unexpected argument {extra:?}, usage: almanac [FILE]");
    }
    path.map(PathBuf::from)
        .context("no calendar file given, usage: almanac [FILE] or set input.path")
}

/// ## Summary
/// Writes one line per occurrence in `[begin, end)` and returns how many were written.
///
/// ## Errors
/// Returns an error for an inverted window or a failed write.
pub fn write_occurrences<W: Write>(
    calendar: &Calendar,
    begin: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    out: &mut W,
) -> Result<usize> {
    let mut written = 0;
    for occurrence in calendar.iter(begin, end)? {
        writeln!(out, "{occurrence}")?;
        written += 1;
    }
    Ok(written)
}
