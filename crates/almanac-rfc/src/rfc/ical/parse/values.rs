//! Value type parsers for iCalendar (RFC 5545 §3.3).

use std::str::FromStr;

use chrono::{FixedOffset, NaiveDate, NaiveTime};

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::{
    ContentLine, DateTime, DateTimeForm, Duration, Frequency, RRule, RRuleUntil, Weekday,
};

/// Parses an all-digit field, rejecting signs and whitespace.
fn digits<T: FromStr>(s: &str, kind: ParseErrorKind, line: usize) -> ParseResult<T> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::new(kind, line).with_context(s.to_string()));
    }
    s.parse()
        .ok()
        .ok_or_else(|| ParseError::new(kind, line).with_context(s.to_string()))
}

/// Parses a DATE value (RFC 5545 §3.3.4).
///
/// Format: YYYYMMDD (e.g., "19970714")
///
/// ## Errors
/// Returns an error if the string is not a valid 8-digit calendar date.
pub fn parse_date(s: &str, line: usize) -> ParseResult<NaiveDate> {
    if s.len() != 8 || !s.is_ascii() {
        return Err(ParseError::new(ParseErrorKind::InvalidDate, line).with_context(s.to_string()));
    }

    let year = digits(&s[0..4], ParseErrorKind::InvalidDate, line)?;
    let month = digits(&s[4..6], ParseErrorKind::InvalidDate, line)?;
    let day = digits(&s[6..8], ParseErrorKind::InvalidDate, line)?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidDate, line).with_context(s.to_string()))
}

/// Parses a TIME value (RFC 5545 §3.3.12).
///
/// Format: HHMMSS[Z] (e.g., "133000", "133000Z"). Returns the time and
/// whether it carried the UTC designator. A leap second (60) reads as 59.
///
/// ## Errors
/// Returns an error if the string is not a valid 6-digit time.
pub fn parse_time(s: &str, line: usize) -> ParseResult<(NaiveTime, bool)> {
    let (time_str, is_utc) = match s.strip_suffix('Z') {
        Some(stripped) => (stripped, true),
        None => (s, false),
    };

    if time_str.len() != 6 || !time_str.is_ascii() {
        return Err(ParseError::new(ParseErrorKind::InvalidTime, line).with_context(s.to_string()));
    }

    let hour = digits(&time_str[0..2], ParseErrorKind::InvalidTime, line)?;
    let minute = digits(&time_str[2..4], ParseErrorKind::InvalidTime, line)?;
    let second: u32 = digits(&time_str[4..6], ParseErrorKind::InvalidTime, line)?;

    if second > 60 {
        return Err(ParseError::new(ParseErrorKind::InvalidTime, line).with_context(s.to_string()));
    }

    let time = NaiveTime::from_hms_opt(hour, minute, second.min(59))
        .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidTime, line).with_context(s.to_string()))?;
    Ok((time, is_utc))
}

/// Parses a DATE-TIME value (RFC 5545 §3.3.5).
///
/// Format: YYYYMMDD"T"HHMMSS[Z] (e.g., "19970714T133000Z")
///
/// Note: TZID is handled at the property level, not in the value itself.
/// A UTC value ignores any TZID.
///
/// ## Errors
/// Returns an error if the string is not a valid datetime format.
pub fn parse_datetime(s: &str, tzid: Option<&str>, line: usize) -> ParseResult<DateTime> {
    let (date_str, time_str) = s.split_once('T').ok_or_else(|| {
        ParseError::new(ParseErrorKind::InvalidDateTime, line).with_context(s.to_string())
    })?;

    let date = parse_date(date_str, line)?;
    let (time, is_utc) = parse_time(time_str, line)?;

    let form = match (is_utc, tzid) {
        (true, _) => DateTimeForm::Utc,
        (false, Some(tz)) => DateTimeForm::Zoned {
            tzid: tz.to_string(),
        },
        (false, None) => DateTimeForm::Floating,
    };

    Ok(DateTime {
        date,
        time: Some(time),
        form,
    })
}

/// Parses a DATE or DATE-TIME property such as `DTSTART`.
///
/// The value is a DATE when `VALUE=DATE` is given or it has no time part;
/// the `TZID` parameter, if any, is attached.
///
/// ## Errors
/// Returns an error if the value does not parse as the selected type.
pub fn parse_date_or_datetime(prop: &ContentLine, line: usize) -> ParseResult<DateTime> {
    let is_date = prop
        .value_type()
        .map_or(!prop.value.contains('T'), |v| v.eq_ignore_ascii_case("DATE"));

    if is_date {
        let date = DateTime::date(parse_date(&prop.value, line)?);
        return Ok(match prop.tzid() {
            Some(tzid) => date.in_zone(tzid),
            None => date,
        });
    }

    parse_datetime(&prop.value, prop.tzid(), line)
}

/// Parses a UTC-OFFSET value (RFC 5545 §3.3.14).
///
/// Format: (+|-)HHMM[SS] (e.g., "+0530", "-0800")
///
/// ## Errors
/// Returns an error if the string is not a valid UTC offset format.
pub fn parse_utc_offset(s: &str, line: usize) -> ParseResult<FixedOffset> {
    let invalid = || ParseError::new(ParseErrorKind::InvalidUtcOffset, line).with_context(s.to_string());

    let (sign, rest) = match s.split_at_checked(1) {
        Some(("+", rest)) => (1, rest),
        Some(("-", rest)) => (-1, rest),
        _ => return Err(invalid()),
    };
    if !rest.is_ascii() || (rest.len() != 4 && rest.len() != 6) {
        return Err(invalid());
    }

    let hours: i32 = digits(&rest[0..2], ParseErrorKind::InvalidUtcOffset, line)?;
    let minutes: i32 = digits(&rest[2..4], ParseErrorKind::InvalidUtcOffset, line)?;
    let seconds: i32 = match rest.get(4..6) {
        Some(sec) => digits(sec, ParseErrorKind::InvalidUtcOffset, line)?,
        None => 0,
    };

    if hours > 23 || minutes > 59 || seconds > 59 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60 + seconds)).ok_or_else(invalid)
}

/// Parses a DURATION value (RFC 5545 §3.3.6).
///
/// Format: [+|-]P[nW] or [+|-]P[nD][T[nH][nM][nS]]
///
/// ## Errors
/// Returns an error if the string is not a valid duration format.
pub fn parse_duration(s: &str, line: usize) -> ParseResult<Duration> {
    if let Some(rest) = s.strip_prefix('-') {
        return parse_unsigned_duration(rest, s, line).map(Duration::negate);
    }
    parse_unsigned_duration(s.strip_prefix('+').unwrap_or(s), s, line)
}

/// Parses a duration without its sign; `s` is the full value for errors.
fn parse_unsigned_duration(unsigned: &str, s: &str, line: usize) -> ParseResult<Duration> {
    let invalid = || ParseError::new(ParseErrorKind::InvalidDuration, line).with_context(s.to_string());
    let mut dur = Duration::zero();
    let body = unsigned.strip_prefix('P').ok_or_else(invalid)?;

    if let Some(weeks) = body.strip_suffix('W') {
        dur.weeks = digits(weeks, ParseErrorKind::InvalidDuration, line)?;
        return Ok(dur);
    }

    let (date_part, time_part) = match body.split_once('T') {
        Some((date, time)) if !time.is_empty() => (date, Some(time)),
        Some(_) => return Err(invalid()),
        None => (body, None),
    };

    if !date_part.is_empty() {
        let days = date_part.strip_suffix('D').ok_or_else(invalid)?;
        dur.days = digits(days, ParseErrorKind::InvalidDuration, line)?;
    } else if time_part.is_none() {
        return Err(invalid());
    }

    if let Some(time) = time_part {
        parse_duration_time(time, &mut dur, line).map_err(|e| e.with_context(s.to_string()))?;
    }

    Ok(dur)
}

/// Parses the `nH nM nS` designators after `T`, in that order.
fn parse_duration_time(time: &str, dur: &mut Duration, line: usize) -> ParseResult<()> {
    let mut rest = time;
    let mut last_unit = 0;

    while !rest.is_empty() {
        let unit_pos = rest
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidDuration, line))?;
        let (num, tail) = rest.split_at(unit_pos);
        let value = digits(num, ParseErrorKind::InvalidDuration, line)?;

        let (unit, order) = match tail.as_bytes()[0] {
            b'H' => (&mut dur.hours, 1),
            b'M' => (&mut dur.minutes, 2),
            b'S' => (&mut dur.seconds, 3),
            _ => return Err(ParseError::new(ParseErrorKind::InvalidDuration, line)),
        };
        if order <= last_unit {
            return Err(ParseError::new(ParseErrorKind::InvalidDuration, line));
        }

        *unit = value;
        last_unit = order;
        rest = &tail[1..];
    }
    Ok(())
}

/// Parses a RECUR (RRULE) value (RFC 5545 §3.3.10).
///
/// Only the parts the expander implements are accepted: `FREQ`,
/// `INTERVAL`, `COUNT`, `UNTIL`, `WKST`, plain-weekday `BYDAY` with
/// `FREQ=WEEKLY`, `BYMONTHDAY` with `FREQ=MONTHLY` and `BYMONTH` with
/// `FREQ=YEARLY`.
///
/// ## Errors
/// - [`ParseErrorKind::InvalidRRule`] for malformed or unknown parts
/// - [`ParseErrorKind::UntilCountConflict`] if both bounds are present
/// - [`ParseErrorKind::UnsupportedRRule`] for valid parts the expander cannot honor
pub fn parse_rrule(s: &str, line: usize) -> ParseResult<RRule> {
    let mut parts = RRuleParts::default();

    for part in s.split(';').filter(|p| !p.is_empty()) {
        let (key, value) = part.split_once('=').ok_or_else(|| {
            ParseError::new(ParseErrorKind::InvalidRRule, line).with_context(part.to_string())
        })?;
        parts.apply(&key.to_ascii_uppercase(), value, line)?;
    }

    parts.finish(s, line)
}

/// Rule parts as they are read, before cross-part validation.
#[derive(Default)]
struct RRuleParts {
    freq: Option<Frequency>,
    interval: Option<u32>,
    until: Option<RRuleUntil>,
    count: Option<u32>,
    wkst: Option<Weekday>,
    by_day: Option<Vec<Weekday>>,
    by_monthday: Option<Vec<i8>>,
    by_month: Option<Vec<u8>>,
}

impl RRuleParts {
    fn apply(&mut self, key: &str, value: &str, line: usize) -> ParseResult<()> {
        let invalid = || {
            ParseError::new(ParseErrorKind::InvalidRRule, line).with_context(format!("{key}={value}"))
        };

        match key {
            "FREQ" => set_once(&mut self.freq, parse_frequency(value, line)?, key, line),
            "INTERVAL" => {
                let interval = digits(value, ParseErrorKind::InvalidRRule, line)?;
                if interval == 0 {
                    return Err(invalid());
                }
                set_once(&mut self.interval, interval, key, line)
            }
            "COUNT" => {
                let count = digits(value, ParseErrorKind::InvalidRRule, line)?;
                if count == 0 {
                    return Err(invalid());
                }
                set_once(&mut self.count, count, key, line)
            }
            "UNTIL" => {
                let until = if value.contains('T') {
                    RRuleUntil::DateTime(parse_datetime(value, None, line)?)
                } else {
                    RRuleUntil::Date(parse_date(value, line)?)
                };
                set_once(&mut self.until, until, key, line)
            }
            "WKST" => {
                let wkst = Weekday::parse(value).ok_or_else(|| {
                    ParseError::new(ParseErrorKind::InvalidWeekday, line).with_context(value.to_string())
                })?;
                set_once(&mut self.wkst, wkst, key, line)
            }
            "BYDAY" => {
                let days = split_list(value, line, |v| parse_plain_weekday(v, line))?;
                set_once(&mut self.by_day, days, key, line)
            }
            "BYMONTHDAY" => {
                let days = split_list(value, line, |v| {
                    let day: i8 = v.parse().ok().ok_or_else(invalid)?;
                    if day == 0 || !(-31..=31).contains(&day) {
                        return Err(invalid());
                    }
                    Ok(day)
                })?;
                set_once(&mut self.by_monthday, days, key, line)
            }
            "BYMONTH" => {
                let months = split_list(value, line, |v| {
                    let month: u8 = digits(v, ParseErrorKind::InvalidRRule, line)?;
                    if !(1..=12).contains(&month) {
                        return Err(invalid());
                    }
                    Ok(month)
                })?;
                set_once(&mut self.by_month, months, key, line)
            }
            "BYSECOND" | "BYMINUTE" | "BYHOUR" | "BYYEARDAY" | "BYWEEKNO" | "BYSETPOS"
            | "RSCALE" | "SKIP" => Err(ParseError::new(ParseErrorKind::UnsupportedRRule, line)
                .with_context(format!("{key}={value}"))),
            _ => Err(invalid()),
        }
    }

    fn finish(self, s: &str, line: usize) -> ParseResult<RRule> {
        let freq = self.freq.ok_or_else(|| {
            ParseError::new(ParseErrorKind::InvalidRRule, line).with_context(format!("missing FREQ in {s}"))
        })?;

        if self.count.is_some() && self.until.is_some() {
            return Err(ParseError::new(ParseErrorKind::UntilCountConflict, line)
                .with_context(s.to_string()));
        }

        let unsupported = |part: &str| {
            ParseError::new(ParseErrorKind::UnsupportedRRule, line)
                .with_context(format!("{part} with FREQ={freq}"))
        };
        if self.by_day.is_some() && freq != Frequency::Weekly {
            return Err(unsupported("BYDAY"));
        }
        if self.by_monthday.is_some() && freq != Frequency::Monthly {
            return Err(unsupported("BYMONTHDAY"));
        }
        if self.by_month.is_some() && freq != Frequency::Yearly {
            return Err(unsupported("BYMONTH"));
        }

        let mut rule = RRule::new(freq)
            .with_interval(self.interval.unwrap_or(1))
            .with_by_day(self.by_day.unwrap_or_default())
            .with_by_monthday(self.by_monthday.unwrap_or_default())
            .with_by_month(self.by_month.unwrap_or_default());
        if let Some(count) = self.count {
            rule = rule.with_count(count);
        }
        if let Some(until) = self.until {
            rule = rule.with_until(until);
        }
        rule.wkst = self.wkst;
        Ok(rule)
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T, key: &str, line: usize) -> ParseResult<()> {
    if slot.is_some() {
        return Err(ParseError::new(ParseErrorKind::InvalidRRule, line)
            .with_context(format!("{key} given more than once")));
    }
    *slot = Some(value);
    Ok(())
}

fn split_list<T>(
    s: &str,
    line: usize,
    parse: impl Fn(&str) -> ParseResult<T>,
) -> ParseResult<Vec<T>> {
    if s.is_empty() {
        return Err(ParseError::new(ParseErrorKind::InvalidRRule, line).with_context("empty list"));
    }
    s.split(',').map(|v| parse(v.trim())).collect()
}

fn parse_frequency(s: &str, line: usize) -> ParseResult<Frequency> {
    Frequency::parse(s).ok_or_else(|| {
        ParseError::new(ParseErrorKind::InvalidFrequency, line).with_context(s.to_string())
    })
}

/// Parses a BYDAY entry; `1MO` style ordinals are valid but unsupported.
fn parse_plain_weekday(s: &str, line: usize) -> ParseResult<Weekday> {
    if let Some(weekday) = Weekday::parse(s) {
        return Ok(weekday);
    }

    let split = s.len().saturating_sub(2);
    let ordinal = s.get(..split).unwrap_or_default().trim_start_matches(['+', '-']);
    let has_ordinal = !ordinal.is_empty() && ordinal.bytes().all(|b| b.is_ascii_digit());
    if has_ordinal && s.get(split..).and_then(Weekday::parse).is_some() {
        return Err(ParseError::new(ParseErrorKind::UnsupportedRRule, line)
            .with_context(format!("BYDAY={s}")));
    }

    Err(ParseError::new(ParseErrorKind::InvalidWeekday, line).with_context(s.to_string()))
}

/// Unescapes text values (RFC 5545 §3.3.11).
///
/// Escape sequences: \\ \, \; \n \N
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n' | 'N') => result.push('\n'),
                Some(',') => result.push(','),
                Some(';') => result.push(';'),
                Some('\\') | None => result.push('\\'),
                Some(other) => {
                    // Invalid escape, preserve as-is
                    result.push('\\');
                    result.push(other);
                }
            }
        } else {
            result.push(c);
        }
    }

    result
}
