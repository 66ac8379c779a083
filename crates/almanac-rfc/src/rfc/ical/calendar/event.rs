//! VEVENT model resolved against a timezone map.

use std::sync::Arc;

use almanac_core::constants::{DTEND, DTSTAMP, DTSTART, DURATION, RRULE, SUMMARY, UID};
use chrono::{DateTime, FixedOffset, TimeDelta};

use super::entry::{EntryKind, Occurrence};
use crate::rfc::ical::core::{Component, ContentLine, RRule};
use crate::rfc::ical::expand::TzMap;
use crate::rfc::ical::parse::{
    ParseError, ParseErrorKind, ParseResult, parse_date_or_datetime, parse_duration, parse_rrule,
    unescape_text,
};

/// ## Summary
/// A calendar event with its start resolved to an instant.
///
/// Immutable once built; occurrences share its `uid` and `summary`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    kind: EntryKind,
    uid: Arc<str>,
    summary: Arc<str>,
    start: DateTime<FixedOffset>,
    span: TimeDelta,
    all_day: bool,
    stamp: Option<DateTime<FixedOffset>>,
    rrule: Option<RRule>,
}

impl Event {
    /// Creates a non-recurring event.
    #[must_use]
    pub fn new(
        uid: impl Into<Arc<str>>,
        summary: impl Into<Arc<str>>,
        start: DateTime<FixedOffset>,
        span: TimeDelta,
    ) -> Self {
        Self {
            kind: EntryKind::Event,
            uid: uid.into(),
            summary: summary.into(),
            start,
            span,
            all_day: false,
            stamp: None,
            rrule: None,
        }
    }

    #[must_use]
    pub fn with_rrule(mut self, rrule: RRule) -> Self {
        self.rrule = Some(rrule);
        self
    }

    #[must_use]
    pub const fn with_all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    #[must_use]
    pub const fn with_stamp(mut self, stamp: DateTime<FixedOffset>) -> Self {
        self.stamp = Some(stamp);
        self
    }

    /// ## Summary
    /// Builds an event from a VEVENT component.
    ///
    /// DATE-TIME values carrying a `TZID` are resolved through `timezones`;
    /// floating values are read as UTC.
    ///
    /// ## Errors
    /// - [`ParseErrorKind::MissingRequiredProperty`] without `UID` or `DTSTART`
    /// - [`ParseErrorKind::UnknownTimezone`] for an unregistered `TZID`
    /// - [`ParseErrorKind::InvalidDuration`] if the end lies past the representable range
    /// - any value error from the date, duration or RRULE parsers
    pub fn from_component(component: &Component, timezones: &TzMap) -> ParseResult<Self> {
        let uid = required(component, UID)?.value.as_str();
        let dtstart_prop = required(component, DTSTART)?;
        let dtstart = parse_date_or_datetime(dtstart_prop, dtstart_prop.line)?;
        let all_day = dtstart.is_date();
        let start = timezones.resolve(&dtstart, dtstart_prop.line)?;

        let (span, span_line) = if let Some(dtend) = component.get_property(DTEND) {
            let end = timezones.resolve(&parse_date_or_datetime(dtend, dtend.line)?, dtend.line)?;
            (end - start, dtend.line)
        } else if let Some(duration) = component.get_property(DURATION) {
            let span = parse_duration(&duration.value, duration.line)?.to_chrono();
            (span, duration.line)
        } else if all_day {
            (TimeDelta::days(1), dtstart_prop.line)
        } else {
            (TimeDelta::zero(), dtstart_prop.line)
        };
        if start.checked_add_signed(span).is_none() {
            tracing::error!(uid, %start, %span, "Event end is out of range");
            return Err(ParseError::new(ParseErrorKind::InvalidDuration, span_line)
                .with_context(format!("event {uid} ends out of range")));
        }

        let summary = component
            .get_property(SUMMARY)
            .map(|p| unescape_text(&p.value))
            .unwrap_or_default();

        let mut event = Self::new(uid, summary, start, span).with_all_day(all_day);
        if let Some(stamp) = component.get_property(DTSTAMP) {
            let value = parse_date_or_datetime(stamp, stamp.line)?;
            event = event.with_stamp(timezones.resolve(&value, stamp.line)?);
        }
        if let Some(rrule) = component.get_property(RRULE) {
            event = event.with_rrule(parse_rrule(&rrule.value, rrule.line).map_err(|e| {
                e.with_context(format!("event {uid}: {}", rrule.value))
            })?);
        }

        tracing::trace!(uid, %start, recurring = event.rrule.is_some(), "Built event");
        Ok(event)
    }

    #[must_use]
    pub fn uid(&self) -> &str {
        &self.uid
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Instant of DTSTART.
    #[must_use]
    pub const fn start(&self) -> DateTime<FixedOffset> {
        self.start
    }

    #[must_use]
    pub const fn span(&self) -> TimeDelta {
        self.span
    }

    /// Whether DTSTART is a DATE value.
    #[must_use]
    pub const fn all_day(&self) -> bool {
        self.all_day
    }

    #[must_use]
    pub const fn stamp(&self) -> Option<DateTime<FixedOffset>> {
        self.stamp
    }

    #[must_use]
    pub const fn rrule(&self) -> Option<&RRule> {
        self.rrule.as_ref()
    }

    /// Occurrence of this event starting at `start`.
    #[must_use]
    pub fn occurrence_at(&self, start: DateTime<FixedOffset>) -> Occurrence {
        Occurrence {
            kind: self.kind,
            uid: Arc::clone(&self.uid),
            summary: Arc::clone(&self.summary),
            start,
            span: self.span,
        }
    }
}

fn required<'a>(component: &'a Component, name: &str) -> ParseResult<&'a ContentLine> {
    component.get_property(name).ok_or_else(|| {
        tracing::error!(property = name, component = %component.name, "Missing required property");
        ParseError::new(ParseErrorKind::MissingRequiredProperty, component.line)
            .with_context(format!("{} without {name}", component.name))
    })
}
