//! Timezone map built from VTIMEZONE components (RFC 5545 §3.6.5).
//!
//! Each TZID maps to one static UTC offset. DST transition schedules in
//! STANDARD/DAYLIGHT observances are not modeled: the offset of the last
//! STANDARD observance is used for every instant, or the last DAYLIGHT one
//! when the timezone has no STANDARD observance.

use std::collections::HashMap;

use almanac_core::constants::{TZID, TZOFFSETFROM, TZOFFSETTO};
use chrono::{FixedOffset, Offset, TimeZone, Utc};

use crate::rfc::ical::core::{Component, ComponentKind, DateTime, DateTimeForm};
use crate::rfc::ical::parse::{ParseError, ParseErrorKind, ParseResult, parse_utc_offset};

/// Static UTC offsets keyed by TZID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TzMap {
    offsets: HashMap<String, FixedOffset>,
}

impl TzMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// ## Summary
    /// Registers a VTIMEZONE component, replacing any earlier entry for its TZID.
    ///
    /// ## Errors
    /// - [`ParseErrorKind::MissingRequiredProperty`] without a TZID
    /// - [`ParseErrorKind::MissingTimezoneOffset`] without a usable observance
    /// - [`ParseErrorKind::InvalidUtcOffset`] for a malformed offset
    pub fn add(&mut self, component: &Component) -> ParseResult<()> {
        let tzid = component
            .get_property(TZID)
            .map(|p| p.value.clone())
            .ok_or_else(|| {
                ParseError::new(ParseErrorKind::MissingRequiredProperty, component.line)
                    .with_context("VTIMEZONE without TZID")
            })?;

        let observance = component
            .children_of_kind(ComponentKind::Standard)
            .pop()
            .or_else(|| component.children_of_kind(ComponentKind::Daylight).pop())
            .ok_or_else(|| {
                ParseError::new(ParseErrorKind::MissingTimezoneOffset, component.line)
                    .with_context(tzid.clone())
            })?;

        let offset_prop = observance
            .get_property(TZOFFSETTO)
            .or_else(|| observance.get_property(TZOFFSETFROM))
            .ok_or_else(|| {
                ParseError::new(ParseErrorKind::MissingTimezoneOffset, observance.line)
                    .with_context(tzid.clone())
            })?;
        let offset = parse_utc_offset(&offset_prop.value, offset_prop.line)?;

        tracing::debug!(%tzid, %offset, observance = %observance.name, "Registered timezone");
        self.offsets.insert(tzid, offset);
        Ok(())
    }

    /// Registers a fixed offset directly.
    pub fn insert(&mut self, tzid: impl Into<String>, offset: FixedOffset) {
        self.offsets.insert(tzid.into(), offset);
    }

    /// ## Summary
    /// Returns the offset registered for `tzid`.
    ///
    /// ## Errors
    /// Returns [`ParseErrorKind::UnknownTimezone`] if no VTIMEZONE defined it.
    pub fn offset_for(&self, tzid: &str) -> ParseResult<FixedOffset> {
        self.offsets.get(tzid).copied().ok_or_else(|| {
            tracing::error!(tzid, "No matching timezone");
            ParseError::new(ParseErrorKind::UnknownTimezone, 0).with_context(tzid.to_string())
        })
    }

    /// ## Summary
    /// Resolves a property value to an instant.
    ///
    /// UTC values get `+00:00`, zoned values the offset of their TZID and
    /// floating values are read as UTC. DATE values resolve to midnight.
    ///
    /// Errors are reported at `line`, the line the value was read from.
    ///
    /// ## Errors
    /// Returns [`ParseErrorKind::UnknownTimezone`] for an unregistered TZID.
    pub fn resolve(
        &self,
        value: &DateTime,
        line: usize,
    ) -> ParseResult<chrono::DateTime<FixedOffset>> {
        let naive = value.naive();
        let offset = match &value.form {
            DateTimeForm::Utc | DateTimeForm::Floating => Utc.fix(),
            DateTimeForm::Zoned { tzid } => self.offset_for(tzid).map_err(|e| e.at_line(line))?,
        };

        offset.from_local_datetime(&naive).single().ok_or_else(|| {
            ParseError::new(ParseErrorKind::InvalidDateTime, line).with_context(value.to_string())
        })
    }

    /// Returns whether `tzid` is registered.
    #[must_use]
    pub fn contains(&self, tzid: &str) -> bool {
        self.offsets.contains_key(tzid)
    }

    /// Number of registered timezones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Returns whether no timezone is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}
