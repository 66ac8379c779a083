//! Calendar loading and occurrence iteration.
//!
//! A [`Calendar`] owns the events and timezones read from one or more
//! VCALENDAR streams. [`Calendar::iter`] merges every event's occurrences
//! inside a time window.

mod entry;
mod event;
mod iter;

use std::io::BufRead;

use almanac_core::constants::VCALENDAR;
use chrono::{DateTime, Utc};

pub use entry::{EntryKind, Occurrence};
pub use event::Event;
pub use iter::CalendarIter;

use crate::error::RfcResult;
use crate::rfc::ical::core::ComponentKind;
use crate::rfc::ical::expand::TzMap;
use crate::rfc::ical::parse::{CalendarFilter, ObjectStream, ParseResult};

/// Events in document order plus the timezones they were resolved against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Calendar {
    events: Vec<Event>,
    timezones: TzMap,
}

impl Calendar {
    /// ## Summary
    /// Loads every event of one VCALENDAR stream.
    ///
    /// ## Errors
    /// Returns the first tokenizing, structural or value error.
    pub fn load<R: BufRead>(reader: R) -> ParseResult<Self> {
        Self::load_with(reader, TzMap::new(), |_| true)
    }

    /// ## Summary
    /// Loads one VCALENDAR stream on top of already known timezones.
    ///
    /// VTIMEZONE and VEVENT children are handled in document order, so an
    /// event can only use timezones defined before it or passed in through
    /// `timezones`. Events for which `include` returns `false` are dropped.
    /// Nothing after the closing `END:VCALENDAR` is read.
    ///
    /// ## Errors
    /// - [`ParseErrorKind::EmptyStream`](crate::rfc::ical::parse::ParseErrorKind::EmptyStream) for empty input
    /// - [`ParseErrorKind::MissingRoot`](crate::rfc::ical::parse::ParseErrorKind::MissingRoot) if the first block is not VCALENDAR
    /// - any error from parsing a timezone or an event
    #[tracing::instrument(skip_all)]
    pub fn load_with<R: BufRead>(
        reader: R,
        timezones: TzMap,
        mut include: impl FnMut(&Event) -> bool,
    ) -> ParseResult<Self> {
        tracing::debug!(known_timezones = timezones.len(), "Loading calendar");

        let mut objects = ObjectStream::new(reader, CalendarFilter);
        objects.next_root(VCALENDAR)?;

        let mut calendar = Self {
            events: Vec::new(),
            timezones,
        };
        let mut skipped = 0_usize;

        while objects.has_open() {
            let Some(child) = objects.next_object(true)? else {
                break;
            };

            match child.kind {
                ComponentKind::Timezone => calendar.timezones.add(&child)?,
                ComponentKind::Event => {
                    let event = Event::from_component(&child, &calendar.timezones)?;
                    if include(&event) {
                        calendar.events.push(event);
                    } else {
                        tracing::debug!(uid = event.uid(), "Skipping excluded event");
                        skipped += 1;
                    }
                }
                _ => tracing::trace!(component = %child.name, "Ignoring component"),
            }
        }

        tracing::debug!(
            events = calendar.events.len(),
            skipped,
            timezones = calendar.timezones.len(),
            "Calendar loaded"
        );
        Ok(calendar)
    }

    /// Events in the order they were loaded.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    #[must_use]
    pub const fn timezones(&self) -> &TzMap {
        &self.timezones
    }

    /// Takes the timezone map, e.g. to load a further stream against it.
    #[must_use]
    pub fn into_timezones(self) -> TzMap {
        self.timezones
    }

    pub fn add_event(&mut self, event: Event) {
        self.events.push(event);
    }

    /// ## Summary
    /// Iterates the occurrences starting in `[begin, end)`.
    ///
    /// ## Errors
    /// Returns [`RfcError::ValueError`](crate::error::RfcError::ValueError) if `end` lies before `begin`.
    pub fn iter(
        &self,
        begin: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> RfcResult<CalendarIter<'_>> {
        CalendarIter::new(self, begin, end)
    }
}
