//! Chronological merge of every event's occurrences.

use chrono::{DateTime, Utc};

use super::{Calendar, Occurrence};
use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::expand::EventIter;

/// ## Summary
/// Yields the occurrences of all events of a calendar in start order.
///
/// Ties are broken by UID, then by the event's position in the calendar.
/// Every start lies in `[begin, end)`; a missing bound leaves that side open.
#[derive(Debug, Clone)]
pub struct CalendarIter<'a> {
    active: Vec<EventIter<'a>>,
    current: Option<Occurrence>,
}

impl<'a> CalendarIter<'a> {
    /// ## Summary
    /// Starts one expander per event and drops those with nothing in the window.
    ///
    /// ## Errors
    /// Returns [`RfcError::ValueError`] if `end` lies before `begin`.
    pub fn new(
        calendar: &'a Calendar,
        begin: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> RfcResult<Self> {
        if let (Some(begin), Some(end)) = (begin, end)
            && end < begin
        {
            tracing::error!(%begin, %end, "Begin and end describe a negative range");
            return Err(RfcError::ValueError(
                "Begin and end describe a negative range".to_string(),
            ));
        }

        let active: Vec<_> = calendar
            .events()
            .iter()
            .enumerate()
            .map(|(index, event)| EventIter::new(event, index, begin, end))
            .filter_map(|mut iter| iter.advance().then_some(iter))
            .collect();

        tracing::debug!(
            events = calendar.events().len(),
            active = active.len(),
            "Calendar iteration started"
        );
        Ok(Self {
            active,
            current: None,
        })
    }

    /// Moves to the earliest pending occurrence.
    ///
    /// Returns `false` once every event is exhausted.
    pub fn advance(&mut self) -> bool {
        let next = self
            .active
            .iter()
            .enumerate()
            .filter_map(|(pos, iter)| iter.key().map(|key| (key, pos)))
            .min()
            .map(|(_, pos)| pos);

        let Some(pos) = next else {
            self.current = None;
            return false;
        };

        let iter = &mut self.active[pos];
        self.current = iter.entry();
        if !iter.advance() {
            self.active.swap_remove(pos);
        }
        self.current.is_some()
    }

    /// ## Summary
    /// The occurrence selected by the last successful [`Self::advance`].
    ///
    /// ## Errors
    /// Returns [`RfcError::RecurrenceError`] before the first `advance` or
    /// after it returned `false`.
    pub fn current(&self) -> RfcResult<&Occurrence> {
        self.current.as_ref().ok_or_else(|| {
            tracing::warn!("Calendar iterator has no current entry");
            RfcError::RecurrenceError("No more entries".to_string())
        })
    }

    /// Number of events that still have occurrences pending.
    #[must_use]
    pub fn remaining_events(&self) -> usize {
        self.active.len()
    }
}

impl Iterator for CalendarIter<'_> {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Self::Item> {
        if self.advance() {
            self.current.clone()
        } else {
            None
        }
    }
}
