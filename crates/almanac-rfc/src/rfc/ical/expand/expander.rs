//! Per-event occurrence expansion clipped to a time window.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};

use super::rrule::Recurrence;
use crate::rfc::ical::calendar::{Event, Occurrence};

/// Where the next start comes from.
#[derive(Debug, Clone)]
enum Source<'a> {
    Single { taken: bool },
    Rule(Recurrence<'a>),
}

/// ## Summary
/// Walks the occurrences of one event that start inside `[begin, end)`.
///
/// Call [`EventIter::advance`] to move to the next occurrence and
/// [`EventIter::entry`] to read it. Once `advance` returns `false` it keeps
/// returning `false`.
#[derive(Debug, Clone)]
pub struct EventIter<'a> {
    event: &'a Event,
    index: usize,
    begin: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    source: Source<'a>,
    pending: Option<DateTime<FixedOffset>>,
    exhausted: bool,
}

impl<'a> EventIter<'a> {
    /// Creates an expander for `event`, which sits at `index` in its calendar.
    #[must_use]
    pub fn new(
        event: &'a Event,
        index: usize,
        begin: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Self {
        let source = match event.rrule() {
            Some(rule) => Source::Rule(Recurrence::new(rule, event.start(), begin)),
            None => Source::Single { taken: false },
        };

        Self {
            event,
            index,
            begin,
            end,
            source,
            pending: None,
            exhausted: false,
        }
    }

    /// ## Summary
    /// Moves to the next occurrence inside the window.
    ///
    /// Returns `false` when the window end, the rule's COUNT or UNTIL, or
    /// the single start of a non-recurring event has been passed. Expansion
    /// also stops at the first occurrence whose end is not representable.
    pub fn advance(&mut self) -> bool {
        if self.exhausted {
            return false;
        }

        while let Some(start) = self.next_start() {
            let instant = start.with_timezone(&Utc);
            if let Some(end) = self.end
                && instant >= end
            {
                break;
            }
            if let Some(begin) = self.begin
                && instant < begin
            {
                continue;
            }
            if start.checked_add_signed(self.event.span()).is_none() {
                tracing::warn!(uid = self.event.uid(), %start, "Occurrence end is out of range");
                break;
            }

            self.pending = Some(start);
            return true;
        }

        tracing::trace!(uid = self.event.uid(), "Event expansion exhausted");
        self.exhausted = true;
        self.pending = None;
        false
    }

    /// Current occurrence, if `advance` last returned `true`.
    #[must_use]
    pub fn entry(&self) -> Option<Occurrence> {
        self.pending.map(|start| self.event.occurrence_at(start))
    }

    /// Start of the current occurrence.
    #[must_use]
    pub const fn pending(&self) -> Option<DateTime<FixedOffset>> {
        self.pending
    }

    /// Merge ordering key: start, then UID, then calendar position.
    #[must_use]
    pub fn key(&self) -> Option<(DateTime<FixedOffset>, &'a str, usize)> {
        let event = self.event;
        self.pending.map(|start| (start, event.uid(), self.index))
    }

    fn next_start(&mut self) -> Option<DateTime<FixedOffset>> {
        match &mut self.source {
            Source::Single { taken } => {
                if *taken {
                    return None;
                }
                *taken = true;
                Some(self.event.start())
            }
            Source::Rule(recurrence) => {
                let offset = *self.event.start().offset();
                let local = recurrence.next_local()?;
                offset.from_local_datetime(&local).single()
            }
        }
    }
}

impl Iterator for EventIter<'_> {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Self::Item> {
        if self.advance() { self.entry() } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::ical::parse::parse_rrule;
    use chrono::{NaiveDate, TimeDelta};

    fn utc(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
    }

    fn event(rule: Option<&str>) -> Event {
        let start = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
            .unwrap();
        let event = Event::new("e", "Standup", start, TimeDelta::minutes(15));
        match rule {
            Some(rule) => event.with_rrule(parse_rrule(rule, 1).unwrap()),
            None => event,
        }
    }

    fn starts(iter: EventIter<'_>) -> Vec<String> {
        iter.map(|o| o.start.to_rfc3339()).collect()
    }

    #[test_log::test]
    fn single_event_inside_and_outside_window() {
        let e = event(None);
        let mut iter = EventIter::new(&e, 0, None, None);
        assert!(iter.advance());
        assert_eq!(iter.entry().unwrap().summary.as_ref(), "Standup");
        assert!(!iter.advance());
        assert!(!iter.advance());
        assert!(iter.entry().is_none());

        let iter = EventIter::new(&e, 0, Some(utc(2024, 1, 1, 9)), None);
        assert!(starts(iter).is_empty());

        // End bound is exclusive: 09:00+01:00 is 08:00Z.
        let iter = EventIter::new(&e, 0, None, Some(utc(2024, 1, 1, 8)));
        assert!(starts(iter).is_empty());
    }

    #[test]
    fn recurring_event_is_clipped() {
        let e = event(Some("FREQ=DAILY;COUNT=10"));
        let iter = EventIter::new(&e, 0, Some(utc(2024, 1, 3, 0)), Some(utc(2024, 1, 5, 8)));
        assert_eq!(
            starts(iter),
            vec!["2024-01-03T09:00:00+01:00", "2024-01-04T09:00:00+01:00"]
        );
    }

    #[test]
    fn count_includes_skipped_instances() {
        let e = event(Some("FREQ=DAILY;COUNT=3"));
        let iter = EventIter::new(&e, 0, Some(utc(2024, 1, 2, 12)), None);
        assert_eq!(starts(iter), vec!["2024-01-03T09:00:00+01:00"]);
    }

    #[test]
    fn unbounded_rule_with_far_window() {
        let e = event(Some("FREQ=WEEKLY;BYDAY=MO,TH"));
        let iter = EventIter::new(&e, 0, Some(utc(2030, 1, 1, 0)), Some(utc(2030, 1, 15, 0)));
        assert_eq!(
            starts(iter),
            vec![
                "2030-01-03T09:00:00+01:00",
                "2030-01-07T09:00:00+01:00",
                "2030-01-10T09:00:00+01:00",
                "2030-01-14T09:00:00+01:00",
            ]
        );
    }

    #[test]
    fn stops_before_an_unrepresentable_end() {
        let last = NaiveDate::MAX.pred_opt().unwrap().and_hms_opt(0, 0, 0).unwrap();
        let start = FixedOffset::east_opt(0).unwrap().from_utc_datetime(&last);

        let daily = Event::new("edge", "", start, TimeDelta::days(1))
            .with_rrule(parse_rrule("FREQ=DAILY", 1).unwrap());
        let occurrences: Vec<_> = EventIter::new(&daily, 0, None, None).collect();
        assert_eq!(occurrences.len(), 1);
        assert_eq!(occurrences[0].end().date_naive(), NaiveDate::MAX);

        let single = Event::new("edge", "", start, TimeDelta::days(2));
        let mut iter = EventIter::new(&single, 0, None, None);
        assert!(!iter.advance());
        assert!(iter.entry().is_none());
    }

    #[test]
    fn key_orders_by_start_then_uid() {
        let e = event(Some("FREQ=DAILY"));
        let mut iter = EventIter::new(&e, 4, None, None);
        assert!(iter.key().is_none());
        assert!(iter.advance());
        let (start, uid, index) = iter.key().unwrap();
        assert_eq!(start, e.start());
        assert_eq!(uid, "e");
        assert_eq!(index, 4);
        assert_eq!(iter.pending(), Some(e.start()));
    }
}
