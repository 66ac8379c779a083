//! iCalendar RFC 5545 implementation.
//!
//! - `core`: models for the parsed block tree and typed values
//! - `parse`: folded-line reading, tokenizing and the filtered block parser
//! - `expand`: timezone resolution and recurrence expansion
//! - `calendar`: event loading and the merged occurrence iterator
//!
//! ## Example
//!
//! ```rust
//! use almanac_rfc::rfc::ical::Calendar;
//!
//! let input = "BEGIN:VCALENDAR\r\n\
//! BEGIN:VEVENT\r\n\
//! UID:standup\r\n\
//! DTSTART:20240101T090000Z\r\n\
//! RRULE:FREQ=DAILY;COUNT=3\r\n\
//! END:VEVENT\r\n\
//! END:VCALENDAR\r\n";
//!
//! let calendar = Calendar::load(input.as_bytes()).unwrap();
//! let starts: Vec<_> = calendar.iter(None, None).unwrap().map(|o| o.start).collect();
//! assert_eq!(starts.len(), 3);
//! ```

pub mod calendar;
pub mod core;
pub mod expand;
pub mod parse;

#[cfg(test)]
mod tests;

pub use calendar::{Calendar, CalendarIter, EntryKind, Event, Occurrence};
pub use self::core::{Component, ComponentKind, ContentLine};
pub use expand::{EventIter, TzMap};
pub use parse::{ParseError, ParseErrorKind, ParseResult};
