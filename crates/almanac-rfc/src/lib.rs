//! Streaming iCalendar parsing and recurrence expansion.
//!
//! The pipeline reads folded content lines from any [`std::io::BufRead`],
//! rebuilds the filtered `BEGIN`/`END` component tree, resolves events
//! against the calendar's timezones and merges every event's occurrences
//! into one chronological stream.

pub mod error;
pub mod rfc;

pub use error::{RfcError, RfcResult};
