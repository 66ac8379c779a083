//! iCalendar parsing (RFC 5545).
//!
//! Streaming pipeline:
//! 1. [`reader`] - unfold physical lines into logical lines
//! 2. [`lexer`] - tokenize each logical line into a [`ContentLine`](crate::rfc::ical::core::ContentLine)
//! 3. [`stream`] - hand out lines with one line of pushback
//! 4. [`parser`] - rebuild the filtered `BEGIN`/`END` tree
//! 5. [`values`] - parse typed property values

mod error;
pub mod lexer;
pub mod parser;
pub mod reader;
pub mod stream;
pub mod values;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use lexer::parse_content_line;
pub use parser::{AcceptAll, CalendarFilter, Filter, ObjectStream};
pub use reader::LineReader;
pub use stream::LineStream;
pub use values::{
    parse_date, parse_date_or_datetime, parse_datetime, parse_duration, parse_rrule, parse_time,
    parse_utc_offset, unescape_text,
};
