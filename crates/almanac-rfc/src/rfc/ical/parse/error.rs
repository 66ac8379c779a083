//! iCalendar parsing error types.

use std::fmt;

/// Result type for iCalendar parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Error type for iCalendar parsing.
///
/// Every structural or value failure met while loading a calendar ends up
/// here; loading never recovers from one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Kind of error.
    pub kind: ParseErrorKind,
    /// Logical line where the error occurred (1-based, 0 when unknown).
    pub line: usize,
    /// Additional context about the error.
    pub context: Option<String>,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, line: usize) -> Self {
        Self {
            kind,
            line,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Sets the line of an error raised without one.
    #[must_use]
    pub const fn at_line(mut self, line: usize) -> Self {
        if self.line == 0 {
            self.line = line;
        }
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if self.line > 0 {
            write!(f, " at line {}", self.line)?;
        }
        if let Some(ref ctx) = self.context {
            write!(f, ": {ctx}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Kinds of parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The underlying reader failed.
    Io,
    /// The input held no content lines at all.
    EmptyStream,
    /// Input ended inside an open component.
    UnexpectedEof,
    /// Invalid content line format.
    InvalidContentLine,
    /// Missing property name.
    MissingPropertyName,
    /// Invalid property name character.
    InvalidPropertyName,
    /// Missing colon separator.
    MissingColon,
    /// Unclosed quoted parameter value.
    UnclosedQuote,
    /// A BEGIN line was expected.
    ExpectedBegin,
    /// The first component is not a VCALENDAR.
    MissingRoot,
    /// Mismatched BEGIN/END.
    MismatchedComponent,
    /// Missing required property.
    MissingRequiredProperty,
    /// Invalid date format.
    InvalidDate,
    /// Invalid time format.
    InvalidTime,
    /// Invalid date-time format.
    InvalidDateTime,
    /// Invalid duration format.
    InvalidDuration,
    /// Invalid UTC offset format.
    InvalidUtcOffset,
    /// Invalid recurrence rule.
    InvalidRRule,
    /// Invalid frequency.
    InvalidFrequency,
    /// Invalid weekday.
    InvalidWeekday,
    /// UNTIL and COUNT are mutually exclusive.
    UntilCountConflict,
    /// Recurrence rule part that the expander does not handle.
    UnsupportedRRule,
    /// Referenced TZID has no registered VTIMEZONE.
    UnknownTimezone,
    /// VTIMEZONE without a usable STANDARD or DAYLIGHT offset.
    MissingTimezoneOffset,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io => write!(f, "input error"),
            Self::EmptyStream => write!(f, "empty stream"),
            Self::UnexpectedEof => write!(f, "unexpected end of input"),
            Self::InvalidContentLine => write!(f, "invalid content line format"),
            Self::MissingPropertyName => write!(f, "missing property name"),
            Self::InvalidPropertyName => write!(f, "invalid property name"),
            Self::MissingColon => write!(f, "missing colon separator"),
            Self::UnclosedQuote => write!(f, "unclosed quoted string"),
            Self::ExpectedBegin => write!(f, "expected BEGIN"),
            Self::MissingRoot => write!(f, "did not expect component"),
            Self::MismatchedComponent => write!(f, "mismatched BEGIN/END"),
            Self::MissingRequiredProperty => write!(f, "missing required property"),
            Self::InvalidDate => write!(f, "invalid date format"),
            Self::InvalidTime => write!(f, "invalid time format"),
            Self::InvalidDateTime => write!(f, "invalid date-time format"),
            Self::InvalidDuration => write!(f, "invalid duration format"),
            Self::InvalidUtcOffset => write!(f, "invalid UTC offset format"),
            Self::InvalidRRule => write!(f, "invalid recurrence rule"),
            Self::InvalidFrequency => write!(f, "invalid frequency"),
            Self::InvalidWeekday => write!(f, "invalid weekday"),
            Self::UntilCountConflict => write!(f, "UNTIL and COUNT are mutually exclusive"),
            Self::UnsupportedRRule => write!(f, "unsupported recurrence rule part"),
            Self::UnknownTimezone => write!(f, "no matching timezone"),
            Self::MissingTimezoneOffset => write!(f, "timezone has no usable offset"),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
