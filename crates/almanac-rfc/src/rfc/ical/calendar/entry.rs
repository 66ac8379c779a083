//! One dated occurrence handed out by the calendar iterator.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, TimeDelta};

/// What kind of component produced an occurrence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Event,
    #[default]
    None,
}

impl EntryKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Event => "EVENT",
            Self::None => "UNKNOWN",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ## Summary
/// A single occurrence of an event.
///
/// `uid` and `summary` are shared with the event they came from, so handing
/// out many occurrences of one rule does not copy the strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub kind: EntryKind,
    pub uid: Arc<str>,
    pub summary: Arc<str>,
    pub start: DateTime<FixedOffset>,
    pub span: TimeDelta,
}

impl Occurrence {
    /// ## Summary
    /// Instant the occurrence ends.
    ///
    /// Occurrences handed out by the calendar iterators always have a
    /// representable end.
    ///
    /// ## Panics
    /// Panics if `start + span` is out of range for a hand-built occurrence.
    #[must_use]
    pub fn end(&self) -> DateTime<FixedOffset> {
        self.start + self.span
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({}) {}",
            self.kind,
            self.start.to_rfc3339(),
            self.end().to_rfc3339(),
            self.uid,
            self.summary
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn end_adds_span() {
        let start = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
            .unwrap();
        let occurrence = Occurrence {
            kind: EntryKind::Event,
            uid: Arc::from("a"),
            summary: Arc::from("Standup"),
            start,
            span: TimeDelta::minutes(30),
        };

        assert_eq!(occurrence.end().to_rfc3339(), "2024-01-01T09:30:00+01:00");
        assert_eq!(
            occurrence.to_string(),
            "EVENT 2024-01-01T09:00:00+01:00 2024-01-01T09:30:00+01:00 (a) Standup"
        );
    }

    #[test]
    fn kind_names() {
        assert_eq!(EntryKind::Event.to_string(), "EVENT");
        assert_eq!(EntryKind::default().to_string(), "UNKNOWN");
    }
}
