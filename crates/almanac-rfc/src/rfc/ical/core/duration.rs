//! iCalendar DURATION value type (RFC 5545 §3.3.6).

use std::fmt;

use chrono::TimeDelta;

/// Duration value (RFC 5545 §3.3.6).
///
/// Represents a duration of time. iCalendar durations can be either:
/// - Week-based: `P1W` (1 week)
/// - Day/time-based: `P1DT2H30M` (1 day, 2 hours, 30 minutes)
///
/// Note: iCalendar does not support year/month designators in durations
/// because months have variable lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Duration {
    /// Whether this duration is negative.
    pub negative: bool,
    /// Number of weeks.
    pub weeks: u32,
    /// Number of days.
    pub days: u32,
    /// Number of hours.
    pub hours: u32,
    /// Number of minutes.
    pub minutes: u32,
    /// Number of seconds.
    pub seconds: u32,
}

impl Duration {
    /// Creates a new zero duration.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            negative: false,
            weeks: 0,
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }

    /// Negates this duration.
    #[must_use]
    pub const fn negate(mut self) -> Self {
        self.negative = !self.negative;
        self
    }

    /// Returns the total duration as seconds.
    #[must_use]
    pub fn as_seconds(&self) -> i64 {
        let total = (i64::from(self.weeks) * 7 * 24 * 3600)
            + (i64::from(self.days) * 24 * 3600)
            + (i64::from(self.hours) * 3600)
            + (i64::from(self.minutes) * 60)
            + i64::from(self.seconds);

        if self.negative { -total } else { total }
    }

    /// Converts to a signed `chrono` span.
    #[must_use]
    pub fn to_chrono(&self) -> TimeDelta {
        TimeDelta::seconds(self.as_seconds())
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "P")?;

        if self.weeks > 0 {
            return write!(f, "{}W", self.weeks);
        }
        if self.days > 0 {
            write!(f, "{}D", self.days)?;
        }
        if self.hours > 0 || self.minutes > 0 || self.seconds > 0 {
            write!(f, "T")?;
            if self.hours > 0 {
                write!(f, "{}H", self.hours)?;
            }
            if self.minutes > 0 {
                write!(f, "{}M", self.minutes)?;
            }
            if self.seconds > 0 {
                write!(f, "{}S", self.seconds)?;
            }
        } else if self.days == 0 {
            write!(f, "0D")?;
        }
        Ok(())
    }
}
