//! iCalendar DATE and DATE-TIME value types (RFC 5545 §3.3.4, §3.3.5).

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Form of DATE-TIME value (RFC 5545 §3.3.5).
///
/// iCalendar DATE-TIME values come in three mutually exclusive forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateTimeForm {
    /// Floating time - same wall-clock time in any timezone.
    ///
    /// Example: `19980118T230000`
    Floating,

    /// UTC time - absolute instant, indicated by 'Z' suffix.
    ///
    /// Example: `19980119T070000Z`
    Utc,

    /// Zoned time - local time with TZID reference.
    ///
    /// Example: `TZID=America/New_York:19980119T020000`
    Zoned {
        /// The timezone identifier, as registered by a VTIMEZONE.
        tzid: String,
    },
}

/// DATE or DATE-TIME property value.
///
/// `time == None` marks a `VALUE=DATE` (all-day) value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTime {
    /// Calendar date.
    pub date: NaiveDate,
    /// Time of day, absent for DATE values.
    pub time: Option<NaiveTime>,
    /// How the wall-clock value maps to an instant.
    pub form: DateTimeForm,
}

impl DateTime {
    /// Creates a floating DATE-TIME.
    #[must_use]
    pub const fn floating(date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            date,
            time: Some(time),
            form: DateTimeForm::Floating,
        }
    }

    /// Creates a UTC DATE-TIME.
    #[must_use]
    pub const fn utc(date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            date,
            time: Some(time),
            form: DateTimeForm::Utc,
        }
    }

    /// Creates a zoned DATE-TIME.
    #[must_use]
    pub fn zoned(date: NaiveDate, time: NaiveTime, tzid: impl Into<String>) -> Self {
        Self {
            date,
            time: Some(time),
            form: DateTimeForm::Zoned { tzid: tzid.into() },
        }
    }

    /// Creates a DATE value.
    #[must_use]
    pub const fn date(date: NaiveDate) -> Self {
        Self {
            date,
            time: None,
            form: DateTimeForm::Floating,
        }
    }

    /// Attaches a TZID to this value.
    #[must_use]
    pub fn in_zone(mut self, tzid: impl Into<String>) -> Self {
        self.form = DateTimeForm::Zoned { tzid: tzid.into() };
        self
    }

    /// Returns whether this is a DATE (all-day) value.
    #[must_use]
    pub const fn is_date(&self) -> bool {
        self.time.is_none()
    }

    /// Returns whether this is a UTC time.
    #[must_use]
    pub fn is_utc(&self) -> bool {
        matches!(self.form, DateTimeForm::Utc)
    }

    /// Returns whether this is a floating time.
    #[must_use]
    pub fn is_floating(&self) -> bool {
        matches!(self.form, DateTimeForm::Floating)
    }

    /// Returns the timezone ID if this is a zoned time.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        match &self.form {
            DateTimeForm::Zoned { tzid } => Some(tzid),
            _ => None,
        }
    }

    /// Returns the wall-clock value; DATE values start at midnight.
    #[must_use]
    pub fn naive(&self) -> NaiveDateTime {
        self.date.and_time(self.time.unwrap_or(NaiveTime::MIN))
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date.format("%Y%m%d"))?;
        if let Some(time) = self.time {
            write!(f, "T{}", time.format("%H%M%S"))?;
            if self.is_utc() {
                write!(f, "Z")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn datetime_display() {
        let dt = DateTime::utc(ymd(2026, 1, 23), hms(12, 0, 0));
        assert_eq!(dt.to_string(), "20260123T120000Z");

        let dt = DateTime::floating(ymd(2026, 1, 23), hms(12, 0, 0));
        assert_eq!(dt.to_string(), "20260123T120000");

        let dt = DateTime::date(ymd(2026, 1, 23));
        assert_eq!(dt.to_string(), "20260123");
    }

    #[test]
    fn date_value_starts_at_midnight() {
        let dt = DateTime::date(ymd(2024, 2, 29)).in_zone("UTC+1");
        assert!(dt.is_date());
        assert_eq!(dt.tzid(), Some("UTC+1"));
        assert_eq!(dt.naive(), ymd(2024, 2, 29).and_hms_opt(0, 0, 0).unwrap());
    }
}
