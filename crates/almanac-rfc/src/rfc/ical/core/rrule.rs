//! iCalendar RRULE (Recurrence Rule) value type (RFC 5545 §3.3.10, §3.8.5.3).

use std::fmt;

use chrono::NaiveDate;

use super::DateTime;

/// Recurrence frequency (RFC 5545 §3.3.10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Secondly => "SECONDLY",
            Self::Minutely => "MINUTELY",
            Self::Hourly => "HOURLY",
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }

    /// Parses a frequency from a string (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_uppercase().as_str() {
            "SECONDLY" => Self::Secondly,
            "MINUTELY" => Self::Minutely,
            "HOURLY" => Self::Hourly,
            "DAILY" => Self::Daily,
            "WEEKLY" => Self::Weekly,
            "MONTHLY" => Self::Monthly,
            "YEARLY" => Self::Yearly,
            _ => return None,
        })
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Returns the two-letter abbreviation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sunday => "SU",
            Self::Monday => "MO",
            Self::Tuesday => "TU",
            Self::Wednesday => "WE",
            Self::Thursday => "TH",
            Self::Friday => "FR",
            Self::Saturday => "SA",
        }
    }

    /// Parses a weekday from a two-letter abbreviation (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_uppercase().as_str() {
            "SU" => Self::Sunday,
            "MO" => Self::Monday,
            "TU" => Self::Tuesday,
            "WE" => Self::Wednesday,
            "TH" => Self::Thursday,
            "FR" => Self::Friday,
            "SA" => Self::Saturday,
            _ => return None,
        })
    }

    /// Returns the matching `chrono` weekday.
    #[must_use]
    pub const fn to_chrono(self) -> chrono::Weekday {
        match self {
            Self::Sunday => chrono::Weekday::Sun,
            Self::Monday => chrono::Weekday::Mon,
            Self::Tuesday => chrono::Weekday::Tue,
            Self::Wednesday => chrono::Weekday::Wed,
            Self::Thursday => chrono::Weekday::Thu,
            Self::Friday => chrono::Weekday::Fri,
            Self::Saturday => chrono::Weekday::Sat,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// UNTIL value for RRULE - can be either DATE or DATE-TIME.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RRuleUntil {
    /// Date-only boundary (inclusive).
    Date(NaiveDate),
    /// Date-time boundary (inclusive), UTC or floating.
    DateTime(DateTime),
}

impl fmt::Display for RRuleUntil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(d) => write!(f, "{}", d.format("%Y%m%d")),
            Self::DateTime(dt) => write!(f, "{dt}"),
        }
    }
}

/// Recurrence rule (RFC 5545 §3.3.10, §3.8.5.3).
///
/// Carries the subset of rule parts the expander understands; `parse_rrule`
/// rejects anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RRule {
    /// Recurrence frequency.
    pub freq: Frequency,

    /// Recurrence interval, at least 1.
    pub interval: u32,

    /// End date/time of the recurrence (mutually exclusive with count).
    pub until: Option<RRuleUntil>,

    /// Number of occurrences (mutually exclusive with until).
    pub count: Option<u32>,

    /// Week start day (default: Monday).
    pub wkst: Option<Weekday>,

    /// By-day list, plain weekdays only (`FREQ=WEEKLY`).
    pub by_day: Vec<Weekday>,

    /// By-monthday list, -31 to 31 excluding 0 (`FREQ=MONTHLY`).
    pub by_monthday: Vec<i8>,

    /// By-month list, 1 to 12 (`FREQ=YEARLY`).
    pub by_month: Vec<u8>,
}

impl RRule {
    /// Creates a rule with the given frequency and no other parts.
    #[must_use]
    pub const fn new(freq: Frequency) -> Self {
        Self {
            freq,
            interval: 1,
            until: None,
            count: None,
            wkst: None,
            by_day: Vec::new(),
            by_monthday: Vec::new(),
            by_month: Vec::new(),
        }
    }

    /// Sets the interval.
    #[must_use]
    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the count.
    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self.until = None;
        self
    }

    /// Sets the until bound.
    #[must_use]
    pub fn with_until(mut self, until: RRuleUntil) -> Self {
        self.until = Some(until);
        self.count = None;
        self
    }

    /// Sets the by-day list.
    #[must_use]
    pub fn with_by_day(mut self, days: Vec<Weekday>) -> Self {
        self.by_day = days;
        self
    }

    /// Sets the by-monthday list.
    #[must_use]
    pub fn with_by_monthday(mut self, days: Vec<i8>) -> Self {
        self.by_monthday = days;
        self
    }

    /// Sets the by-month list.
    #[must_use]
    pub fn with_by_month(mut self, months: Vec<u8>) -> Self {
        self.by_month = months;
        self
    }
}

fn join<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

impl fmt::Display for RRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FREQ={}", self.freq)?;
        if self.interval != 1 {
            write!(f, ";INTERVAL={}", self.interval)?;
        }
        if let Some(ref until) = self.until {
            write!(f, ";UNTIL={until}")?;
        }
        if let Some(count) = self.count {
            write!(f, ";COUNT={count}")?;
        }
        if let Some(wkst) = self.wkst {
            write!(f, ";WKST={wkst}")?;
        }
        if !self.by_day.is_empty() {
            write!(f, ";BYDAY={}", join(&self.by_day))?;
        }
        if !self.by_monthday.is_empty() {
            write!(f, ";BYMONTHDAY={}", join(&self.by_monthday))?;
        }
        if !self.by_month.is_empty() {
            write!(f, ";BYMONTH={}", join(&self.by_month))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rrule_display_basic() {
        let rrule = RRule::new(Frequency::Daily).with_count(10);
        assert_eq!(rrule.to_string(), "FREQ=DAILY;COUNT=10");
    }

    #[test]
    fn rrule_display_weekly_byday() {
        let rrule = RRule::new(Frequency::Weekly)
            .with_interval(2)
            .with_by_day(vec![Weekday::Monday, Weekday::Wednesday, Weekday::Friday]);
        assert_eq!(rrule.to_string(), "FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,WE,FR");
    }

    #[test]
    fn count_and_until_replace_each_other() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let rrule = RRule::new(Frequency::Monthly)
            .with_count(3)
            .with_until(RRuleUntil::Date(date));
        assert_eq!(rrule.count, None);
        assert_eq!(rrule.to_string(), "FREQ=MONTHLY;UNTIL=20240301");
    }

    #[test]
    fn weekday_parse() {
        assert_eq!(Weekday::parse("MO"), Some(Weekday::Monday));
        assert_eq!(Weekday::parse("fr"), Some(Weekday::Friday));
        assert_eq!(Weekday::parse("XX"), None);
        assert_eq!(Weekday::Sunday.to_chrono(), chrono::Weekday::Sun);
    }

    #[test]
    fn frequency_parse() {
        assert_eq!(Frequency::parse("DAILY"), Some(Frequency::Daily));
        assert_eq!(Frequency::parse("weekly"), Some(Frequency::Weekly));
        assert_eq!(Frequency::parse("INVALID"), None);
    }
}
