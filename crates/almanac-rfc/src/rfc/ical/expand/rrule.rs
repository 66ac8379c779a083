//! RRULE candidate generation on the local wall clock.
//!
//! Works on the naive wall-clock time of DTSTART so that day, month and year
//! steps land on the same local time. Because every timezone has a single
//! fixed offset, converting back to an instant is exact.

use chrono::{
    DateTime, Datelike, Days, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc,
};

use crate::rfc::ical::core::{Frequency, RRule, RRuleUntil, Weekday};

/// A rule yielding nothing for this many consecutive periods is exhausted.
pub const MAX_EMPTY_PERIODS: u32 = 1000;

/// Inclusive UNTIL bound on the local wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Until {
    Date(NaiveDate),
    Local(NaiveDateTime),
}

impl Until {
    fn new(until: &RRuleUntil, offset: FixedOffset) -> Self {
        match until {
            RRuleUntil::Date(date) => Self::Date(*date),
            RRuleUntil::DateTime(dt) if dt.is_utc() => Self::Local(
                Utc.from_utc_datetime(&dt.naive())
                    .with_timezone(&offset)
                    .naive_local(),
            ),
            RRuleUntil::DateTime(dt) => Self::Local(dt.naive()),
        }
    }

    fn admits(self, candidate: NaiveDateTime) -> bool {
        match self {
            Self::Date(date) => candidate.date() <= date,
            Self::Local(until) => candidate <= until,
        }
    }
}

/// Ordered occurrence starts of one rule, DTSTART first.
///
/// Honors COUNT and UNTIL; window clipping is left to the caller.
#[derive(Debug, Clone)]
pub struct Recurrence<'a> {
    rule: &'a RRule,
    dtstart: NaiveDateTime,
    until: Option<Until>,
    /// Next period to expand; period `p` starts `p * interval` units after DTSTART.
    next_period: i64,
    /// Remaining candidates of the last expanded period, latest first.
    queue: Vec<NaiveDateTime>,
    emitted: u32,
    started: bool,
    done: bool,
}

impl<'a> Recurrence<'a> {
    /// Creates the generator for `rule` anchored at `dtstart`.
    ///
    /// With a `begin` bound and no COUNT, periods that end well before
    /// `begin` are skipped without being expanded.
    #[must_use]
    pub fn new(
        rule: &'a RRule,
        dtstart: DateTime<FixedOffset>,
        begin: Option<DateTime<Utc>>,
    ) -> Self {
        let offset = *dtstart.offset();
        let mut recurrence = Self {
            rule,
            dtstart: dtstart.naive_local(),
            until: rule.until.as_ref().map(|u| Until::new(u, offset)),
            next_period: 0,
            queue: Vec::new(),
            emitted: 0,
            started: false,
            done: false,
        };

        if let Some(begin) = begin
            && rule.count.is_none()
        {
            recurrence.fast_forward(begin.with_timezone(&offset).naive_local());
        }
        recurrence
    }

    /// Returns the next occurrence start on the local wall clock.
    pub fn next_local(&mut self) -> Option<NaiveDateTime> {
        if self.done {
            return None;
        }
        if let Some(count) = self.rule.count
            && self.emitted >= count
        {
            self.done = true;
            return None;
        }

        let candidate = if self.started {
            self.next_candidate()
                .filter(|c| self.until.is_none_or(|until| until.admits(*c)))
        } else {
            self.started = true;
            Some(self.dtstart)
        };

        if candidate.is_some() {
            self.emitted += 1;
        } else {
            self.done = true;
        }
        candidate
    }

    /// Number of starts produced so far, DTSTART included.
    #[must_use]
    pub const fn emitted(&self) -> u32 {
        self.emitted
    }

    fn next_candidate(&mut self) -> Option<NaiveDateTime> {
        let mut empty = 0;
        loop {
            if let Some(c) = self.queue.pop() {
                return Some(c);
            }
            if empty >= MAX_EMPTY_PERIODS {
                tracing::warn!(rule = %self.rule, "Recurrence yields no instances, giving up");
                return None;
            }

            let period = self.next_period;
            self.next_period = period.checked_add(1)?;

            let dtstart = self.dtstart;
            let mut candidates = self.candidates(period)?;
            candidates.retain(|c| *c > dtstart);
            candidates.reverse();
            if candidates.is_empty() {
                empty += 1;
            }
            self.queue = candidates;
        }
    }

    /// Jumps close to `target` for rules with a fixed period length.
    fn fast_forward(&mut self, target: NaiveDateTime) {
        let Some(span) = fixed_step(self.rule.freq)
            .zip(i32::try_from(self.rule.interval).ok())
            .and_then(|(step, interval)| step.checked_mul(interval))
        else {
            return;
        };

        let elapsed = target - self.dtstart;
        let skip = elapsed.num_seconds() / span.num_seconds() - 1;
        if skip <= 0 {
            return;
        }

        tracing::trace!(skip, rule = %self.rule, "Skipping periods before window");
        // DTSTART lies before the window, so it can be dropped along with the periods.
        self.started = true;
        self.next_period = skip;
    }

    /// Candidates in period `period`, sorted; `None` once dates leave chrono's range.
    fn candidates(&self, period: i64) -> Option<Vec<NaiveDateTime>> {
        let n = period.checked_mul(i64::from(self.rule.interval))?;
        let start = self.dtstart;

        let mut out = match self.rule.freq {
            Frequency::Secondly => vec![start.checked_add_signed(TimeDelta::try_seconds(n)?)?],
            Frequency::Minutely => vec![start.checked_add_signed(TimeDelta::try_minutes(n)?)?],
            Frequency::Hourly => vec![start.checked_add_signed(TimeDelta::try_hours(n)?)?],
            Frequency::Daily => vec![start.checked_add_signed(TimeDelta::try_days(n)?)?],
            Frequency::Weekly => {
                let anchor = start.checked_add_signed(TimeDelta::try_weeks(n)?)?;
                if self.rule.by_day.is_empty() {
                    vec![anchor]
                } else {
                    self.week_days(anchor)?
                }
            }
            Frequency::Monthly => self.month_days(n)?,
            Frequency::Yearly => self.year_days(n)?,
        };

        out.sort_unstable();
        out.dedup();
        Some(out)
    }

    fn week_days(&self, anchor: NaiveDateTime) -> Option<Vec<NaiveDateTime>> {
        let wkst = self.rule.wkst.unwrap_or(Weekday::Monday).to_chrono();
        let from_wkst = |day: chrono::Weekday| {
            (day.num_days_from_monday() + 7 - wkst.num_days_from_monday()) % 7
        };

        let week_start = anchor
            .date()
            .checked_sub_days(Days::new(u64::from(from_wkst(anchor.weekday()))))?;

        Some(
            self.rule
                .by_day
                .iter()
                .filter_map(|day| {
                    week_start.checked_add_days(Days::new(u64::from(from_wkst(day.to_chrono()))))
                })
                .map(|date| date.and_time(anchor.time()))
                .collect(),
        )
    }

    fn month_days(&self, n: i64) -> Option<Vec<NaiveDateTime>> {
        let start = self.dtstart;
        let total = i64::from(start.year()) * 12 + i64::from(start.month0()) + n;
        let year = i32::try_from(total.div_euclid(12)).ok()?;
        let month = u32::try_from(total.rem_euclid(12)).ok()? + 1;

        let days: Vec<u32> = if self.rule.by_monthday.is_empty() {
            vec![start.day()]
        } else {
            let last = days_in_month(year, month)?;
            self.rule
                .by_monthday
                .iter()
                .filter_map(|&d| {
                    let day = if d > 0 {
                        i64::from(d)
                    } else {
                        i64::from(last) + 1 + i64::from(d)
                    };
                    u32::try_from(day).ok().filter(|day| *day >= 1)
                })
                .collect()
        };

        Some(
            days.into_iter()
                .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
                .map(|date| date.and_time(start.time()))
                .collect(),
        )
    }

    fn year_days(&self, n: i64) -> Option<Vec<NaiveDateTime>> {
        let start = self.dtstart;
        let year = start.year().checked_add(i32::try_from(n).ok()?)?;
        let months = if self.rule.by_month.is_empty() {
            vec![start.month()]
        } else {
            self.rule.by_month.iter().map(|&m| u32::from(m)).collect()
        };

        Some(
            months
                .into_iter()
                .filter_map(|month| NaiveDate::from_ymd_opt(year, month, start.day()))
                .map(|date| date.and_time(start.time()))
                .collect(),
        )
    }
}

/// Period length of frequencies whose periods never vary on a fixed-offset clock.
fn fixed_step(freq: Frequency) -> Option<TimeDelta> {
    match freq {
        Frequency::Secondly => TimeDelta::try_seconds(1),
        Frequency::Minutely => TimeDelta::try_minutes(1),
        Frequency::Hourly => TimeDelta::try_hours(1),
        Frequency::Daily => TimeDelta::try_days(1),
        Frequency::Weekly => TimeDelta::try_weeks(1),
        Frequency::Monthly | Frequency::Yearly => None,
    }
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    (28..=31)
        .rev()
        .find(|&day| NaiveDate::from_ymd_opt(year, month, day).is_some())
}
