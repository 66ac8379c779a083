//! iCalendar core models (RFC 5545).
//!
//! The parsed block tree and the typed property values the calendar loader
//! reads out of it.

mod component;
mod datetime;
mod duration;
mod property;
mod rrule;

pub use component::{Component, ComponentKind};
pub use datetime::{DateTime, DateTimeForm};
pub use duration::Duration;
pub use property::ContentLine;
pub use rrule::{Frequency, RRule, RRuleUntil, Weekday};
