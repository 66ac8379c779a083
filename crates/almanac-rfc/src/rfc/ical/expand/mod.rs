//! Timezone resolution and recurrence expansion for calendar events.
//!
//! Expansion is limited to the RRULE subset accepted by
//! [`parse_rrule`](crate::rfc::ical::parse::parse_rrule) and to one static
//! offset per timezone.

pub mod expander;
pub mod rrule;
pub mod timezone;

pub use expander::EventIter;
pub use rrule::{MAX_EMPTY_PERIODS, Recurrence};
pub use timezone::TzMap;
