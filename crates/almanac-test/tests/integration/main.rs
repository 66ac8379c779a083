//! End-to-end tests: text in, merged occurrences out.

mod config;
mod errors;
mod merge;
mod recurrence;
mod timezones;
