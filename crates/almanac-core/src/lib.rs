//! Shared configuration, errors and names for the almanac crates.

pub mod config;
pub mod constants;
pub mod error;
