//! Command-line front end: picks the input file and prints occurrences.

pub mod cli;
