use thiserror::Error;

use crate::rfc::ical::parse::ParseError;

/// RFC parsing and expansion errors
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),

    #[error("Value error: {0}")]
    ValueError(String),

    #[error("Recurrence error: {0}")]
    RecurrenceError(String),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
