//! iCalendar content line type (RFC 5545 §3.1).

use std::fmt;

use almanac_core::constants::{KW_BEGIN, KW_END, PARAM_TZID, PARAM_VALUE};

/// One unfolded `NAME[;PARAMS]:VALUE` line.
///
/// Parameters are kept as the verbatim text between the name and the value
/// separator; [`ContentLine::param`] reads single parameters on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// Property name (normalized to uppercase).
    pub name: String,
    /// Raw parameter text without the leading `;` (empty if none).
    pub raw_params: String,
    /// Raw value string (after unfolding, before unescaping).
    pub value: String,
    /// Logical line the property was read from (0 when built by hand).
    pub line: usize,
}

impl ContentLine {
    /// Creates a new content line without parameters.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_params(name, String::new(), value)
    }

    /// Creates a content line with raw parameter text.
    #[must_use]
    pub fn with_params(
        name: impl Into<String>,
        raw_params: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            raw_params: raw_params.into(),
            value: value.into(),
            line: 0,
        }
    }

    /// Records the logical line this property was read from.
    #[must_use]
    pub const fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// Returns the value of the first parameter called `name`, quotes stripped.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        let raw = self.raw_params.as_str();
        let mut start = 0;
        let mut in_quotes = false;

        for (i, c) in raw.char_indices() {
            match c {
                '"' => in_quotes = !in_quotes,
                ';' if !in_quotes => {
                    if let Some(value) = match_param(&raw[start..i], name) {
                        return Some(value);
                    }
                    start = i + 1;
                }
                _ => {}
            }
        }

        match_param(&raw[start..], name)
    }

    /// Returns the TZID parameter if present.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        self.param(PARAM_TZID)
    }

    /// Returns the VALUE parameter if present.
    #[must_use]
    pub fn value_type(&self) -> Option<&str> {
        self.param(PARAM_VALUE)
    }

    /// Returns whether this is a `BEGIN` line.
    #[must_use]
    pub fn is_begin(&self) -> bool {
        self.name == KW_BEGIN
    }

    /// Returns whether this is an `END` line.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.name == KW_END
    }
}

fn match_param<'a>(param: &'a str, name: &str) -> Option<&'a str> {
    let (key, value) = param.split_once('=')?;
    key.trim()
        .eq_ignore_ascii_case(name)
        .then(|| value.trim_matches('"'))
}

impl fmt::Display for ContentLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.raw_params.is_empty() {
            write!(f, ";{}", self.raw_params)?;
        }
        write!(f, ":{}", self.value)
    }
}
