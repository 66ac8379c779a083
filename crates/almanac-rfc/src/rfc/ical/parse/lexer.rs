//! Content line tokenizer for iCalendar (RFC 5545 §3.1).

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::ContentLine;

/// Parses a single unfolded content line.
///
/// Format: `name *(";" param) ":" value`
///
/// Parameters are not modeled; the text between the name and the value
/// separator is kept verbatim. A `:` inside a double-quoted parameter value
/// does not end the parameters.
///
/// ## Errors
/// Returns an error if the name is missing or contains invalid characters,
/// a quoted parameter value is not closed, or there is no value separator.
pub fn parse_content_line(line: &str, line_num: usize) -> ParseResult<ContentLine> {
    let name_end = line.find([';', ':']).unwrap_or(line.len());

    if name_end == 0 {
        return Err(ParseError::new(ParseErrorKind::MissingPropertyName, line_num));
    }

    let name = &line[..name_end];
    if let Some(bad) = name.chars().find(|c| !c.is_ascii_alphanumeric() && *c != '-') {
        return Err(ParseError::new(ParseErrorKind::InvalidPropertyName, line_num)
            .with_context(format!("unexpected character '{bad}' in '{name}'")));
    }

    let rest = &line[name_end..];
    let colon = if rest.starts_with(';') {
        find_value_separator(rest, line_num)?
    } else {
        rest.find(':')
    }
    .ok_or_else(|| ParseError::new(ParseErrorKind::MissingColon, line_num))?;

    let raw_params = rest.get(1..colon).unwrap_or_default();
    let value = &rest[colon + 1..];

    Ok(ContentLine::with_params(name, raw_params, value).at_line(line_num))
}

/// Finds the first `:` outside a quoted parameter value.
fn find_value_separator(params: &str, line_num: usize) -> ParseResult<Option<usize>> {
    let mut in_quotes = false;
    for (i, c) in params.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ':' if !in_quotes => return Ok(Some(i)),
            _ => {}
        }
    }

    if in_quotes {
        return Err(ParseError::new(ParseErrorKind::UnclosedQuote, line_num));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_line() {
        let result = parse_content_line("SUMMARY:Team Meeting", 1).unwrap();
        assert_eq!(result.name, "SUMMARY");
        assert!(result.raw_params.is_empty());
        assert_eq!(result.value, "Team Meeting");
        assert_eq!(result.line, 1);
    }

    #[test]
    fn parsed_line_remembers_its_position() {
        let result = parse_content_line("DTSTART:20240101T090000Z", 17).unwrap();
        assert_eq!(result.line, 17);
        assert_eq!(ContentLine::new("DTSTART", "20240101T090000Z").line, 0);
    }

    #[test]
    fn parse_line_with_params() {
        let result = parse_content_line("DTSTART;TZID=America/New_York:20260123T120000", 1).unwrap();
        assert_eq!(result.name, "DTSTART");
        assert_eq!(result.raw_params, "TZID=America/New_York");
        assert_eq!(result.tzid(), Some("America/New_York"));
        assert_eq!(result.value, "20260123T120000");
    }

    #[test]
    fn parse_line_with_quoted_colon() {
        let result =
            parse_content_line("ATTENDEE;CN=\"Doe: Jane\":mailto:jane@example.com", 1).unwrap();
        assert_eq!(result.raw_params, "CN=\"Doe: Jane\"");
        assert_eq!(result.param("CN"), Some("Doe: Jane"));
        assert_eq!(result.value, "mailto:jane@example.com");
    }

    #[test]
    fn name_is_uppercased_and_value_kept() {
        let result = parse_content_line("begin:vevent", 1).unwrap();
        assert_eq!(result.name, "BEGIN");
        assert_eq!(result.value, "vevent");

        let empty = parse_content_line("SUMMARY:", 1).unwrap();
        assert_eq!(empty.value, "");
    }

    #[test]
    fn parse_line_unclosed_quote() {
        let err = parse_content_line("ATTENDEE;CN=\"Unclosed:mailto:test@example.com", 4).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnclosedQuote);
        assert_eq!(err.line, 4);
    }

    #[test]
    fn parse_line_missing_colon() {
        let err = parse_content_line("INVALID", 2).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingColon);

        let err = parse_content_line("DTSTART;TZID=UTC", 2).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingColon);
    }

    #[test]
    fn parse_line_bad_name() {
        let err = parse_content_line(":value", 1).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingPropertyName);

        let err = parse_content_line("SUM MARY:x", 1).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidPropertyName);
    }
}
