//! Folded line reader for iCalendar (RFC 5545 §3.1).
//!
//! Turns physical lines from a [`BufRead`] into unfolded logical lines, one
//! at a time.

use std::io::BufRead;

use super::error::{ParseError, ParseErrorKind, ParseResult};

/// Pull-based reader of unfolded logical lines.
///
/// Per RFC 5545 §3.1 a physical line starting with SPACE or HTAB continues
/// the previous logical line; the line break and that single whitespace
/// character are removed. A blank line ends the logical line before it, so
/// nothing is unfolded across one. Unfolding works on bytes because a fold
/// may split a UTF-8 sequence, and each logical line is decoded once complete.
#[derive(Debug)]
pub struct LineReader<R> {
    inner: R,
    /// Next physical line, read ahead to detect continuations.
    lookahead: Option<Vec<u8>>,
    /// Physical line number of `lookahead`.
    lookahead_num: usize,
    /// Number of physical lines consumed from `inner`.
    physical: usize,
    done: bool,
}

impl<R: BufRead> LineReader<R> {
    /// Wraps a buffered reader.
    #[must_use]
    pub const fn new(inner: R) -> Self {
        Self {
            inner,
            lookahead: None,
            lookahead_num: 0,
            physical: 0,
            done: false,
        }
    }

    /// Returns the next logical line with the physical line number it starts on.
    ///
    /// Blank physical lines are skipped. End of input is `Ok(None)`.
    ///
    /// ## Errors
    /// Returns [`ParseErrorKind::Io`] if the underlying reader fails and
    /// [`ParseErrorKind::InvalidContentLine`] if a logical line is not UTF-8.
    pub fn next_line(&mut self) -> ParseResult<Option<(usize, String)>> {
        let (line_num, mut logical) = match self.lookahead.take() {
            Some(line) => (self.lookahead_num, line),
            None => loop {
                match self.read_physical()? {
                    Some(line) if line.is_empty() => {}
                    Some(line) => break (self.physical, line),
                    None => return Ok(None),
                }
            },
        };

        // A continuation at the start of input or after a blank line opens its own line.
        if matches!(logical.first(), Some(b' ' | b'\t')) {
            logical.remove(0);
        }

        while let Some(next) = self.read_physical()? {
            match next.split_first() {
                Some((b' ' | b'\t', rest)) => logical.extend_from_slice(rest),
                None => break,
                Some(_) => {
                    self.lookahead = Some(next);
                    self.lookahead_num = self.physical;
                    break;
                }
            }
        }

        let text = String::from_utf8(logical).map_err(|e| {
            ParseError::new(ParseErrorKind::InvalidContentLine, line_num)
                .with_context(format!("invalid UTF-8: {e}"))
        })?;

        Ok(Some((line_num, text)))
    }

    /// Reads the next physical line with its terminator stripped.
    fn read_physical(&mut self) -> ParseResult<Option<Vec<u8>>> {
        if self.done {
            return Ok(None);
        }

        let mut buf = Vec::new();
        let read = self.inner.read_until(b'\n', &mut buf).map_err(|e| {
            ParseError::new(ParseErrorKind::Io, self.physical + 1).with_context(e.to_string())
        })?;

        if read == 0 {
            self.done = true;
            return Ok(None);
        }

        self.physical += 1;
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
        Ok(Some(buf))
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = ParseResult<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}
