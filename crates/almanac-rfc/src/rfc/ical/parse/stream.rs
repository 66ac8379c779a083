//! Content line stream with one line of pushback.

use std::io::BufRead;

use super::error::ParseResult;
use super::lexer::parse_content_line;
use super::reader::LineReader;
use crate::rfc::ical::core::ContentLine;

/// Tokenized content lines, with room to put the last one back.
///
/// Block boundaries need one line of lookahead: a parser that reads a
/// `BEGIN` it does not want to handle itself hands it back with
/// [`LineStream::repeat_line`].
#[derive(Debug)]
pub struct LineStream<R> {
    reader: LineReader<R>,
    pushback: Option<ContentLine>,
    line_num: usize,
}

impl<R: BufRead> LineStream<R> {
    /// Wraps a buffered reader.
    #[must_use]
    pub const fn new(inner: R) -> Self {
        Self {
            reader: LineReader::new(inner),
            pushback: None,
            line_num: 0,
        }
    }

    /// Returns the next content line; a line put back is returned first.
    ///
    /// ## Errors
    /// Returns an error if reading or tokenizing the next line fails.
    #[expect(
        clippy::should_implement_trait,
        reason = "fallible pull with pushback, not an Iterator"
    )]
    pub fn next(&mut self) -> ParseResult<Option<ContentLine>> {
        if let Some(line) = self.pushback.take() {
            return Ok(Some(line));
        }

        match self.reader.next_line()? {
            Some((line_num, text)) => {
                self.line_num = line_num;
                let line = parse_content_line(&text, line_num)?;
                tracing::trace!(line = line_num, name = %line.name, "Read content line");
                Ok(Some(line))
            }
            None => Ok(None),
        }
    }

    /// Puts `line` back so the next [`LineStream::next`] returns it again.
    ///
    /// ## Panics
    /// Panics if a line is already waiting to be replayed.
    pub fn repeat_line(&mut self, line: ContentLine) {
        assert!(
            self.pushback.is_none(),
            "repeat_line called twice without an intervening next"
        );
        self.pushback = Some(line);
    }

    /// Line number of the most recently read logical line.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        self.line_num
    }
}
