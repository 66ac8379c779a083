//! Filtered `BEGIN`/`END` block parser (RFC 5545 §3.4-3.6).
//!
//! Builds [`Component`] trees from a [`LineStream`], asking a [`Filter`]
//! which blocks and properties to keep. Rejected blocks are still read to
//! their `END` so the stream stays positioned, but nothing inside them is
//! retained.

use std::io::BufRead;

use almanac_core::constants::{
    DAYLIGHT, DTEND, DTSTAMP, DTSTART, DURATION, RRULE, STANDARD, SUMMARY, TZID, TZNAME,
    TZOFFSETFROM, TZOFFSETTO, UID, VCALENDAR, VEVENT, VTIMEZONE,
};

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::stream::LineStream;
use crate::rfc::ical::core::Component;

/// Decides which parts of the input become part of the parsed tree.
///
/// Called with `(name, None)` when a block named `name` begins and with
/// `(block, Some(property))` for every property line inside a kept block.
/// Implementations must be deterministic for the duration of a parse.
pub trait Filter {
    /// Returns whether the block or property should be kept.
    fn accept(&self, component: &str, property: Option<&str>) -> bool;
}

impl<F> Filter for F
where
    F: Fn(&str, Option<&str>) -> bool,
{
    fn accept(&self, component: &str, property: Option<&str>) -> bool {
        self(component, property)
    }
}

/// Keeps every block and property.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl Filter for AcceptAll {
    fn accept(&self, _component: &str, _property: Option<&str>) -> bool {
        true
    }
}

/// Keeps exactly what calendar loading reads.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarFilter;

impl Filter for CalendarFilter {
    fn accept(&self, component: &str, property: Option<&str>) -> bool {
        match (component, property) {
            (VCALENDAR | VTIMEZONE | STANDARD | DAYLIGHT | VEVENT, None) => true,
            (VTIMEZONE, Some(prop)) => prop == TZID,
            (STANDARD | DAYLIGHT, Some(prop)) => {
                matches!(prop, TZOFFSETFROM | TZOFFSETTO | TZNAME)
            }
            (VEVENT, Some(prop)) => matches!(
                prop,
                SUMMARY | DTSTAMP | DTSTART | DTEND | DURATION | RRULE | UID
            ),
            _ => false,
        }
    }
}

/// Streaming block parser over content lines.
#[derive(Debug)]
pub struct ObjectStream<R, F = AcceptAll> {
    lines: LineStream<R>,
    filter: F,
    /// Blocks returned before their children were read, innermost last.
    open: Vec<String>,
    started: bool,
}

impl<R: BufRead, F: Filter> ObjectStream<R, F> {
    /// Creates a parser reading from `reader` and keeping what `filter` accepts.
    #[must_use]
    pub const fn new(reader: R, filter: F) -> Self {
        Self {
            lines: LineStream::new(reader),
            filter,
            open: Vec::new(),
            started: false,
        }
    }

    /// Reads the next line, which must open or close a block.
    ///
    /// Returns the upper-cased name of a block that begins, or `None` when
    /// the current level ends.
    ///
    /// ## Errors
    /// - [`ParseErrorKind::EmptyStream`] if the input holds no lines at all
    /// - [`ParseErrorKind::UnexpectedEof`] if input ends here
    /// - [`ParseErrorKind::ExpectedBegin`] for a property line
    /// - [`ParseErrorKind::MismatchedComponent`] if the `END` does not close the open block
    pub fn next_object_name(&mut self) -> ParseResult<Option<String>> {
        let Some(line) = self.lines.next()? else {
            let kind = if self.started {
                ParseErrorKind::UnexpectedEof
            } else {
                ParseErrorKind::EmptyStream
            };
            tracing::error!(%kind, "Input ended while a block was expected");
            return Err(ParseError::new(kind, self.lines.line_number()));
        };
        self.started = true;
        let line_num = self.lines.line_number();

        if line.is_begin() {
            return Ok(Some(line.value.to_ascii_uppercase()));
        }

        if line.is_end() {
            let found = line.value.to_ascii_uppercase();
            if let Some(expected) = self.open.pop()
                && expected != found
            {
                tracing::error!(line = line_num, %expected, %found, "Mismatched END");
                return Err(mismatch(&expected, &found, line_num));
            }
            return Ok(None);
        }

        tracing::error!(line = line_num, name = %line.name, "Expected BEGIN");
        Err(ParseError::new(ParseErrorKind::ExpectedBegin, line_num).with_context(line.to_string()))
    }

    /// Returns the next block at the current level that the filter keeps.
    ///
    /// With `recurse` set, nested blocks are parsed and attached. Without it,
    /// the block is returned as soon as its first nested `BEGIN` is reached;
    /// its children are then read with further calls, and [`Self::has_open`]
    /// reports it as open until its `END` is consumed.
    ///
    /// ## Errors
    /// Returns an error on any structural or tokenizing failure.
    pub fn next_object(&mut self, recurse: bool) -> ParseResult<Option<Component>> {
        loop {
            let Some(name) = self.next_object_name()? else {
                return Ok(None);
            };

            let mut node = self.materialize(&name);
            let closed = self.load_object(&name, node.as_mut(), recurse)?;
            if !closed {
                self.open.push(name);
            }

            if let Some(node) = node {
                return Ok(Some(node));
            }
        }
    }

    /// ## Summary
    /// Reads the outermost block, which must be called `name`.
    ///
    /// The block is returned at its first nested `BEGIN`, like
    /// `next_object(false)`, and is kept whatever the filter says about it.
    ///
    /// ## Errors
    /// - [`ParseErrorKind::EmptyStream`] for empty input
    /// - [`ParseErrorKind::MissingRoot`] if the first block has another name
    pub fn next_root(&mut self, name: &str) -> ParseResult<Component> {
        let found = self.next_object_name()?;
        if found.as_deref() != Some(name) {
            let line_num = self.lines.line_number();
            tracing::error!(line = line_num, expected = name, ?found, "Missing root block");
            return Err(ParseError::new(ParseErrorKind::MissingRoot, line_num)
                .with_context(format!("expected BEGIN:{name}")));
        }

        let mut root = Component::new(name).at_line(self.lines.line_number());
        if !self.load_object(name, Some(&mut root), false)? {
            self.open.push(name.to_string());
        }
        Ok(root)
    }

    /// Returns whether a block returned early is still awaiting its `END`.
    #[must_use]
    pub fn has_open(&self) -> bool {
        !self.open.is_empty()
    }

    fn materialize(&self, name: &str) -> Option<Component> {
        if self.filter.accept(name, None) {
            tracing::trace!(component = name, "Use component");
            Some(Component::new(name).at_line(self.lines.line_number()))
        } else {
            tracing::trace!(component = name, "Ignore component");
            None
        }
    }

    /// Reads the body of block `name` up to its `END`.
    ///
    /// Returns `false` if it stopped early at a nested `BEGIN`, which is left
    /// pending in the stream.
    fn load_object(
        &mut self,
        name: &str,
        mut node: Option<&mut Component>,
        recurse: bool,
    ) -> ParseResult<bool> {
        loop {
            let Some(line) = self.lines.next()? else {
                tracing::error!(component = name, "Unexpected end of input");
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedEof,
                    self.lines.line_number(),
                )
                .with_context(format!("missing END:{name}")));
            };

            if line.is_begin() {
                self.lines.repeat_line(line);
                if !recurse && node.is_some() {
                    return Ok(false);
                }

                let Some(child_name) = self.next_object_name()? else {
                    continue;
                };
                let mut child = self.materialize(&child_name);
                self.load_object(&child_name, child.as_mut(), true)?;
                if let (Some(parent), Some(child)) = (node.as_deref_mut(), child) {
                    parent.add_child(child);
                }
            } else if line.is_end() {
                let found = line.value.to_ascii_uppercase();
                if found != name {
                    let line_num = self.lines.line_number();
                    tracing::error!(line = line_num, expected = name, %found, "Mismatched END");
                    return Err(mismatch(name, &found, line_num));
                }
                tracing::trace!(component = name, "Component END");
                return Ok(true);
            } else if let Some(parent) = node.as_deref_mut()
                && self.filter.accept(name, Some(&line.name))
            {
                tracing::trace!(component = name, property = %line.name, "Use line");
                parent.add_property(line);
            } else {
                tracing::trace!(component = name, property = %line.name, "Ignore line");
            }
        }
    }
}

fn mismatch(expected: &str, found: &str, line_num: usize) -> ParseError {
    ParseError::new(ParseErrorKind::MismatchedComponent, line_num)
        .with_context(format!("expected END:{expected}, got END:{found}"))
}
