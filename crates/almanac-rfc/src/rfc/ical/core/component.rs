//! Parsed iCalendar block types (RFC 5545 §3.4-3.6).

use std::fmt;

use almanac_core::constants::{DAYLIGHT, STANDARD, VCALENDAR, VEVENT, VTIMEZONE};

use super::ContentLine;

/// Block kind for iCalendar.
///
/// Only the kinds the loader acts on are distinguished; every other block
/// (VTODO, VALARM, X-components, ...) is `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// VCALENDAR root container.
    Calendar,
    /// VEVENT component.
    Event,
    /// VTIMEZONE component.
    Timezone,
    /// STANDARD sub-component of VTIMEZONE.
    Standard,
    /// DAYLIGHT sub-component of VTIMEZONE.
    Daylight,
    /// Any other block.
    Unknown,
}

impl ComponentKind {
    /// Returns the string name for this component kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Calendar => VCALENDAR,
            Self::Event => VEVENT,
            Self::Timezone => VTIMEZONE,
            Self::Standard => STANDARD,
            Self::Daylight => DAYLIGHT,
            Self::Unknown => "X-UNKNOWN",
        }
    }

    /// Parses a component kind from a block name (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            VCALENDAR => Self::Calendar,
            VEVENT => Self::Event,
            VTIMEZONE => Self::Timezone,
            STANDARD => Self::Standard,
            DAYLIGHT => Self::Daylight,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed `BEGIN`/`END` block.
///
/// Holds only the properties and children the parse filter accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// Block kind.
    pub kind: ComponentKind,
    /// Block name as read (upper-cased; preserved for unknown blocks).
    pub name: String,
    /// Properties in order of appearance.
    pub properties: Vec<ContentLine>,
    /// Nested blocks in order of appearance.
    pub children: Vec<Component>,
    /// Logical line of the `BEGIN` line (0 when built by hand).
    pub line: usize,
}

impl Component {
    /// Creates an empty component for a block name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into().to_ascii_uppercase();
        Self {
            kind: ComponentKind::parse(&name),
            name,
            properties: Vec::new(),
            children: Vec::new(),
            line: 0,
        }
    }

    /// Records the logical line of the block's `BEGIN`.
    #[must_use]
    pub const fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// Adds a property to this component.
    pub fn add_property(&mut self, prop: ContentLine) {
        self.properties.push(prop);
    }

    /// Adds a child component.
    pub fn add_child(&mut self, child: Component) {
        self.children.push(child);
    }

    /// Returns the first property with the given name.
    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<&ContentLine> {
        self.properties
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Returns children of a specific kind.
    #[must_use]
    pub fn children_of_kind(&self, kind: ComponentKind) -> Vec<&Component> {
        self.children.iter().filter(|c| c.kind == kind).collect()
    }
}
