//! Program locations and diagnostic source ranges.

use std::fmt;

use crate::Address;

/// Where a composite type was declared.
///
/// The location prefixes composite type IDs, so two composites with the same
/// qualified identifier from different locations are different types.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Location {
    /// Types built into the runtime (`PublicKey`, `SignatureAlgorithm`).
    /// Their type ID is the bare qualified identifier.
    Builtin,
    /// A script or transaction identified by an arbitrary string.
    String(String),
    /// A location named by a plain identifier.
    Identifier(String),
    /// A contract deployed to an account.
    Address { address: Address, name: String },
}

impl Location {
    /// Create a string location.
    pub fn string(s: impl Into<String>) -> Self {
        Location::String(s.into())
    }

    /// Create an identifier location.
    pub fn identifier(s: impl Into<String>) -> Self {
        Location::Identifier(s.into())
    }

    /// The type ID of `qualified_identifier` declared at this location.
    ///
    /// `S.test.Foo`, `I.A.X`, `A.0000000000000001.Vault.Receiver`, or the bare
    /// identifier for builtin types.
    pub fn type_id(&self, qualified_identifier: &str) -> String {
        match self {
            Location::Builtin => qualified_identifier.to_string(),
            Location::String(s) => format!("S.{s}.{qualified_identifier}"),
            Location::Identifier(s) => format!("I.{s}.{qualified_identifier}"),
            Location::Address { address, .. } => {
                format!("A.{}.{qualified_identifier}", address.hex())
            }
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Builtin => Ok(()),
            Location::String(s) => write!(f, "S.{s}"),
            Location::Identifier(s) => write!(f, "I.{s}"),
            Location::Address { address, name } => write!(f, "A.{}.{name}", address.hex()),
        }
    }
}

/// Byte span within a source file.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Dummy span for values created outside any program.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    /// Create a new span.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Check if span is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Source range of the operation being performed, for diagnostics only.
///
/// Value operations accept a range so that errors they report can point at
/// the inducing expression. It never affects data or control flow.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct LocationRange {
    pub location: Option<Location>,
    pub span: Span,
}

impl LocationRange {
    /// A range that points nowhere. Used by callers outside program evaluation.
    pub const EMPTY: LocationRange = LocationRange {
        location: None,
        span: Span::DUMMY,
    };

    /// Create a range within `location`.
    pub fn new(location: Location, span: Span) -> Self {
        LocationRange {
            location: Some(location),
            span,
        }
    }
}

impl fmt::Display for LocationRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{location}:{}", self.span),
            None => write!(f, "<unknown>:{}", self.span),
        }
    }
}

#[cfg(test)]
mod tests;
