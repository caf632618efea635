//! Composite kind tags.

use std::fmt;

/// The kind of a composite declaration.
///
/// Only [`CompositeKind::Resource`] carries single-ownership semantics; the
/// tag also participates in composite equality and conformance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CompositeKind {
    Structure,
    Resource,
    Contract,
    Enum,
    Event,
}

impl CompositeKind {
    /// The declaration keyword for this kind.
    pub const fn keyword(self) -> &'static str {
        match self {
            CompositeKind::Structure => "struct",
            CompositeKind::Resource => "resource",
            CompositeKind::Contract => "contract",
            CompositeKind::Enum => "enum",
            CompositeKind::Event => "event",
        }
    }

    /// Whether values of this kind are resources.
    #[inline]
    pub const fn is_resource(self) -> bool {
        matches!(self, CompositeKind::Resource)
    }
}

impl fmt::Display for CompositeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
