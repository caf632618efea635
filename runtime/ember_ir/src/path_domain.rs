//! Path domains.

use std::fmt;

/// The domain a path value lives in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathDomain {
    Storage,
    Private,
    Public,
}

impl PathDomain {
    /// Every domain a path can name, in declaration order.
    pub const ALL: [PathDomain; 3] = [PathDomain::Storage, PathDomain::Private, PathDomain::Public];

    /// The keyword form used in path literals (`/storage/foo`).
    pub const fn identifier(self) -> &'static str {
        match self {
            PathDomain::Storage => "storage",
            PathDomain::Private => "private",
            PathDomain::Public => "public",
        }
    }

    /// The internal tag name of the domain (`PathDomainStorage`).
    ///
    /// Dictionary key strings for paths are built from this spelling rather
    /// than [`PathDomain::identifier`]. Stored dictionaries depend on it, so it
    /// must not be changed to match the literal form.
    pub const fn tag_name(self) -> &'static str {
        match self {
            PathDomain::Storage => "PathDomainStorage",
            PathDomain::Private => "PathDomainPrivate",
            PathDomain::Public => "PathDomainPublic",
        }
    }

    /// Look up a domain by its keyword form.
    pub fn from_identifier(identifier: &str) -> Option<PathDomain> {
        Self::ALL
            .into_iter()
            .find(|domain| domain.identifier() == identifier)
    }
}

impl fmt::Display for PathDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

#[cfg(test)]
mod tests;
