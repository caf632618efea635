//! Addressing values: paths, capabilities, links and type values.

use std::fmt;

use ember_ir::{Address, PathDomain, PrimitiveStaticType, StaticType};

/// A storage path, `/<domain>/<identifier>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathValue {
    pub domain: PathDomain,
    pub identifier: String,
}

impl PathValue {
    pub fn new(domain: PathDomain, identifier: impl Into<String>) -> Self {
        PathValue {
            domain,
            identifier: identifier.into(),
        }
    }

    pub fn static_type(&self) -> PrimitiveStaticType {
        match self.domain {
            PathDomain::Storage => PrimitiveStaticType::StoragePath,
            PathDomain::Private => PrimitiveStaticType::PrivatePath,
            PathDomain::Public => PrimitiveStaticType::PublicPath,
        }
    }

    /// Key string form. Uses the domain's tag name rather than its keyword,
    /// so `/storage/foo` keys as `/PathDomainStorage/foo`.
    pub fn key_string(&self) -> String {
        format!("/{}/{}", self.domain.tag_name(), self.identifier)
    }
}

impl fmt::Display for PathValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.domain, self.identifier)
    }
}

/// A capability to a path in an account, optionally typed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CapabilityValue {
    pub address: Address,
    pub path: PathValue,
    pub borrow_type: Option<StaticType>,
}

impl fmt::Display for CapabilityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.borrow_type {
            Some(borrow_type) => write!(
                f,
                "Capability<{borrow_type}>(address: {}, path: {})",
                self.address, self.path
            ),
            None => write!(
                f,
                "Capability(address: {}, path: {})",
                self.address, self.path
            ),
        }
    }
}

/// A link from one path to another, with the linked type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LinkValue {
    pub target_path: PathValue,
    pub static_type: StaticType,
}

impl fmt::Display for LinkValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Link<{}>({})", self.static_type, self.target_path)
    }
}

/// A static type as a value. `None` is the unknown type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeValue {
    pub static_type: Option<StaticType>,
}

impl TypeValue {
    pub fn new(static_type: Option<StaticType>) -> Self {
        TypeValue { static_type }
    }
}

impl fmt::Display for TypeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.static_type {
            Some(static_type) => write!(f, "Type<{static_type}>()"),
            None => write!(f, "Type<>()"),
        }
    }
}
