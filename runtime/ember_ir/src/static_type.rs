//! Static types: the declared type of a value slot.
//!
//! Static types are assigned at check time and carried by containers (their
//! element/key/value types), references (their borrowed type), capabilities,
//! links and type values. They are never inferred from contents at runtime;
//! that is the job of dynamic types.

use std::fmt;

use crate::Location;

/// Generates `PrimitiveStaticType` with its display names.
macro_rules! define_primitive_static_types {
    ($( $variant:ident => $name:literal ),+ $(,)?) => {
        /// Built-in, non-parameterised static types.
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        pub enum PrimitiveStaticType {
            $( $variant, )+
        }

        impl PrimitiveStaticType {
            /// The type's name as written in programs.
            pub const fn name(self) -> &'static str {
                match self {
                    $( PrimitiveStaticType::$variant => $name, )+
                }
            }
        }
    };
}

define_primitive_static_types! {
    Void => "Void",
    Any => "Any",
    Never => "Never",
    AnyStruct => "AnyStruct",
    AnyResource => "AnyResource",
    Bool => "Bool",
    Address => "Address",
    String => "String",
    Character => "Character",
    MetaType => "Type",
    Block => "Block",
    Number => "Number",
    SignedNumber => "SignedNumber",
    Integer => "Integer",
    SignedInteger => "SignedInteger",
    FixedPoint => "FixedPoint",
    SignedFixedPoint => "SignedFixedPoint",
    Int => "Int",
    Int8 => "Int8",
    Int16 => "Int16",
    Int32 => "Int32",
    Int64 => "Int64",
    Int128 => "Int128",
    Int256 => "Int256",
    UInt => "UInt",
    UInt8 => "UInt8",
    UInt16 => "UInt16",
    UInt32 => "UInt32",
    UInt64 => "UInt64",
    UInt128 => "UInt128",
    UInt256 => "UInt256",
    Word8 => "Word8",
    Word16 => "Word16",
    Word32 => "Word32",
    Word64 => "Word64",
    Fix64 => "Fix64",
    UFix64 => "UFix64",
    Path => "Path",
    StoragePath => "StoragePath",
    CapabilityPath => "CapabilityPath",
    PublicPath => "PublicPath",
    PrivatePath => "PrivatePath",
    Capability => "Capability",
}

impl fmt::Display for PrimitiveStaticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A declared static type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum StaticType {
    Primitive(PrimitiveStaticType),
    /// `T?`
    Optional(Box<StaticType>),
    /// `[T]`
    VariableSized(Box<StaticType>),
    /// `[T; N]`
    ConstantSized { element: Box<StaticType>, size: u64 },
    /// `{K: V}`
    Dictionary {
        key: Box<StaticType>,
        value: Box<StaticType>,
    },
    /// A user-declared or builtin composite type.
    Composite {
        location: Location,
        qualified_identifier: String,
    },
    /// `&T` or `auth &T`
    Reference {
        authorized: bool,
        borrowed: Box<StaticType>,
    },
    /// `Capability` or `Capability<T>`
    Capability(Option<Box<StaticType>>),
}

impl StaticType {
    /// `[T]`
    pub fn variable_sized(element: impl Into<StaticType>) -> Self {
        StaticType::VariableSized(Box::new(element.into()))
    }

    /// `[T; N]`
    pub fn constant_sized(element: impl Into<StaticType>, size: u64) -> Self {
        StaticType::ConstantSized {
            element: Box::new(element.into()),
            size,
        }
    }

    /// `{K: V}`
    pub fn dictionary(key: impl Into<StaticType>, value: impl Into<StaticType>) -> Self {
        StaticType::Dictionary {
            key: Box::new(key.into()),
            value: Box::new(value.into()),
        }
    }

    /// `T?`
    pub fn optional(inner: impl Into<StaticType>) -> Self {
        StaticType::Optional(Box::new(inner.into()))
    }

    /// `&T` / `auth &T`
    pub fn reference(authorized: bool, borrowed: impl Into<StaticType>) -> Self {
        StaticType::Reference {
            authorized,
            borrowed: Box::new(borrowed.into()),
        }
    }

    /// Composite type declared at `location`.
    pub fn composite(location: Location, qualified_identifier: impl Into<String>) -> Self {
        StaticType::Composite {
            location,
            qualified_identifier: qualified_identifier.into(),
        }
    }

    /// `[UInt8]`, the type of raw byte arrays (block IDs, public keys).
    pub fn byte_array() -> Self {
        Self::variable_sized(PrimitiveStaticType::UInt8)
    }

    /// Element type of an array type, if this is one.
    pub fn element_type(&self) -> Option<&StaticType> {
        match self {
            StaticType::VariableSized(element) | StaticType::ConstantSized { element, .. } => {
                Some(element)
            }
            _ => None,
        }
    }
}

impl From<PrimitiveStaticType> for StaticType {
    fn from(primitive: PrimitiveStaticType) -> Self {
        StaticType::Primitive(primitive)
    }
}

impl fmt::Display for StaticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaticType::Primitive(primitive) => write!(f, "{primitive}"),
            StaticType::Optional(inner) => write!(f, "{inner}?"),
            StaticType::VariableSized(element) => write!(f, "[{element}]"),
            StaticType::ConstantSized { element, size } => write!(f, "[{element}; {size}]"),
            StaticType::Dictionary { key, value } => write!(f, "{{{key}: {value}}}"),
            StaticType::Composite {
                location,
                qualified_identifier,
            } => f.write_str(&location.type_id(qualified_identifier)),
            StaticType::Reference {
                authorized,
                borrowed,
            } => {
                if *authorized {
                    write!(f, "auth &{borrowed}")
                } else {
                    write!(f, "&{borrowed}")
                }
            }
            StaticType::Capability(None) => write!(f, "Capability"),
            StaticType::Capability(Some(borrow)) => write!(f, "Capability<{borrow}>"),
        }
    }
}

#[cfg(test)]
mod tests;
