//! Dynamic types: the reified runtime type of a value.
//!
//! A dynamic type mirrors the shape of the value it was taken from but
//! carries only type information. Containers list the dynamic type of every
//! element; composites stop at their type identity. An ephemeral reference
//! records the dynamic type of its target, except when the reference is met
//! again while its own target is being reified, in which case the inner type
//! is left empty to cut the cycle.

use ember_ir::{CompositeKind, Location, PathDomain, PrimitiveStaticType, StaticType};
use ember_stack::ensure_sufficient_stack;

use crate::value::Value;
use crate::{SeenReferences, ValueResult};

/// Runtime-reified type of a value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DynamicType {
    Void,
    Nil,
    Some(Box<DynamicType>),
    Bool,
    String,
    Address,
    /// A number of the given kind.
    Number(PrimitiveStaticType),
    Array {
        element_types: Vec<DynamicType>,
        static_type: Option<StaticType>,
    },
    Dictionary {
        entry_types: Vec<(DynamicType, DynamicType)>,
        static_type: Option<StaticType>,
    },
    Composite {
        location: Location,
        qualified_identifier: String,
        kind: CompositeKind,
    },
    EphemeralReference(EphemeralReferenceDynamicType),
    StorageReference {
        authorized: bool,
        borrowed_type: Option<StaticType>,
    },
    Capability {
        borrow_type: Option<StaticType>,
    },
    Link,
    Path {
        domain: PathDomain,
    },
    /// The type of `Type` values.
    MetaType,
    Block,
}

/// Dynamic type of an ephemeral reference.
///
/// `inner` is `None` when the target could not be reified without
/// re-entering a reference already on the active path. The default value
/// (unauthorized, no inner type, no borrowed type) conforms to nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct EphemeralReferenceDynamicType {
    pub authorized: bool,
    pub inner: Option<Box<DynamicType>>,
    pub borrowed_type: Option<StaticType>,
}

impl Value {
    /// Reify this value's runtime type.
    ///
    /// Fails only when container contents cannot be read from storage.
    pub fn dynamic_type(&self, seen: &mut SeenReferences) -> ValueResult<DynamicType> {
        ensure_sufficient_stack(|| {
            Ok(match self {
                Value::Void => DynamicType::Void,
                Value::Nil => DynamicType::Nil,
                Value::Some(inner) => DynamicType::Some(Box::new(inner.dynamic_type(seen)?)),
                Value::Bool(_) => DynamicType::Bool,
                Value::String(_) => DynamicType::String,
                Value::Address(_) => DynamicType::Address,
                Value::Number(n) => DynamicType::Number(n.static_type()),
                Value::Array(array) => DynamicType::Array {
                    element_types: array
                        .elements()?
                        .iter()
                        .map(|element| element.dynamic_type(seen))
                        .collect::<ValueResult<_>>()?,
                    static_type: array.static_type().cloned(),
                },
                Value::Dictionary(dictionary) => DynamicType::Dictionary {
                    entry_types: dictionary
                        .entries()?
                        .iter()
                        .map(|(key, value)| -> ValueResult<_> {
                            Ok((key.dynamic_type(seen)?, value.dynamic_type(seen)?))
                        })
                        .collect::<ValueResult<_>>()?,
                    static_type: dictionary.static_type().cloned(),
                },
                Value::Composite(composite) => DynamicType::Composite {
                    location: composite.location().clone(),
                    qualified_identifier: composite.qualified_identifier().to_string(),
                    kind: composite.kind(),
                },
                Value::EphemeralReference(reference) => {
                    let inner = seen
                        .visit(reference.id(), |seen| reference.value().dynamic_type(seen))
                        .transpose()?
                        .map(Box::new);
                    DynamicType::EphemeralReference(EphemeralReferenceDynamicType {
                        authorized: reference.authorized(),
                        inner,
                        borrowed_type: reference.borrowed_type().cloned(),
                    })
                }
                Value::StorageReference(reference) => DynamicType::StorageReference {
                    authorized: reference.authorized,
                    borrowed_type: reference.borrowed_type.clone(),
                },
                Value::Capability(capability) => DynamicType::Capability {
                    borrow_type: capability.borrow_type.clone(),
                },
                Value::Link(_) => DynamicType::Link,
                Value::Path(path) => DynamicType::Path {
                    domain: path.domain,
                },
                Value::Type(_) => DynamicType::MetaType,
                Value::Block(_) => DynamicType::Block,
            })
        })
    }
}

#[cfg(test)]
mod tests;
