//! Runtime values for the Ember interpreter.
//!
//! # Handles and Storage
//!
//! `Value` is cheap to clone. Scalars are inline or behind a [`Heap`];
//! arrays, dictionaries and composites are handles (a [`SlabId`] plus a weak
//! pointer to the storage that holds the slab). Cloning a container value
//! clones the handle, not the contents, so two clones observe each other's
//! mutations. Use [`Value::deep_copy`] for an independent graph.
//!
//! Storage is held weakly. The strong reference belongs to whoever created
//! the storage (usually the interpreter); a handle that outlives its storage
//! reports [`ValueError::StorageReleased`] instead of keeping it alive through
//! the values stored inside it.
//!
//! # Identity vs. Equality
//!
//! The derived `PartialEq`/`Hash` on `Value` compare containers by slab
//! identity, which keeps every variant hashable. Language equality, which
//! looks at contents, is [`Value::equal`].

mod array;
mod block;
mod composite;
mod dictionary;
mod heap;
mod number;
mod path;
mod reference;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};

use ember_ir::{Address, PathDomain, PrimitiveStaticType, StaticType};
use ember_storage::{SlabId, SlabStorage};

use crate::{ValueError, ValueResult};

pub use array::ArrayValue;
pub use block::BlockValue;
pub use composite::{CompositeStringer, CompositeValue, ENUM_RAW_VALUE_FIELD_NAME};
pub use dictionary::DictionaryValue;
pub use heap::Heap;
pub use number::{NumberValue, FIX64_SCALE};
pub use path::{CapabilityValue, LinkValue, PathValue, TypeValue};
pub use reference::{EphemeralReferenceValue, StorageReferenceValue};

/// Storage shared by all containers of one interpreter.
pub type SharedValueStorage = Arc<dyn SlabStorage<Value>>;

/// A slab handle: the slab ID plus a weak pointer to its storage.
///
/// Two handles are equal when they name the same slab in the same storage.
#[derive(Clone)]
pub(crate) struct SlabRef {
    storage: Weak<dyn SlabStorage<Value>>,
    id: SlabId,
}

impl SlabRef {
    pub(crate) fn new(storage: &SharedValueStorage, id: SlabId) -> Self {
        SlabRef {
            storage: Arc::downgrade(storage),
            id,
        }
    }

    #[inline]
    pub(crate) fn id(&self) -> SlabId {
        self.id
    }

    /// The storage holding this slab, if it is still alive.
    pub(crate) fn storage(&self) -> ValueResult<SharedValueStorage> {
        self.storage
            .upgrade()
            .ok_or(ValueError::StorageReleased(self.id))
    }

    pub(crate) fn owner(&self) -> ValueResult<Address> {
        Ok(self.storage()?.owner(self.id)?)
    }
}

impl PartialEq for SlabRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && Weak::ptr_eq(&self.storage, &other.storage)
    }
}

impl Eq for SlabRef {}

impl Hash for SlabRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for SlabRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slab {}", self.id)
    }
}

/// Runtime value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    // Scalars
    /// The unit value, `()`.
    Void,
    Bool(bool),
    /// Optional: absent.
    Nil,
    /// Optional: present.
    Some(Heap<Value>),
    String(Heap<String>),
    Address(Address),
    Number(NumberValue),

    // Storage-backed
    Array(ArrayValue),
    Dictionary(DictionaryValue),
    Composite(CompositeValue),

    // Non-owning
    /// Pointer to a live value. May form cycles.
    EphemeralReference(EphemeralReferenceValue),
    /// Pointer to a value inside account storage.
    StorageReference(StorageReferenceValue),
    Capability(CapabilityValue),
    Link(LinkValue),
    Path(PathValue),
    /// A static type as a first-class value.
    Type(TypeValue),
    Block(BlockValue),
}

// Factory methods

impl Value {
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Heap::new(s.into()))
    }

    #[inline]
    pub fn some(v: Value) -> Self {
        Value::Some(Heap::new(v))
    }

    /// Wrap `Some(v)` or `Nil`.
    pub fn optional(v: Option<Value>) -> Self {
        match v {
            Some(v) => Value::some(v),
            None => Value::Nil,
        }
    }

    /// Arbitrary-precision `Int` from a machine integer.
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Number(NumberValue::int(n))
    }

    #[inline]
    pub fn path(domain: PathDomain, identifier: impl Into<String>) -> Self {
        Value::Path(PathValue::new(domain, identifier))
    }

    /// A `Type` value wrapping `static_type`.
    #[inline]
    pub fn meta_type(static_type: impl Into<StaticType>) -> Self {
        Value::Type(TypeValue::new(Some(static_type.into())))
    }
}

impl From<NumberValue> for Value {
    fn from(n: NumberValue) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<ArrayValue> for Value {
    fn from(array: ArrayValue) -> Self {
        Value::Array(array)
    }
}

impl From<DictionaryValue> for Value {
    fn from(dictionary: DictionaryValue) -> Self {
        Value::Dictionary(dictionary)
    }
}

impl From<CompositeValue> for Value {
    fn from(composite: CompositeValue) -> Self {
        Value::Composite(composite)
    }
}

impl From<EphemeralReferenceValue> for Value {
    fn from(reference: EphemeralReferenceValue) -> Self {
        Value::EphemeralReference(reference)
    }
}

impl Value {
    /// Name of the value's kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Void => "Void",
            Value::Bool(_) => "Bool",
            Value::Nil | Value::Some(_) => "Optional",
            Value::String(_) => "String",
            Value::Address(_) => "Address",
            Value::Number(n) => n.static_type().name(),
            Value::Array(_) => "Array",
            Value::Dictionary(_) => "Dictionary",
            Value::Composite(_) => "Composite",
            Value::EphemeralReference(_) => "EphemeralReference",
            Value::StorageReference(_) => "StorageReference",
            Value::Capability(_) => "Capability",
            Value::Link(_) => "Link",
            Value::Path(_) => "Path",
            Value::Type(_) => "Type",
            Value::Block(_) => "Block",
        }
    }

    /// The static type describing this value, if it has one.
    ///
    /// Containers report their declared type. `Link` values carry no type
    /// of their own.
    pub fn static_type(&self) -> Option<StaticType> {
        let primitive = match self {
            Value::Void => PrimitiveStaticType::Void,
            Value::Bool(_) => PrimitiveStaticType::Bool,
            Value::Nil => return Some(StaticType::optional(PrimitiveStaticType::Never)),
            Value::Some(inner) => return inner.static_type().map(StaticType::optional),
            Value::String(_) => PrimitiveStaticType::String,
            Value::Address(_) => PrimitiveStaticType::Address,
            Value::Number(n) => n.static_type(),
            Value::Array(array) => return array.static_type().cloned(),
            Value::Dictionary(dictionary) => return dictionary.static_type().cloned(),
            Value::Composite(composite) => return Some(composite.static_type()),
            Value::EphemeralReference(reference) => return reference.static_type(),
            Value::StorageReference(reference) => return reference.static_type(),
            Value::Capability(capability) => {
                return Some(StaticType::Capability(
                    capability.borrow_type.clone().map(Box::new),
                ))
            }
            Value::Link(_) => return None,
            Value::Path(path) => path.static_type(),
            Value::Type(_) => PrimitiveStaticType::MetaType,
            Value::Block(_) => PrimitiveStaticType::Block,
        };
        Some(StaticType::Primitive(primitive))
    }

    /// Current owner of a container or composite; `None` for values that
    /// carry no owner.
    pub fn owner(&self) -> ValueResult<Option<Address>> {
        match self {
            Value::Array(array) => array.owner().map(Some),
            Value::Dictionary(dictionary) => dictionary.owner().map(Some),
            Value::Composite(composite) => composite.owner().map(Some),
            _ => Ok(None),
        }
    }

    /// Whether this value is (or wraps) a resource composite.
    pub fn is_resource(&self) -> bool {
        match self {
            Value::Composite(composite) => composite.is_resource(),
            Value::Some(inner) => inner.is_resource(),
            _ => false,
        }
    }
}
