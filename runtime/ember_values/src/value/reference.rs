//! Reference values.

use std::sync::Arc;

use ember_ir::{Address, StaticType};

use super::{PathValue, Value};
use crate::ReferenceId;

struct ReferenceTarget {
    authorized: bool,
    value: Value,
    borrowed_type: Option<StaticType>,
}

/// A non-owning pointer to a live value.
///
/// The referenced value is shared, not moved: references never take part in
/// ownership transfer, deep copy or destruction. A reference may point at a
/// container that (directly or indirectly) holds the reference itself.
///
/// Clones are the same reference. Equality and hashing use the reference's
/// identity; [`Value::equal`] compares the target's identity instead.
#[derive(Clone)]
pub struct EphemeralReferenceValue {
    target: Arc<ReferenceTarget>,
}

impl EphemeralReferenceValue {
    pub fn new(authorized: bool, value: Value, borrowed_type: Option<StaticType>) -> Self {
        EphemeralReferenceValue {
            target: Arc::new(ReferenceTarget {
                authorized,
                value,
                borrowed_type,
            }),
        }
    }

    /// Identity of this reference, stable across clones.
    #[inline]
    pub fn id(&self) -> ReferenceId {
        ReferenceId::of(&self.target)
    }

    #[inline]
    pub fn authorized(&self) -> bool {
        self.target.authorized
    }

    /// The referenced value.
    #[inline]
    pub fn value(&self) -> &Value {
        &self.target.value
    }

    #[inline]
    pub fn borrowed_type(&self) -> Option<&StaticType> {
        self.target.borrowed_type.as_ref()
    }

    /// `&T` (or `auth &T`) where `T` is the borrowed type, falling back to
    /// the target's own static type.
    pub fn static_type(&self) -> Option<StaticType> {
        let borrowed = match &self.target.borrowed_type {
            Some(borrowed) => borrowed.clone(),
            None => self.target.value.static_type()?,
        };
        Some(StaticType::reference(self.target.authorized, borrowed))
    }
}

impl PartialEq for EphemeralReferenceValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.target, &other.target)
    }
}

impl Eq for EphemeralReferenceValue {}

impl std::hash::Hash for EphemeralReferenceValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl std::fmt::Debug for EphemeralReferenceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EphemeralReferenceValue")
            .field("id", &self.id())
            .field("authorized", &self.target.authorized)
            .field("borrowed_type", &self.target.borrowed_type)
            .finish_non_exhaustive()
    }
}

/// A pointer to a value stored in an account under a path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StorageReferenceValue {
    pub authorized: bool,
    pub target_storage_address: Address,
    pub target_path: PathValue,
    pub borrowed_type: Option<StaticType>,
}

impl StorageReferenceValue {
    pub fn static_type(&self) -> Option<StaticType> {
        self.borrowed_type
            .clone()
            .map(|borrowed| StaticType::reference(self.authorized, borrowed))
    }
}
