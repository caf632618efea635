//! Fixtures shared by the value tests.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use ember_ir::{Address, CompositeKind, Location, PrimitiveStaticType, StaticType};
use ember_storage::InMemoryStorage;

use crate::{CompositeValue, SharedValueStorage, Value};

pub(crate) const OLD_OWNER: Address = Address([0, 0, 0, 0, 0, 0, 0, 1]);
pub(crate) const NEW_OWNER: Address = Address([0, 0, 0, 0, 0, 0, 0, 2]);

pub(crate) fn new_storage() -> SharedValueStorage {
    Arc::new(InMemoryStorage::<Value>::new())
}

/// Storage that fails once `limit` slabs are live.
pub(crate) fn limited_storage(limit: usize) -> SharedValueStorage {
    Arc::new(InMemoryStorage::<Value>::with_slab_limit(limit))
}

pub(crate) fn test_location() -> Location {
    Location::string("test")
}

pub(crate) fn any_struct_array() -> Option<StaticType> {
    Some(StaticType::variable_sized(PrimitiveStaticType::AnyStruct))
}

pub(crate) fn string_to_any_struct() -> Option<StaticType> {
    Some(StaticType::dictionary(
        PrimitiveStaticType::String,
        PrimitiveStaticType::AnyStruct,
    ))
}

/// An empty `S.test.Test` structure owned by `owner`.
pub(crate) fn new_test_composite(storage: &SharedValueStorage, owner: Address) -> CompositeValue {
    CompositeValue::new(
        storage,
        test_location(),
        "Test",
        CompositeKind::Structure,
        Vec::new(),
        owner,
    )
    .unwrap()
}

/// A composite with the given fields, owned by the zero address.
pub(crate) fn new_composite(
    storage: &SharedValueStorage,
    identifier: &str,
    kind: CompositeKind,
    fields: Vec<(&str, Value)>,
) -> CompositeValue {
    CompositeValue::new(
        storage,
        test_location(),
        identifier,
        kind,
        fields
            .into_iter()
            .map(|(name, value)| (name.to_string(), value)),
        Address::ZERO,
    )
    .unwrap()
}

pub(crate) fn owner_of(value: &Value) -> Address {
    value.owner().unwrap().unwrap()
}
