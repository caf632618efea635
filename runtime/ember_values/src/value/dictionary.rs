//! Storage-backed dictionaries.
//!
//! Entries live in an ordered-map slab keyed by a digest of the key: the
//! key's static type plus its key string. Two keys collide only when they
//! have the same kind and render the same key string, which is exactly when
//! they are equal. Iteration follows insertion order.

use std::fmt;

use ember_ir::{Address, LocationRange, StaticType};
use ember_storage::{MapEntry, SlabId};

use super::{SharedValueStorage, SlabRef, Value};
use crate::ownership;
use crate::{ValueError, ValueResult};

/// Handle to a key/value mapping held in an ordered-map slab.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DictionaryValue {
    static_type: Option<StaticType>,
    slab: SlabRef,
}

fn key_digest(key: &Value) -> Option<String> {
    let key_string = key.key_string()?;
    let kind = key.static_type()?;
    Some(format!("{kind}:{key_string}"))
}

fn checked_key_digest(key: &Value, location_range: &LocationRange) -> ValueResult<String> {
    key_digest(key).ok_or_else(|| ValueError::InvalidDictionaryKey {
        key: key.to_string(),
        location_range: location_range.clone(),
    })
}

impl DictionaryValue {
    /// Create an unrooted dictionary holding `entries`.
    ///
    /// Like [`ArrayValue::new`](super::ArrayValue::new), initial keys and
    /// values keep their current owner.
    pub fn new(
        storage: &SharedValueStorage,
        static_type: Option<StaticType>,
        entries: impl IntoIterator<Item = (Value, Value)>,
        location_range: &LocationRange,
    ) -> ValueResult<Self> {
        let dictionary = Self::allocate(storage, static_type, Address::ZERO)?;
        let storage = dictionary.slab.storage()?;
        for (key, value) in entries {
            let digest = checked_key_digest(&key, location_range)?;
            storage.map_set(dictionary.slab.id(), digest, MapEntry::new(key, value))?;
        }
        Ok(dictionary)
    }

    /// Create a dictionary owned by `address`, re-parenting every key and
    /// value to it.
    pub fn new_with_address(
        storage: &SharedValueStorage,
        static_type: Option<StaticType>,
        address: Address,
        entries: impl IntoIterator<Item = (Value, Value)>,
        location_range: &LocationRange,
    ) -> ValueResult<Self> {
        let dictionary = Self::allocate(storage, static_type, address)?;
        for (key, value) in entries {
            dictionary.insert(key, value, location_range)?;
        }
        Ok(dictionary)
    }

    fn allocate(
        storage: &SharedValueStorage,
        static_type: Option<StaticType>,
        owner: Address,
    ) -> ValueResult<Self> {
        let id = storage.new_ordered_map(owner)?;
        Ok(DictionaryValue {
            static_type,
            slab: SlabRef::new(storage, id),
        })
    }

    /// Declared static type, `None` when undeclared.
    #[inline]
    pub fn static_type(&self) -> Option<&StaticType> {
        self.static_type.as_ref()
    }

    #[inline]
    pub fn slab_id(&self) -> SlabId {
        self.slab.id()
    }

    pub(crate) fn slab(&self) -> &SlabRef {
        &self.slab
    }

    pub fn owner(&self) -> ValueResult<Address> {
        self.slab.owner()
    }

    pub fn count(&self) -> ValueResult<usize> {
        Ok(self.slab.storage()?.map_len(self.slab.id())?)
    }

    /// Snapshot of the entries in insertion order.
    pub fn entries(&self) -> ValueResult<Vec<(Value, Value)>> {
        let entries = self.slab.storage()?.map_entries(self.slab.id())?;
        Ok(entries
            .into_iter()
            .map(|entry| (entry.key, entry.value))
            .collect())
    }

    pub fn keys(&self) -> ValueResult<Vec<Value>> {
        Ok(self.entries()?.into_iter().map(|(key, _)| key).collect())
    }

    pub fn values(&self) -> ValueResult<Vec<Value>> {
        Ok(self.entries()?.into_iter().map(|(_, value)| value).collect())
    }

    /// Look up `key`. Keys that cannot key a dictionary are simply absent.
    pub fn get_key(&self, key: &Value) -> ValueResult<Option<Value>> {
        let Some(digest) = key_digest(key) else {
            return Ok(None);
        };
        let entry = self.slab.storage()?.map_get(self.slab.id(), &digest)?;
        Ok(entry.map(|entry| entry.value))
    }

    pub fn contains_key(&self, key: &Value) -> ValueResult<bool> {
        Ok(self.get_key(key)?.is_some())
    }

    /// Store `value` under `key`, re-parenting both to this dictionary's
    /// owner.
    ///
    /// Returns the replaced value as `Some(old)`, detached to the zero
    /// address, or `Nil` when the key was new. Replacing keeps the key
    /// already stored.
    pub fn insert(
        &self,
        key: Value,
        value: Value,
        location_range: &LocationRange,
    ) -> ValueResult<Value> {
        let digest = checked_key_digest(&key, location_range)?;
        let storage = self.slab.storage()?;
        let owner = storage.owner(self.slab.id())?;
        // An existing entry keeps its stored key; the new key stays unrooted.
        let key = match storage.map_get(self.slab.id(), &digest)? {
            Some(existing) => {
                ownership::set_owner(&key, Address::ZERO)?;
                existing.key
            }
            None => {
                ownership::set_owner(&key, owner)?;
                key
            }
        };
        ownership::set_owner(&value, owner)?;
        let previous = storage.map_set(self.slab.id(), digest, MapEntry::new(key, value))?;
        match previous {
            Some(entry) => {
                ownership::set_owner(&entry.value, Address::ZERO)?;
                Ok(Value::some(entry.value))
            }
            None => Ok(Value::Nil),
        }
    }

    /// Assign an optional: `Some(value)` inserts, `None` removes.
    ///
    /// Returns the prior value as a language optional either way.
    pub fn set(
        &self,
        key: Value,
        value: Option<Value>,
        location_range: &LocationRange,
    ) -> ValueResult<Value> {
        match value {
            Some(value) => self.insert(key, value, location_range),
            None => self.remove(&key, location_range),
        }
    }

    /// Remove `key`, returning `Some(old)` detached to the zero address, or
    /// `Nil` when the key was absent.
    pub fn remove(&self, key: &Value, location_range: &LocationRange) -> ValueResult<Value> {
        let digest = checked_key_digest(key, location_range)?;
        let removed = self.slab.storage()?.map_remove(self.slab.id(), &digest)?;
        match removed {
            Some(entry) => {
                ownership::set_owner(&entry.key, Address::ZERO)?;
                ownership::set_owner(&entry.value, Address::ZERO)?;
                Ok(Value::some(entry.value))
            }
            None => Ok(Value::Nil),
        }
    }
}

impl fmt::Debug for DictionaryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DictionaryValue")
            .field("static_type", &self.static_type)
            .field("slab", &self.slab)
            .finish()
    }
}
