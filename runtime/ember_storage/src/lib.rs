//! Ember Storage - the slab storage contract behind runtime containers.
//!
//! Arrays, dictionaries and composites do not hold their contents inline.
//! They hold a [`SlabId`] handle into a [`SlabStorage`], which owns persistent
//! ordered arrays and ordered maps allocated under an owner address:
//!
//! - `new_array` / `new_ordered_map` allocate a slab and return its handle
//! - `array_*` / `map_*` read and write slab contents
//! - `owner` / `set_owner` track which account root a slab belongs to
//!
//! The contract is generic over the stored item so that this crate knows
//! nothing about runtime values. [`InMemoryStorage`] is the reference
//! implementation used by tests and by interpreters without a persistent
//! backend.
//!
//! Every write may fail with a [`StorageError`]. Callers propagate these
//! unchanged; nothing in the runtime retries or swallows them.

mod error;
mod in_memory;

use std::fmt;

use ember_ir::Address;

pub use error::{StorageError, StorageResult};
pub use in_memory::InMemoryStorage;

/// Handle to a slab: the address it was allocated under plus a
/// storage-unique index.
///
/// The address part is fixed at allocation. The slab's current owner is
/// tracked separately and may change when a value is moved between roots.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlabId {
    pub address: Address,
    pub index: u64,
}

impl SlabId {
    /// Create a slab ID.
    #[inline]
    pub const fn new(address: Address, index: u64) -> Self {
        SlabId { address, index }
    }
}

impl fmt::Display for SlabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.address, self.index)
    }
}

/// The structural kind of a slab.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SlabKind {
    Array,
    OrderedMap,
}

impl fmt::Display for SlabKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlabKind::Array => write!(f, "an array"),
            SlabKind::OrderedMap => write!(f, "an ordered map"),
        }
    }
}

/// A key/value pair stored in an ordered map slab.
///
/// Map slabs are indexed by a key digest string chosen by the caller; the
/// original key item is kept alongside the value so that iteration can hand
/// it back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapEntry<T> {
    pub key: T,
    pub value: T,
}

impl<T> MapEntry<T> {
    /// Create an entry.
    pub fn new(key: T, value: T) -> Self {
        MapEntry { key, value }
    }
}

/// Persistent array and ordered-map primitives keyed by owner address.
///
/// Implementations must be thread-safe (`Send + Sync`), but the runtime
/// drives one storage instance from one evaluation path at a time and never
/// re-enters a storage call from inside another.
pub trait SlabStorage<T>: Send + Sync {
    /// Allocate an empty array slab owned by `owner`.
    fn new_array(&self, owner: Address) -> StorageResult<SlabId>;

    /// Allocate an empty ordered-map slab owned by `owner`.
    fn new_ordered_map(&self, owner: Address) -> StorageResult<SlabId>;

    /// Release a slab. Its contents are dropped, not recursively released.
    fn remove_slab(&self, id: SlabId) -> StorageResult<()>;

    /// Whether `id` names a live slab.
    fn contains_slab(&self, id: SlabId) -> bool;

    /// Number of live slabs.
    fn slab_count(&self) -> usize;

    /// Current owner of a slab.
    fn owner(&self, id: SlabId) -> StorageResult<Address>;

    /// Re-root a slab under `owner`.
    fn set_owner(&self, id: SlabId, owner: Address) -> StorageResult<()>;

    // Arrays

    /// Number of items in an array slab.
    fn array_len(&self, id: SlabId) -> StorageResult<usize>;

    /// Item at `index`.
    fn array_get(&self, id: SlabId, index: usize) -> StorageResult<T>;

    /// Replace the item at `index`, returning the previous item.
    fn array_set(&self, id: SlabId, index: usize, item: T) -> StorageResult<T>;

    /// Insert an item at `index`, shifting later items right.
    fn array_insert(&self, id: SlabId, index: usize, item: T) -> StorageResult<()>;

    /// Append an item.
    fn array_append(&self, id: SlabId, item: T) -> StorageResult<()>;

    /// Remove the item at `index`, shifting later items left.
    fn array_remove(&self, id: SlabId, index: usize) -> StorageResult<T>;

    /// Snapshot of all items in order.
    fn array_items(&self, id: SlabId) -> StorageResult<Vec<T>>;

    // Ordered maps

    /// Number of entries in a map slab.
    fn map_len(&self, id: SlabId) -> StorageResult<usize>;

    /// Entry stored under `key`.
    fn map_get(&self, id: SlabId, key: &str) -> StorageResult<Option<MapEntry<T>>>;

    /// Store an entry under `key`, returning the entry it replaced.
    ///
    /// Replacing keeps the key's original insertion position.
    fn map_set(&self, id: SlabId, key: String, entry: MapEntry<T>)
        -> StorageResult<Option<MapEntry<T>>>;

    /// Remove the entry stored under `key`, preserving the order of the rest.
    fn map_remove(&self, id: SlabId, key: &str) -> StorageResult<Option<MapEntry<T>>>;

    /// Snapshot of all entries in insertion order.
    fn map_entries(&self, id: SlabId) -> StorageResult<Vec<MapEntry<T>>>;
}
