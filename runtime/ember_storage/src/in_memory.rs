//! In-memory slab storage.

use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::{FxBuildHasher, FxHashMap};
use tracing::{debug, trace};

use ember_ir::Address;

use crate::{MapEntry, SlabId, SlabKind, SlabStorage, StorageError, StorageResult};

/// Contents of one slab.
enum Slab<T> {
    Array {
        owner: Address,
        items: Vec<T>,
    },
    Map {
        owner: Address,
        entries: IndexMap<String, MapEntry<T>, FxBuildHasher>,
    },
}

impl<T> Slab<T> {
    fn owner(&self) -> Address {
        match self {
            Slab::Array { owner, .. } | Slab::Map { owner, .. } => *owner,
        }
    }

    fn set_owner(&mut self, new_owner: Address) {
        match self {
            Slab::Array { owner, .. } | Slab::Map { owner, .. } => *owner = new_owner,
        }
    }
}

struct Slabs<T> {
    slabs: FxHashMap<SlabId, Slab<T>>,
    next_index: u64,
    limit: Option<usize>,
}

impl<T> Slabs<T> {
    fn allocate(&mut self, owner: Address, slab: Slab<T>) -> StorageResult<SlabId> {
        if let Some(limit) = self.limit {
            if self.slabs.len() >= limit {
                debug!(%owner, limit, "slab allocation refused");
                return Err(StorageError::SlabLimitExceeded { owner, limit });
            }
        }
        self.next_index = self.next_index.wrapping_add(1);
        let id = SlabId::new(owner, self.next_index);
        self.slabs.insert(id, slab);
        trace!(%id, "slab allocated");
        Ok(id)
    }

    fn get(&self, id: SlabId) -> StorageResult<&Slab<T>> {
        self.slabs.get(&id).ok_or(StorageError::SlabNotFound(id))
    }

    fn get_mut(&mut self, id: SlabId) -> StorageResult<&mut Slab<T>> {
        self.slabs.get_mut(&id).ok_or(StorageError::SlabNotFound(id))
    }

    fn items(&self, id: SlabId) -> StorageResult<&Vec<T>> {
        match self.get(id)? {
            Slab::Array { items, .. } => Ok(items),
            Slab::Map { .. } => Err(StorageError::SlabKindMismatch {
                id,
                expected: SlabKind::Array,
            }),
        }
    }

    fn items_mut(&mut self, id: SlabId) -> StorageResult<&mut Vec<T>> {
        match self.get_mut(id)? {
            Slab::Array { items, .. } => Ok(items),
            Slab::Map { .. } => Err(StorageError::SlabKindMismatch {
                id,
                expected: SlabKind::Array,
            }),
        }
    }

    fn entries(&self, id: SlabId) -> StorageResult<&IndexMap<String, MapEntry<T>, FxBuildHasher>> {
        match self.get(id)? {
            Slab::Map { entries, .. } => Ok(entries),
            Slab::Array { .. } => Err(StorageError::SlabKindMismatch {
                id,
                expected: SlabKind::OrderedMap,
            }),
        }
    }

    fn entries_mut(
        &mut self,
        id: SlabId,
    ) -> StorageResult<&mut IndexMap<String, MapEntry<T>, FxBuildHasher>> {
        match self.get_mut(id)? {
            Slab::Map { entries, .. } => Ok(entries),
            Slab::Array { .. } => Err(StorageError::SlabKindMismatch {
                id,
                expected: SlabKind::OrderedMap,
            }),
        }
    }
}

/// Slab storage held entirely in memory.
///
/// Used by tests and by interpreters that never commit to a persistent
/// backend. An optional slab limit makes allocation fail once the number of
/// live slabs reaches it, which is how callers exercise storage-error paths.
pub struct InMemoryStorage<T> {
    inner: RwLock<Slabs<T>>,
}

impl<T> InMemoryStorage<T> {
    /// Create an unbounded storage.
    pub fn new() -> Self {
        InMemoryStorage {
            inner: RwLock::new(Slabs {
                slabs: FxHashMap::default(),
                next_index: 0,
                limit: None,
            }),
        }
    }

    /// Create a storage that refuses to hold more than `limit` live slabs.
    pub fn with_slab_limit(limit: usize) -> Self {
        let storage = Self::new();
        storage.inner.write().limit = Some(limit);
        storage
    }
}

impl<T> Default for InMemoryStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync> SlabStorage<T> for InMemoryStorage<T> {
    fn new_array(&self, owner: Address) -> StorageResult<SlabId> {
        self.inner.write().allocate(
            owner,
            Slab::Array {
                owner,
                items: Vec::new(),
            },
        )
    }

    fn new_ordered_map(&self, owner: Address) -> StorageResult<SlabId> {
        self.inner.write().allocate(
            owner,
            Slab::Map {
                owner,
                entries: IndexMap::default(),
            },
        )
    }

    fn remove_slab(&self, id: SlabId) -> StorageResult<()> {
        let removed = self.inner.write().slabs.remove(&id);
        match removed {
            Some(_) => {
                trace!(%id, "slab removed");
                Ok(())
            }
            None => Err(StorageError::SlabNotFound(id)),
        }
    }

    fn contains_slab(&self, id: SlabId) -> bool {
        self.inner.read().slabs.contains_key(&id)
    }

    fn slab_count(&self) -> usize {
        self.inner.read().slabs.len()
    }

    fn owner(&self, id: SlabId) -> StorageResult<Address> {
        self.inner.read().get(id).map(Slab::owner)
    }

    fn set_owner(&self, id: SlabId, owner: Address) -> StorageResult<()> {
        self.inner.write().get_mut(id)?.set_owner(owner);
        Ok(())
    }

    fn array_len(&self, id: SlabId) -> StorageResult<usize> {
        self.inner.read().items(id).map(Vec::len)
    }

    fn array_get(&self, id: SlabId, index: usize) -> StorageResult<T> {
        let inner = self.inner.read();
        let items = inner.items(id)?;
        items
            .get(index)
            .cloned()
            .ok_or(StorageError::IndexOutOfBounds {
                id,
                index,
                len: items.len(),
            })
    }

    fn array_set(&self, id: SlabId, index: usize, item: T) -> StorageResult<T> {
        let mut inner = self.inner.write();
        let items = inner.items_mut(id)?;
        let len = items.len();
        match items.get_mut(index) {
            Some(slot) => Ok(std::mem::replace(slot, item)),
            None => Err(StorageError::IndexOutOfBounds { id, index, len }),
        }
    }

    fn array_insert(&self, id: SlabId, index: usize, item: T) -> StorageResult<()> {
        let mut inner = self.inner.write();
        let items = inner.items_mut(id)?;
        if index > items.len() {
            return Err(StorageError::IndexOutOfBounds {
                id,
                index,
                len: items.len(),
            });
        }
        items.insert(index, item);
        Ok(())
    }

    fn array_append(&self, id: SlabId, item: T) -> StorageResult<()> {
        self.inner.write().items_mut(id)?.push(item);
        Ok(())
    }

    fn array_remove(&self, id: SlabId, index: usize) -> StorageResult<T> {
        let mut inner = self.inner.write();
        let items = inner.items_mut(id)?;
        if index >= items.len() {
            return Err(StorageError::IndexOutOfBounds {
                id,
                index,
                len: items.len(),
            });
        }
        Ok(items.remove(index))
    }

    fn array_items(&self, id: SlabId) -> StorageResult<Vec<T>> {
        self.inner.read().items(id).cloned()
    }

    fn map_len(&self, id: SlabId) -> StorageResult<usize> {
        self.inner.read().entries(id).map(IndexMap::len)
    }

    fn map_get(&self, id: SlabId, key: &str) -> StorageResult<Option<MapEntry<T>>> {
        Ok(self.inner.read().entries(id)?.get(key).cloned())
    }

    fn map_set(
        &self,
        id: SlabId,
        key: String,
        entry: MapEntry<T>,
    ) -> StorageResult<Option<MapEntry<T>>> {
        Ok(self.inner.write().entries_mut(id)?.insert(key, entry))
    }

    fn map_remove(&self, id: SlabId, key: &str) -> StorageResult<Option<MapEntry<T>>> {
        Ok(self.inner.write().entries_mut(id)?.shift_remove(key))
    }

    fn map_entries(&self, id: SlabId) -> StorageResult<Vec<MapEntry<T>>> {
        Ok(self.inner.read().entries(id)?.values().cloned().collect())
    }
}
