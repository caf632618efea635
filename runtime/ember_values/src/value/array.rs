//! Storage-backed arrays.

use std::fmt;

use ember_ir::{Address, LocationRange, StaticType};
use ember_storage::{SlabId, StorageError};

use super::{SharedValueStorage, SlabRef, Value};
use crate::ownership;
use crate::{ValueError, ValueResult};

/// Handle to an ordered sequence of values held in an array slab.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ArrayValue {
    static_type: Option<StaticType>,
    slab: SlabRef,
}

impl ArrayValue {
    /// Create an unrooted array holding `elements`.
    ///
    /// The array is owned by the zero address. Elements keep whatever owner
    /// they already had; only the "with address" form re-parents them.
    pub fn new(
        storage: &SharedValueStorage,
        static_type: Option<StaticType>,
        elements: impl IntoIterator<Item = Value>,
    ) -> ValueResult<Self> {
        let array = Self::allocate(storage, static_type, Address::ZERO)?;
        let storage = array.slab.storage()?;
        for element in elements {
            storage.array_append(array.slab.id(), element)?;
        }
        Ok(array)
    }

    /// Create an array owned by `address`, re-parenting every element to it.
    pub fn new_with_address(
        storage: &SharedValueStorage,
        static_type: Option<StaticType>,
        address: Address,
        elements: impl IntoIterator<Item = Value>,
    ) -> ValueResult<Self> {
        let array = Self::allocate(storage, static_type, address)?;
        for element in elements {
            array.append(element)?;
        }
        Ok(array)
    }

    fn allocate(
        storage: &SharedValueStorage,
        static_type: Option<StaticType>,
        owner: Address,
    ) -> ValueResult<Self> {
        let id = storage.new_array(owner)?;
        Ok(ArrayValue {
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
        Ok(self.slab.storage()?.array_len(self.slab.id())?)
    }

    /// Snapshot of the elements in order.
    pub fn elements(&self) -> ValueResult<Vec<Value>> {
        Ok(self.slab.storage()?.array_items(self.slab.id())?)
    }

    pub fn get_index(&self, index: usize, location_range: &LocationRange) -> ValueResult<Value> {
        let storage = self.slab.storage()?;
        storage
            .array_get(self.slab.id(), index)
            .map_err(|err| index_error(err, location_range))
    }

    /// Replace the element at `index`, re-parenting `value` to this array's
    /// owner.
    ///
    /// The previous element is returned as-is. Its owner is not reset: the
    /// caller decides whether to move it elsewhere or destroy it.
    pub fn set_index(
        &self,
        index: usize,
        value: Value,
        location_range: &LocationRange,
    ) -> ValueResult<Value> {
        let storage = self.slab.storage()?;
        let count = storage.array_len(self.slab.id())?;
        if index >= count {
            return Err(out_of_bounds(index, count, location_range));
        }
        ownership::set_owner(&value, self.owner()?)?;
        storage
            .array_set(self.slab.id(), index, value)
            .map_err(|err| index_error(err, location_range))
    }

    /// Insert `value` at `index` (`0..=count`), re-parenting it.
    pub fn insert(
        &self,
        index: usize,
        value: Value,
        location_range: &LocationRange,
    ) -> ValueResult<()> {
        let storage = self.slab.storage()?;
        let count = storage.array_len(self.slab.id())?;
        if index > count {
            return Err(out_of_bounds(index, count, location_range));
        }
        ownership::set_owner(&value, self.owner()?)?;
        storage
            .array_insert(self.slab.id(), index, value)
            .map_err(|err| index_error(err, location_range))
    }

    /// Append `value`, re-parenting it.
    pub fn append(&self, value: Value) -> ValueResult<()> {
        let storage = self.slab.storage()?;
        ownership::set_owner(&value, storage.owner(self.slab.id())?)?;
        storage.array_append(self.slab.id(), value)?;
        Ok(())
    }

    /// Remove and return the element at `index`, detached to the zero
    /// address. Remaining elements are not touched.
    pub fn remove(&self, index: usize, location_range: &LocationRange) -> ValueResult<Value> {
        let storage = self.slab.storage()?;
        let removed = storage
            .array_remove(self.slab.id(), index)
            .map_err(|err| index_error(err, location_range))?;
        ownership::set_owner(&removed, Address::ZERO)?;
        Ok(removed)
    }

    /// Index of the first element equal to `needle`.
    pub fn first_index(
        &self,
        needle: &Value,
        location_range: &LocationRange,
    ) -> ValueResult<Option<usize>> {
        Ok(self
            .elements()?
            .iter()
            .position(|element| element.equal(needle, location_range)))
    }

    pub fn contains(&self, needle: &Value, location_range: &LocationRange) -> ValueResult<bool> {
        Ok(self.first_index(needle, location_range)?.is_some())
    }

    /// A new unrooted array holding copies of this array's elements followed
    /// by copies of `other`'s. Neither operand changes.
    pub fn concat(&self, other: &ArrayValue) -> ValueResult<ArrayValue> {
        let storage = self.slab.storage()?;
        let result = Self::allocate(&storage, self.static_type.clone(), Address::ZERO)?;
        let copy_all = || -> ValueResult<()> {
            for element in self.elements()?.into_iter().chain(other.elements()?) {
                let copy = element.deep_copy(&storage, Address::ZERO)?;
                storage.array_append(result.slab.id(), copy)?;
            }
            Ok(())
        };
        match copy_all() {
            Ok(()) => Ok(result),
            Err(err) => {
                ownership::release_partial(&Value::Array(result));
                Err(err)
            }
        }
    }
}

fn out_of_bounds(index: usize, count: usize, location_range: &LocationRange) -> ValueError {
    ValueError::IndexOutOfBounds {
        index,
        count,
        location_range: location_range.clone(),
    }
}

fn index_error(err: StorageError, location_range: &LocationRange) -> ValueError {
    match err {
        StorageError::IndexOutOfBounds { index, len, .. } => {
            out_of_bounds(index, len, location_range)
        }
        err => ValueError::Storage(err),
    }
}

impl fmt::Debug for ArrayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayValue")
            .field("static_type", &self.static_type)
            .field("slab", &self.slab)
            .finish()
    }
}

#[cfg(test)]
mod tests;
