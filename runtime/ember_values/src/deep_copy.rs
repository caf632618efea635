//! Deep copy.
//!
//! Copies allocate fresh slabs in the target storage, owned by the requested
//! address, and recurse into every owned child. The source graph is only
//! read. If any allocation fails, the slabs already allocated for the copy
//! are released before the error is returned.

use ember_ir::{Address, LocationRange};
use ember_stack::ensure_sufficient_stack;
use ember_storage::MapEntry;

use crate::ownership::release_partial;
use crate::value::{
    ArrayValue, BlockValue, CompositeValue, DictionaryValue, SharedValueStorage, SlabRef, Value,
};
use crate::ValueResult;

impl Value {
    /// A storage-independent copy of this value, with every container and
    /// composite in the result owned by `address`.
    ///
    /// Pass [`Address::ZERO`] for an unrooted copy. Non-owning values
    /// (references, capabilities, paths, ...) are copied by value.
    pub fn deep_copy(&self, storage: &SharedValueStorage, address: Address) -> ValueResult<Value> {
        ensure_sufficient_stack(|| match self {
            Value::Some(inner) => Ok(Value::some(inner.deep_copy(storage, address)?)),
            Value::Array(array) => copy_array(array, storage, address).map(Value::Array),
            Value::Dictionary(dictionary) => {
                copy_dictionary(dictionary, storage, address).map(Value::Dictionary)
            }
            Value::Composite(composite) => {
                copy_composite(composite, storage, address).map(Value::Composite)
            }
            Value::Block(block) => Ok(Value::Block(BlockValue {
                id: copy_array(&block.id, storage, address)?,
                ..block.clone()
            })),
            Value::Void
            | Value::Bool(_)
            | Value::Nil
            | Value::String(_)
            | Value::Address(_)
            | Value::Number(_)
            | Value::EphemeralReference(_)
            | Value::StorageReference(_)
            | Value::Capability(_)
            | Value::Link(_)
            | Value::Path(_)
            | Value::Type(_) => Ok(self.clone()),
        })
    }
}

/// Run `fill` against a freshly allocated copy, releasing the copy if it
/// fails.
fn fill_or_release(copy: &Value, fill: impl FnOnce() -> ValueResult<()>) -> ValueResult<()> {
    fill().inspect_err(|err| {
        tracing::debug!(%err, "deep copy failed, releasing partial copy");
        release_partial(copy);
    })
}

fn copy_array(
    array: &ArrayValue,
    storage: &SharedValueStorage,
    address: Address,
) -> ValueResult<ArrayValue> {
    let elements = array.elements()?;
    let copy = ArrayValue::new_with_address(
        storage,
        array.static_type().cloned(),
        address,
        std::iter::empty(),
    )?;
    let id = copy.slab_id();
    fill_or_release(&Value::Array(copy.clone()), || {
        for element in &elements {
            storage.array_append(id, element.deep_copy(storage, address)?)?;
        }
        Ok(())
    })?;
    Ok(copy)
}

fn copy_dictionary(
    dictionary: &DictionaryValue,
    storage: &SharedValueStorage,
    address: Address,
) -> ValueResult<DictionaryValue> {
    let entries = dictionary.entries()?;
    let copy = DictionaryValue::new_with_address(
        storage,
        dictionary.static_type().cloned(),
        address,
        std::iter::empty(),
        &LocationRange::EMPTY,
    )?;
    fill_or_release(&Value::Dictionary(copy.clone()), || {
        for (key, value) in entries {
            copy.insert(
                key.deep_copy(storage, address)?,
                value.deep_copy(storage, address)?,
                &LocationRange::EMPTY,
            )?;
        }
        Ok(())
    })?;
    Ok(copy)
}

fn copy_composite(
    composite: &CompositeValue,
    storage: &SharedValueStorage,
    address: Address,
) -> ValueResult<CompositeValue> {
    let fields = composite.fields()?;
    let id = storage.new_ordered_map(address)?;
    let copy = composite.with_slab(SlabRef::new(storage, id));
    fill_or_release(&Value::Composite(copy.clone()), || {
        for (name, value) in fields {
            storage.map_set(
                id,
                name.clone(),
                MapEntry::new(Value::string(name), value.deep_copy(storage, address)?),
            )?;
        }
        Ok(())
    })?;
    Ok(copy)
}
