//! Owner-address propagation.
//!
//! Every container and composite slab records an owner address. The
//! mutation entry points on [`ArrayValue`], [`DictionaryValue`] and
//! [`CompositeValue`] call [`set_owner`] on the value they move in (with the
//! container's owner) and on the value they move out (with
//! [`Address::ZERO`]).
//!
//! The pass walks the owned subgraph: container elements, dictionary keys
//! and values, composite fields and the inside of `Some`. It stops at
//! references, capabilities and every other non-owning variant, so it never
//! follows a cycle.
//!
//! [`ArrayValue`]: crate::ArrayValue
//! [`DictionaryValue`]: crate::DictionaryValue
//! [`CompositeValue`]: crate::CompositeValue

use ember_ir::Address;
use ember_stack::ensure_sufficient_stack;

use crate::value::{SlabRef, Value};
use crate::ValueResult;

/// The slab a value's contents live in, if it owns one.
fn owned_slab(value: &Value) -> Option<&SlabRef> {
    match value {
        Value::Array(array) => Some(array.slab()),
        Value::Dictionary(dictionary) => Some(dictionary.slab()),
        Value::Composite(composite) => Some(composite.slab()),
        _ => None,
    }
}

/// The values directly owned by `value`.
fn owned_children(value: &Value) -> ValueResult<Vec<Value>> {
    Ok(match value {
        Value::Some(inner) => vec![(**inner).clone()],
        Value::Array(array) => array.elements()?,
        Value::Dictionary(dictionary) => dictionary
            .entries()?
            .into_iter()
            .flat_map(|(key, value)| [key, value])
            .collect(),
        Value::Composite(composite) => composite
            .fields()?
            .into_iter()
            .map(|(_, value)| value)
            .collect(),
        Value::Block(block) => vec![Value::Array(block.id.clone())],
        _ => Vec::new(),
    })
}

/// Re-root `value` and everything it transitively owns under `owner`.
///
/// Values that carry no owner are left untouched.
pub fn set_owner(value: &Value, owner: Address) -> ValueResult<()> {
    ensure_sufficient_stack(|| {
        if let Some(slab) = owned_slab(value) {
            let storage = slab.storage()?;
            if storage.owner(slab.id())? != owner {
                tracing::trace!(slab = %slab.id(), %owner, "transferring ownership");
            }
            storage.set_owner(slab.id(), owner)?;
        }
        for child in owned_children(value)? {
            set_owner(&child, owner)?;
        }
        Ok(())
    })
}

/// Release every slab `value` transitively owns, children first.
///
/// References are not followed: destroying a value never destroys what a
/// reference inside it points at.
pub fn destroy(value: &Value) -> ValueResult<()> {
    ensure_sufficient_stack(|| {
        for child in owned_children(value)? {
            destroy(&child)?;
        }
        if let Some(slab) = owned_slab(value) {
            slab.storage()?.remove_slab(slab.id())?;
        }
        Ok(())
    })
}

/// Best-effort cleanup of a partially built value after a failed operation.
pub(crate) fn release_partial(value: &Value) {
    if let Err(err) = destroy(value) {
        tracing::warn!(%err, "failed to release partially built value");
    }
}

impl Value {
    /// Release the slabs this value owns. See [`destroy`].
    pub fn destroy(&self) -> ValueResult<()> {
        destroy(self)
    }
}
