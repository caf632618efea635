//! Language equality.
//!
//! Values of different kinds are never equal: there is no coercion between
//! number kinds, and `Some(x)` never equals `x`. Containers compare their
//! declared static type and then their contents. A storage read that fails
//! half-way makes the comparison `false`.

use ember_ir::LocationRange;
use ember_stack::ensure_sufficient_stack;

use crate::value::{ArrayValue, BlockValue, CompositeValue, DictionaryValue, Value};
use crate::ValueResult;

impl Value {
    /// Structural equality. `location_range` is only used for diagnostics.
    pub fn equal(&self, other: &Value, location_range: &LocationRange) -> bool {
        ensure_sufficient_stack(|| match (self, other) {
            (Value::Void, Value::Void) | (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Some(a), Value::Some(b)) => a.equal(b, location_range),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Address(a), Value::Address(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                settle(arrays_equal(a, b, location_range), location_range)
            }
            (Value::Dictionary(a), Value::Dictionary(b)) => {
                settle(dictionaries_equal(a, b, location_range), location_range)
            }
            (Value::Composite(a), Value::Composite(b)) => {
                settle(composites_equal(a, b, location_range), location_range)
            }
            (Value::EphemeralReference(a), Value::EphemeralReference(b)) => {
                a.authorized() == b.authorized()
                    && a.borrowed_type() == b.borrowed_type()
                    && a.value() == b.value()
            }
            (Value::StorageReference(a), Value::StorageReference(b)) => a == b,
            (Value::Capability(a), Value::Capability(b)) => a == b,
            (Value::Link(a), Value::Link(b)) => a == b,
            (Value::Path(a), Value::Path(b)) => a == b,
            (Value::Type(a), Value::Type(b)) => a == b,
            (Value::Block(a), Value::Block(b)) => {
                settle(blocks_equal(a, b, location_range), location_range)
            }
            _ => false,
        })
    }
}

fn settle(result: ValueResult<bool>, location_range: &LocationRange) -> bool {
    result.unwrap_or_else(|err| {
        tracing::warn!(%err, %location_range, "equality check could not read storage");
        false
    })
}

fn arrays_equal(
    a: &ArrayValue,
    b: &ArrayValue,
    location_range: &LocationRange,
) -> ValueResult<bool> {
    if a.static_type() != b.static_type() || a.count()? != b.count()? {
        return Ok(false);
    }
    let (left, right) = (a.elements()?, b.elements()?);
    Ok(left
        .iter()
        .zip(&right)
        .all(|(x, y)| x.equal(y, location_range)))
}

fn dictionaries_equal(
    a: &DictionaryValue,
    b: &DictionaryValue,
    location_range: &LocationRange,
) -> ValueResult<bool> {
    if a.static_type() != b.static_type() || a.count()? != b.count()? {
        return Ok(false);
    }
    for (key, value) in a.entries()? {
        match b.get_key(&key)? {
            Some(other) if value.equal(&other, location_range) => {}
            _ => return Ok(false),
        }
    }
    Ok(true)
}

fn composites_equal(
    a: &CompositeValue,
    b: &CompositeValue,
    location_range: &LocationRange,
) -> ValueResult<bool> {
    if a.location() != b.location()
        || a.qualified_identifier() != b.qualified_identifier()
        || a.kind() != b.kind()
        || a.field_count()? != b.field_count()?
    {
        return Ok(false);
    }
    for (name, value) in a.fields()? {
        match b.get_member(&name)? {
            Some(other) if value.equal(&other, location_range) => {}
            _ => return Ok(false),
        }
    }
    Ok(true)
}

fn blocks_equal(a: &BlockValue, b: &BlockValue, location_range: &LocationRange) -> ValueResult<bool> {
    if a.height != b.height || a.view != b.view || a.timestamp != b.timestamp {
        return Ok(false);
    }
    arrays_equal(&a.id, &b.id, location_range)
}
