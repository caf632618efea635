//! Value traversal.
//!
//! [`Value::accept`] walks a value depth-first, pre-order: the visitor sees
//! a node before its children. Children are array elements in order,
//! dictionary keys then values (each in insertion order), composite fields
//! in order, and the inside of `Some`. References are leaves: the walk never
//! follows them, so it terminates on cyclic graphs.
//!
//! The `visit_*` methods for nodes with children return whether to descend.

use ember_ir::Address;
use ember_stack::ensure_sufficient_stack;
use num_bigint::{BigInt, BigUint};

use crate::value::{
    ArrayValue, BlockValue, CapabilityValue, CompositeValue, DictionaryValue,
    EphemeralReferenceValue, LinkValue, NumberValue, PathValue, StorageReferenceValue, TypeValue,
    Value,
};

/// Per-variant hooks, all no-ops by default.
pub trait Visitor {
    fn visit_void(&mut self) {}

    fn visit_bool(&mut self, _value: bool) {}

    fn visit_nil(&mut self) {}

    fn visit_some(&mut self, _inner: &Value) -> bool {
        true
    }

    fn visit_string(&mut self, _value: &str) {}

    fn visit_address(&mut self, _value: Address) {}

    /// Called for every number. The default forwards to the hook for the
    /// number's kind; fixed-point hooks receive the raw scaled value.
    fn visit_number(&mut self, value: &NumberValue) {
        visit_number_kind(self, value);
    }

    fn visit_int(&mut self, _value: &BigInt) {}

    fn visit_int8(&mut self, _value: i8) {}

    fn visit_int16(&mut self, _value: i16) {}

    fn visit_int32(&mut self, _value: i32) {}

    fn visit_int64(&mut self, _value: i64) {}

    fn visit_int128(&mut self, _value: i128) {}

    fn visit_int256(&mut self, _value: &BigInt) {}

    fn visit_uint(&mut self, _value: &BigUint) {}

    fn visit_uint8(&mut self, _value: u8) {}

    fn visit_uint16(&mut self, _value: u16) {}

    fn visit_uint32(&mut self, _value: u32) {}

    fn visit_uint64(&mut self, _value: u64) {}

    fn visit_uint128(&mut self, _value: u128) {}

    fn visit_uint256(&mut self, _value: &BigUint) {}

    fn visit_word8(&mut self, _value: u8) {}

    fn visit_word16(&mut self, _value: u16) {}

    fn visit_word32(&mut self, _value: u32) {}

    fn visit_word64(&mut self, _value: u64) {}

    fn visit_fix64(&mut self, _value: i64) {}

    fn visit_ufix64(&mut self, _value: u64) {}

    fn visit_array(&mut self, _value: &ArrayValue) -> bool {
        true
    }

    fn visit_dictionary(&mut self, _value: &DictionaryValue) -> bool {
        true
    }

    fn visit_composite(&mut self, _value: &CompositeValue) -> bool {
        true
    }

    fn visit_ephemeral_reference(&mut self, _value: &EphemeralReferenceValue) {}

    fn visit_storage_reference(&mut self, _value: &StorageReferenceValue) {}

    fn visit_capability(&mut self, _value: &CapabilityValue) {}

    fn visit_link(&mut self, _value: &LinkValue) {}

    fn visit_path(&mut self, _value: &PathValue) {}

    fn visit_type(&mut self, _value: &TypeValue) {}

    fn visit_block(&mut self, _value: &BlockValue) {}
}

/// Forward `value` to `visitor`'s hook for its kind.
pub fn visit_number_kind<V: Visitor + ?Sized>(visitor: &mut V, value: &NumberValue) {
    match value {
        NumberValue::Int(n) => visitor.visit_int(n),
        NumberValue::Int8(n) => visitor.visit_int8(*n),
        NumberValue::Int16(n) => visitor.visit_int16(*n),
        NumberValue::Int32(n) => visitor.visit_int32(*n),
        NumberValue::Int64(n) => visitor.visit_int64(*n),
        NumberValue::Int128(n) => visitor.visit_int128(*n),
        NumberValue::Int256(n) => visitor.visit_int256(n),
        NumberValue::UInt(n) => visitor.visit_uint(n),
        NumberValue::UInt8(n) => visitor.visit_uint8(*n),
        NumberValue::UInt16(n) => visitor.visit_uint16(*n),
        NumberValue::UInt32(n) => visitor.visit_uint32(*n),
        NumberValue::UInt64(n) => visitor.visit_uint64(*n),
        NumberValue::UInt128(n) => visitor.visit_uint128(*n),
        NumberValue::UInt256(n) => visitor.visit_uint256(n),
        NumberValue::Word8(n) => visitor.visit_word8(*n),
        NumberValue::Word16(n) => visitor.visit_word16(*n),
        NumberValue::Word32(n) => visitor.visit_word32(*n),
        NumberValue::Word64(n) => visitor.visit_word64(*n),
        NumberValue::Fix64(n) => visitor.visit_fix64(*n),
        NumberValue::UFix64(n) => visitor.visit_ufix64(*n),
    }
}

type Hook<'a, T> = Option<Box<dyn FnMut(&T) + 'a>>;
type DescendHook<'a, T> = Option<Box<dyn FnMut(&T) -> bool + 'a>>;

/// A [`Visitor`] assembled from optional closures.
///
/// Unset hooks do nothing; unset descend hooks descend. A number runs the
/// `number` hook first, then the hook for its kind.
///
/// ```text
/// let mut strings = 0;
/// let mut visitor = EmptyVisitor {
///     string: Some(Box::new(|_| strings += 1)),
///     ..EmptyVisitor::default()
/// };
/// value.accept(&mut visitor);
/// ```
#[derive(Default)]
pub struct EmptyVisitor<'a> {
    pub void: Option<Box<dyn FnMut() + 'a>>,
    pub bool: Hook<'a, bool>,
    pub nil: Option<Box<dyn FnMut() + 'a>>,
    pub some: DescendHook<'a, Value>,
    pub string: Option<Box<dyn FnMut(&str) + 'a>>,
    pub address: Hook<'a, Address>,
    pub number: Hook<'a, NumberValue>,
    pub int: Hook<'a, BigInt>,
    pub int8: Hook<'a, i8>,
    pub int16: Hook<'a, i16>,
    pub int32: Hook<'a, i32>,
    pub int64: Hook<'a, i64>,
    pub int128: Hook<'a, i128>,
    pub int256: Hook<'a, BigInt>,
    pub uint: Hook<'a, BigUint>,
    pub uint8: Hook<'a, u8>,
    pub uint16: Hook<'a, u16>,
    pub uint32: Hook<'a, u32>,
    pub uint64: Hook<'a, u64>,
    pub uint128: Hook<'a, u128>,
    pub uint256: Hook<'a, BigUint>,
    pub word8: Hook<'a, u8>,
    pub word16: Hook<'a, u16>,
    pub word32: Hook<'a, u32>,
    pub word64: Hook<'a, u64>,
    pub fix64: Hook<'a, i64>,
    pub ufix64: Hook<'a, u64>,
    pub array: DescendHook<'a, ArrayValue>,
    pub dictionary: DescendHook<'a, DictionaryValue>,
    pub composite: DescendHook<'a, CompositeValue>,
    pub ephemeral_reference: Hook<'a, EphemeralReferenceValue>,
    pub storage_reference: Hook<'a, StorageReferenceValue>,
    pub capability: Hook<'a, CapabilityValue>,
    pub link: Hook<'a, LinkValue>,
    pub path: Hook<'a, PathValue>,
    pub type_value: Hook<'a, TypeValue>,
    pub block: Hook<'a, BlockValue>,
}

fn call<T: ?Sized>(hook: &mut Option<Box<dyn FnMut(&T) + '_>>, value: &T) {
    if let Some(hook) = hook {
        hook(value);
    }
}

fn call_descend<T>(hook: &mut Option<Box<dyn FnMut(&T) -> bool + '_>>, value: &T) -> bool {
    match hook {
        Some(hook) => hook(value),
        None => true,
    }
}

impl Visitor for EmptyVisitor<'_> {
    fn visit_void(&mut self) {
        if let Some(hook) = &mut self.void {
            hook();
        }
    }

    fn visit_bool(&mut self, value: bool) {
        call(&mut self.bool, &value);
    }

    fn visit_nil(&mut self) {
        if let Some(hook) = &mut self.nil {
            hook();
        }
    }

    fn visit_some(&mut self, inner: &Value) -> bool {
        call_descend(&mut self.some, inner)
    }

    fn visit_string(&mut self, value: &str) {
        call(&mut self.string, value);
    }

    fn visit_address(&mut self, value: Address) {
        call(&mut self.address, &value);
    }

    fn visit_number(&mut self, value: &NumberValue) {
        call(&mut self.number, value);
        visit_number_kind(self, value);
    }

    fn visit_int(&mut self, value: &BigInt) {
        call(&mut self.int, value);
    }

    fn visit_int8(&mut self, value: i8) {
        call(&mut self.int8, &value);
    }

    fn visit_int16(&mut self, value: i16) {
        call(&mut self.int16, &value);
    }

    fn visit_int32(&mut self, value: i32) {
        call(&mut self.int32, &value);
    }

    fn visit_int64(&mut self, value: i64) {
        call(&mut self.int64, &value);
    }

    fn visit_int128(&mut self, value: i128) {
        call(&mut self.int128, &value);
    }

    fn visit_int256(&mut self, value: &BigInt) {
        call(&mut self.int256, value);
    }

    fn visit_uint(&mut self, value: &BigUint) {
        call(&mut self.uint, value);
    }

    fn visit_uint8(&mut self, value: u8) {
        call(&mut self.uint8, &value);
    }

    fn visit_uint16(&mut self, value: u16) {
        call(&mut self.uint16, &value);
    }

    fn visit_uint32(&mut self, value: u32) {
        call(&mut self.uint32, &value);
    }

    fn visit_uint64(&mut self, value: u64) {
        call(&mut self.uint64, &value);
    }

    fn visit_uint128(&mut self, value: u128) {
        call(&mut self.uint128, &value);
    }

    fn visit_uint256(&mut self, value: &BigUint) {
        call(&mut self.uint256, value);
    }

    fn visit_word8(&mut self, value: u8) {
        call(&mut self.word8, &value);
    }

    fn visit_word16(&mut self, value: u16) {
        call(&mut self.word16, &value);
    }

    fn visit_word32(&mut self, value: u32) {
        call(&mut self.word32, &value);
    }

    fn visit_word64(&mut self, value: u64) {
        call(&mut self.word64, &value);
    }

    fn visit_fix64(&mut self, value: i64) {
        call(&mut self.fix64, &value);
    }

    fn visit_ufix64(&mut self, value: u64) {
        call(&mut self.ufix64, &value);
    }

    fn visit_array(&mut self, value: &ArrayValue) -> bool {
        call_descend(&mut self.array, value)
    }

    fn visit_dictionary(&mut self, value: &DictionaryValue) -> bool {
        call_descend(&mut self.dictionary, value)
    }

    fn visit_composite(&mut self, value: &CompositeValue) -> bool {
        call_descend(&mut self.composite, value)
    }

    fn visit_ephemeral_reference(&mut self, value: &EphemeralReferenceValue) {
        call(&mut self.ephemeral_reference, value);
    }

    fn visit_storage_reference(&mut self, value: &StorageReferenceValue) {
        call(&mut self.storage_reference, value);
    }

    fn visit_capability(&mut self, value: &CapabilityValue) {
        call(&mut self.capability, value);
    }

    fn visit_link(&mut self, value: &LinkValue) {
        call(&mut self.link, value);
    }

    fn visit_path(&mut self, value: &PathValue) {
        call(&mut self.path, value);
    }

    fn visit_type(&mut self, value: &TypeValue) {
        call(&mut self.type_value, value);
    }

    fn visit_block(&mut self, value: &BlockValue) {
        call(&mut self.block, value);
    }
}

impl Value {
    /// Walk this value with `visitor`.
    ///
    /// A container whose contents cannot be read is visited but not
    /// descended into.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        ensure_sufficient_stack(|| match self {
            Value::Void => visitor.visit_void(),
            Value::Bool(b) => visitor.visit_bool(*b),
            Value::Nil => visitor.visit_nil(),
            Value::Some(inner) => {
                if visitor.visit_some(inner) {
                    inner.accept(visitor);
                }
            }
            Value::String(s) => visitor.visit_string(s),
            Value::Address(address) => visitor.visit_address(*address),
            Value::Number(n) => visitor.visit_number(n),
            Value::Array(array) => {
                if visitor.visit_array(array) {
                    accept_all(array.elements(), visitor);
                }
            }
            Value::Dictionary(dictionary) => {
                if visitor.visit_dictionary(dictionary) {
                    accept_all(dictionary.keys(), visitor);
                    accept_all(dictionary.values(), visitor);
                }
            }
            Value::Composite(composite) => {
                if visitor.visit_composite(composite) {
                    let values = composite
                        .fields()
                        .map(|fields| fields.into_iter().map(|(_, value)| value).collect());
                    accept_all(values, visitor);
                }
            }
            Value::EphemeralReference(reference) => visitor.visit_ephemeral_reference(reference),
            Value::StorageReference(reference) => visitor.visit_storage_reference(reference),
            Value::Capability(capability) => visitor.visit_capability(capability),
            Value::Link(link) => visitor.visit_link(link),
            Value::Path(path) => visitor.visit_path(path),
            Value::Type(ty) => visitor.visit_type(ty),
            Value::Block(block) => visitor.visit_block(block),
        });
    }
}

fn accept_all<V: Visitor + ?Sized>(children: crate::ValueResult<Vec<Value>>, visitor: &mut V) {
    match children {
        Ok(children) => {
            for child in &children {
                child.accept(visitor);
            }
        }
        Err(err) => tracing::warn!(%err, "visitor could not read container contents"),
    }
}

#[cfg(test)]
mod tests;
