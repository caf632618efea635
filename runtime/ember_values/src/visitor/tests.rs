#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use ember_ir::{CompositeKind, LocationRange, PrimitiveStaticType, StaticType};
use pretty_assertions::assert_eq;

use super::*;
use crate::test_helpers::{any_struct_array, new_composite, new_storage};

/// `Foo(foo: {"42": [Some(42)]})`
fn nested_value(storage: &crate::SharedValueStorage) -> Value {
    let array = ArrayValue::new(storage, any_struct_array(), [Value::some(Value::int(42))]).unwrap();
    let dictionary = DictionaryValue::new(
        storage,
        Some(StaticType::dictionary(
            PrimitiveStaticType::String,
            PrimitiveStaticType::Any,
        )),
        [(Value::string("42"), Value::Array(array))],
        &LocationRange::EMPTY,
    )
    .unwrap();
    Value::Composite(new_composite(
        storage,
        "Foo",
        CompositeKind::Structure,
        vec![("foo", Value::Dictionary(dictionary))],
    ))
}

#[test]
fn test_visit_counts() {
    let storage = new_storage();
    let value = nested_value(&storage);
    let (mut int_visits, mut string_visits) = (0, 0);

    let mut visitor = EmptyVisitor {
        number: Some(Box::new(|_: &NumberValue| int_visits += 1)),
        string: Some(Box::new(|_: &str| string_visits += 1)),
        ..EmptyVisitor::default()
    };
    value.accept(&mut visitor);
    drop(visitor);

    assert_eq!(int_visits, 1);
    assert_eq!(string_visits, 1);
}

#[test]
fn test_number_kind_hooks() {
    let storage = new_storage();
    let numbers = ArrayValue::new(
        &storage,
        None,
        [
            Value::Number(NumberValue::Int8(-1)),
            Value::Number(NumberValue::UInt8(2)),
            Value::Number(NumberValue::Word8(3)),
            Value::Number(NumberValue::UFix64(150_000_000)),
            Value::int(5),
        ],
    )
    .unwrap();
    let seen = std::cell::RefCell::new(Vec::new());
    let mut all_numbers = 0;

    let mut visitor = EmptyVisitor {
        number: Some(Box::new(|_: &NumberValue| all_numbers += 1)),
        int8: Some(Box::new(|n: &i8| seen.borrow_mut().push(format!("int8 {n}")))),
        word8: Some(Box::new(|n: &u8| seen.borrow_mut().push(format!("word8 {n}")))),
        ufix64: Some(Box::new(|raw: &u64| seen.borrow_mut().push(format!("ufix64 {raw}")))),
        int: Some(Box::new(|n: &num_bigint::BigInt| seen.borrow_mut().push(format!("int {n}")))),
        ..EmptyVisitor::default()
    };
    Value::Array(numbers).accept(&mut visitor);
    drop(visitor);

    assert_eq!(all_numbers, 5);
    assert_eq!(
        seen.into_inner(),
        vec!["int8 -1", "word8 3", "ufix64 150000000", "int 5"]
    );
}

#[derive(Default)]
struct Trace(Vec<String>);

impl Visitor for Trace {
    fn visit_some(&mut self, _inner: &Value) -> bool {
        self.0.push("some".to_string());
        true
    }

    fn visit_string(&mut self, value: &str) {
        self.0.push(format!("string {value}"));
    }

    fn visit_number(&mut self, value: &NumberValue) {
        self.0.push(format!("number {value}"));
    }

    fn visit_array(&mut self, _value: &ArrayValue) -> bool {
        self.0.push("array".to_string());
        true
    }

    fn visit_dictionary(&mut self, _value: &DictionaryValue) -> bool {
        self.0.push("dictionary".to_string());
        true
    }

    fn visit_composite(&mut self, value: &CompositeValue) -> bool {
        self.0.push(format!("composite {}", value.qualified_identifier()));
        true
    }

    fn visit_ephemeral_reference(&mut self, _value: &EphemeralReferenceValue) {
        self.0.push("reference".to_string());
    }
}

#[test]
fn test_pre_order() {
    let storage = new_storage();
    let mut trace = Trace::default();

    nested_value(&storage).accept(&mut trace);

    assert_eq!(
        trace.0,
        vec![
            "composite Foo",
            "dictionary",
            "string 42",
            "array",
            "some",
            "number 42",
        ]
    );
}

#[test]
fn test_dictionary_keys_before_values() {
    let storage = new_storage();
    let dictionary = DictionaryValue::new(
        &storage,
        None,
        [
            (Value::string("a"), Value::int(1)),
            (Value::string("b"), Value::int(2)),
        ],
        &LocationRange::EMPTY,
    )
    .unwrap();
    let mut trace = Trace::default();

    Value::Dictionary(dictionary).accept(&mut trace);

    assert_eq!(
        trace.0,
        vec!["dictionary", "string a", "string b", "number 1", "number 2"]
    );
}

#[test]
fn test_descend_false_skips_children() {
    let storage = new_storage();
    let value = nested_value(&storage);
    let mut strings = 0;

    let mut visitor = EmptyVisitor {
        dictionary: Some(Box::new(|_: &DictionaryValue| false)),
        string: Some(Box::new(|_: &str| strings += 1)),
        ..EmptyVisitor::default()
    };
    value.accept(&mut visitor);
    drop(visitor);

    assert_eq!(strings, 0);
}

#[test]
fn test_references_are_leaves() {
    let storage = new_storage();
    let array = ArrayValue::new(&storage, None, []).unwrap();
    let reference = EphemeralReferenceValue::new(false, Value::Array(array.clone()), None);
    array.append(Value::EphemeralReference(reference)).unwrap();
    let mut trace = Trace::default();

    Value::Array(array).accept(&mut trace);

    assert_eq!(trace.0, vec!["array", "reference"]);
}
