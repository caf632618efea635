#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use ember_ir::{Address, LocationRange};
use pretty_assertions::assert_eq;

use super::*;
use crate::test_helpers::{any_struct_array, new_composite, new_storage, test_location};
use crate::{
    ArrayValue, CapabilityValue, DictionaryValue, EphemeralReferenceValue, NumberValue, PathValue,
};

fn dynamic_type(value: &Value) -> DynamicType {
    value.dynamic_type(&mut SeenReferences::new()).unwrap()
}

#[test]
fn test_scalars() {
    assert_eq!(dynamic_type(&Value::Void), DynamicType::Void);
    assert_eq!(dynamic_type(&Value::Nil), DynamicType::Nil);
    assert_eq!(dynamic_type(&Value::Bool(false)), DynamicType::Bool);
    assert_eq!(dynamic_type(&Value::string("s")), DynamicType::String);
    assert_eq!(
        dynamic_type(&Value::Address(Address::ZERO)),
        DynamicType::Address
    );
    assert_eq!(
        dynamic_type(&Value::Number(NumberValue::Word16(1))),
        DynamicType::Number(PrimitiveStaticType::Word16)
    );
    assert_eq!(
        dynamic_type(&Value::some(Value::int(1))),
        DynamicType::Some(Box::new(DynamicType::Number(PrimitiveStaticType::Int)))
    );
    assert_eq!(
        dynamic_type(&Value::meta_type(PrimitiveStaticType::Int)),
        DynamicType::MetaType
    );
    assert_eq!(
        dynamic_type(&Value::path(PathDomain::Private, "p")),
        DynamicType::Path {
            domain: PathDomain::Private
        }
    );
}

#[test]
fn test_containers_list_element_types() {
    let storage = new_storage();
    let array = Value::Array(
        ArrayValue::new(
            &storage,
            any_struct_array(),
            [Value::int(1), Value::string("a")],
        )
        .unwrap(),
    );
    assert_eq!(
        dynamic_type(&array),
        DynamicType::Array {
            element_types: vec![
                DynamicType::Number(PrimitiveStaticType::Int),
                DynamicType::String
            ],
            static_type: any_struct_array(),
        }
    );

    let dictionary = Value::Dictionary(
        DictionaryValue::new(
            &storage,
            None,
            [(Value::string("a"), Value::Bool(true))],
            &LocationRange::EMPTY,
        )
        .unwrap(),
    );
    assert_eq!(
        dynamic_type(&dictionary),
        DynamicType::Dictionary {
            entry_types: vec![(DynamicType::String, DynamicType::Bool)],
            static_type: None,
        }
    );
}

#[test]
fn test_composite_stops_at_type_identity() {
    let storage = new_storage();
    let composite = new_composite(
        &storage,
        "Foo",
        CompositeKind::Contract,
        vec![("x", Value::int(1))],
    );
    assert_eq!(
        dynamic_type(&Value::Composite(composite)),
        DynamicType::Composite {
            location: test_location(),
            qualified_identifier: "Foo".to_string(),
            kind: CompositeKind::Contract,
        }
    );
}

#[test]
fn test_reference_records_target_type() {
    let borrowed = Some(StaticType::from(PrimitiveStaticType::Int));
    let reference = Value::EphemeralReference(EphemeralReferenceValue::new(
        true,
        Value::int(3),
        borrowed.clone(),
    ));
    assert_eq!(
        dynamic_type(&reference),
        DynamicType::EphemeralReference(EphemeralReferenceDynamicType {
            authorized: true,
            inner: Some(Box::new(DynamicType::Number(PrimitiveStaticType::Int))),
            borrowed_type: borrowed,
        })
    );
}

#[test]
fn test_cyclic_reference_cuts_inner_type() {
    let storage = new_storage();
    let array = ArrayValue::new(&storage, any_struct_array(), []).unwrap();
    let reference = EphemeralReferenceValue::new(false, Value::Array(array.clone()), None);
    array.append(Value::EphemeralReference(reference.clone())).unwrap();

    let cut = DynamicType::EphemeralReference(EphemeralReferenceDynamicType {
        authorized: false,
        inner: None,
        borrowed_type: None,
    });
    assert_eq!(
        dynamic_type(&Value::EphemeralReference(reference)),
        DynamicType::EphemeralReference(EphemeralReferenceDynamicType {
            authorized: false,
            inner: Some(Box::new(DynamicType::Array {
                element_types: vec![cut],
                static_type: any_struct_array(),
            })),
            borrowed_type: None,
        })
    );
}

#[test]
fn test_capability_keeps_borrow_type() {
    let capability = Value::Capability(CapabilityValue {
        address: Address::ZERO,
        path: PathValue::new(PathDomain::Public, "p"),
        borrow_type: Some(PrimitiveStaticType::Int.into()),
    });
    assert_eq!(
        dynamic_type(&capability),
        DynamicType::Capability {
            borrow_type: Some(PrimitiveStaticType::Int.into())
        }
    );
}

#[test]
fn test_released_storage_is_an_error() {
    let storage = new_storage();
    let array = Value::Array(ArrayValue::new(&storage, None, []).unwrap());
    drop(storage);
    assert!(array.dynamic_type(&mut SeenReferences::new()).is_err());
}
