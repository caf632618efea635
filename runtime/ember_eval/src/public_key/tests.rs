#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ember_ir::{PrimitiveStaticType, StaticType};
use pretty_assertions::assert_eq;

use super::*;

fn interpreter_accepting(valid: bool) -> Interpreter {
    Interpreter::builder()
        .location(Location::string("test"))
        .public_key_validation_handler(move |_, _| valid)
        .build()
}

fn key_bytes(interpreter: &Interpreter) -> ArrayValue {
    ArrayValue::new(
        interpreter.storage(),
        Some(StaticType::variable_sized(PrimitiveStaticType::Int)),
        [Value::int(1), Value::int(7), Value::int(3)],
    )
    .unwrap()
}

#[test]
fn test_signature_algorithm_raw_values() {
    assert_eq!(SignatureAlgorithm::EcdsaP256.raw_value(), 1);
    assert_eq!(SignatureAlgorithm::EcdsaSecp256k1.raw_value(), 2);
    assert_eq!(
        SignatureAlgorithm::from_raw_value(2),
        Some(SignatureAlgorithm::EcdsaSecp256k1)
    );
    assert_eq!(SignatureAlgorithm::from_raw_value(0), None);
    assert_eq!(SignatureAlgorithm::EcdsaSecp256k1.to_string(), "ECDSA_secp256k1");
}

#[test]
fn test_signature_algorithm_value() {
    let interpreter = interpreter_accepting(true);
    let algorithm =
        new_signature_algorithm_value(&interpreter, SignatureAlgorithm::EcdsaP256).unwrap();

    assert_eq!(algorithm.type_id(), "SignatureAlgorithm");
    assert_eq!(algorithm.kind(), CompositeKind::Enum);
    assert_eq!(
        algorithm.raw_value().unwrap(),
        Some(Value::Number(NumberValue::UInt8(1)))
    );
    assert_eq!(
        Value::Composite(algorithm).key_string().as_deref(),
        Some("1")
    );
}

#[test]
fn test_public_key_string_includes_key_bytes() {
    let interpreter = interpreter_accepting(true);
    let algorithm =
        new_signature_algorithm_value(&interpreter, SignatureAlgorithm::EcdsaSecp256k1).unwrap();

    let key = new_public_key_value(&interpreter, key_bytes(&interpreter), algorithm).unwrap();

    let rendered = Value::Composite(key).to_string();
    assert!(rendered.contains("[1, 7, 3]"), "{rendered}");
    assert_eq!(
        rendered,
        "PublicKey(publicKey: [1, 7, 3], signatureAlgorithm: SignatureAlgorithm(rawValue: 2), isValid: true)"
    );
}

#[test]
fn test_public_key_fields() {
    let interpreter = interpreter_accepting(false);
    let public_key = key_bytes(&interpreter);
    let algorithm =
        new_signature_algorithm_value(&interpreter, SignatureAlgorithm::EcdsaP256).unwrap();

    let key = new_public_key_value(&interpreter, public_key.clone(), algorithm.clone()).unwrap();

    assert_eq!(key.type_id(), PUBLIC_KEY_TYPE_NAME);
    assert_eq!(
        key.field_names().unwrap(),
        vec![
            PUBLIC_KEY_PUBLIC_KEY_FIELD,
            PUBLIC_KEY_SIGNATURE_ALGORITHM_FIELD,
            PUBLIC_KEY_IS_VALID_FIELD
        ]
    );
    assert_eq!(
        key.get_member(PUBLIC_KEY_PUBLIC_KEY_FIELD).unwrap(),
        Some(Value::Array(public_key))
    );
    assert_eq!(
        key.get_member(PUBLIC_KEY_SIGNATURE_ALGORITHM_FIELD).unwrap(),
        Some(Value::Composite(algorithm))
    );
    assert_eq!(
        key.get_member(PUBLIC_KEY_IS_VALID_FIELD).unwrap(),
        Some(Value::Bool(false))
    );
}

#[test]
fn test_handler_sees_key_and_algorithm() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen_calls = Arc::clone(&calls);
    let interpreter = Interpreter::builder()
        .public_key_validation_handler(move |_, key| {
            seen_calls.fetch_add(1, Ordering::SeqCst);
            let algorithm = key.get_member(PUBLIC_KEY_SIGNATURE_ALGORITHM_FIELD);
            matches!(algorithm, Ok(Some(Value::Composite(_))))
                && key.get_member(PUBLIC_KEY_IS_VALID_FIELD).unwrap().is_none()
        })
        .build();
    let algorithm =
        new_signature_algorithm_value(&interpreter, SignatureAlgorithm::EcdsaP256).unwrap();

    let key = new_public_key_value(&interpreter, key_bytes(&interpreter), algorithm).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        key.get_member(PUBLIC_KEY_IS_VALID_FIELD).unwrap(),
        Some(Value::Bool(true))
    );
}

#[test]
fn test_public_key_requires_handler() {
    let interpreter = Interpreter::builder().build();
    let algorithm =
        new_signature_algorithm_value(&interpreter, SignatureAlgorithm::EcdsaP256).unwrap();
    let public_key = key_bytes(&interpreter);
    let slabs_before = interpreter.storage().slab_count();

    assert!(matches!(
        new_public_key_value(&interpreter, public_key, algorithm),
        Err(ValueError::PublicKeyValidationUnavailable)
    ));
    assert_eq!(interpreter.storage().slab_count(), slabs_before);
}

#[test]
fn test_copied_key_renders_its_own_fields() {
    let interpreter = interpreter_accepting(true);
    let algorithm =
        new_signature_algorithm_value(&interpreter, SignatureAlgorithm::EcdsaP256).unwrap();
    let key = Value::Composite(
        new_public_key_value(&interpreter, key_bytes(&interpreter), algorithm).unwrap(),
    );
    let new_owner = Address([0, 0, 0, 0, 0, 0, 0, 2]);

    let Value::Composite(copy) = key.deep_copy(interpreter.storage(), new_owner).unwrap() else {
        panic!("expected a composite copy");
    };
    let Some(Value::Array(copied_bytes)) = copy.get_member(PUBLIC_KEY_PUBLIC_KEY_FIELD).unwrap()
    else {
        panic!("expected the copied key bytes");
    };
    copied_bytes.append(Value::int(99)).unwrap();
    key.destroy().unwrap();

    assert_eq!(
        Value::Composite(copy).to_string(),
        "PublicKey(publicKey: [1, 7, 3, 99], signatureAlgorithm: SignatureAlgorithm(rawValue: 1), isValid: true)"
    );
    assert!(key.to_string().contains("<error: "));
}
