#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::sync::Arc;

use ember_ir::{Address, CompositeKind};
use ember_storage::InMemoryStorage;
use ember_values::{ArrayValue, Value};
use pretty_assertions::assert_eq;

use super::*;

fn test_composite(interpreter: &Interpreter) -> CompositeValue {
    CompositeValue::new(
        interpreter.storage(),
        Location::string("test"),
        "Test",
        CompositeKind::Structure,
        Vec::new(),
        Address::ZERO,
    )
    .unwrap()
}

#[test]
fn test_defaults() {
    crate::init_tracing();
    let interpreter = Interpreter::builder().build();

    assert_eq!(interpreter.location(), &Location::Builtin);
    assert!(interpreter.public_key_validation_handler().is_none());
    assert_eq!(interpreter.storage().slab_count(), 0);
}

#[test]
fn test_configured_storage_is_used() {
    let storage: SharedValueStorage = Arc::new(InMemoryStorage::<Value>::new());
    let interpreter = Interpreter::builder()
        .storage(Arc::clone(&storage))
        .location(Location::string("test"))
        .build();

    ArrayValue::new(interpreter.storage(), None, [Value::int(1)]).unwrap();

    assert_eq!(storage.slab_count(), 1);
    assert_eq!(interpreter.location(), &Location::string("test"));
}

#[test]
fn test_validation_without_handler_fails() {
    let interpreter = Interpreter::builder().build();
    let composite = test_composite(&interpreter);

    assert_eq!(
        interpreter.validate_public_key(&composite),
        Err(ValueError::PublicKeyValidationUnavailable)
    );
}

#[test]
fn test_validation_handler_receives_the_composite() {
    let interpreter = Interpreter::builder()
        .public_key_validation_handler(|_, composite| composite.qualified_identifier() == "Test")
        .build();
    let composite = test_composite(&interpreter);

    assert!(interpreter.validate_public_key(&composite).unwrap());
}

#[test]
fn test_values_outlive_interpreter_storage_gracefully() {
    let interpreter = Interpreter::builder().build();
    let array = ArrayValue::new(interpreter.storage(), None, [Value::int(1)]).unwrap();
    drop(interpreter);

    assert!(matches!(
        array.count(),
        Err(ValueError::StorageReleased(_))
    ));
}

#[test]
fn test_debug_omits_handler_body() {
    let interpreter = Interpreter::builder()
        .public_key_validation_handler(|_, _| true)
        .build();
    let debug = format!("{interpreter:?}");
    assert!(debug.contains("public_key_validation_handler: true"));
}
