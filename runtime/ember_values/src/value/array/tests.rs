#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use ember_ir::{Address, LocationRange};
use pretty_assertions::assert_eq;

use super::*;
use crate::test_helpers::{
    any_struct_array, limited_storage, new_storage, new_test_composite, owner_of, NEW_OWNER,
    OLD_OWNER,
};

fn ints(array: &ArrayValue) -> Vec<Value> {
    array.elements().unwrap()
}

#[test]
fn test_new_keeps_element_owners() {
    let storage = new_storage();
    let element = Value::Composite(new_test_composite(&storage, OLD_OWNER));
    let array = ArrayValue::new(&storage, any_struct_array(), [element.clone()]).unwrap();

    assert_eq!(array.owner().unwrap(), Address::ZERO);
    assert_eq!(owner_of(&element), OLD_OWNER);
}

#[test]
fn test_new_with_address_reparents_elements() {
    let storage = new_storage();
    let element = Value::Composite(new_test_composite(&storage, OLD_OWNER));
    let array =
        ArrayValue::new_with_address(&storage, any_struct_array(), NEW_OWNER, [element.clone()])
            .unwrap();

    assert_eq!(array.owner().unwrap(), NEW_OWNER);
    assert_eq!(owner_of(&element), NEW_OWNER);
}

#[test]
fn test_set_index_reparents_new_and_keeps_old_owner() {
    let storage = new_storage();
    let old = Value::Composite(new_test_composite(&storage, NEW_OWNER));
    let array =
        ArrayValue::new_with_address(&storage, any_struct_array(), NEW_OWNER, [old.clone()])
            .unwrap();
    let new = Value::Composite(new_test_composite(&storage, OLD_OWNER));

    let previous = array
        .set_index(0, new.clone(), &LocationRange::EMPTY)
        .unwrap();

    assert_eq!(previous, old);
    assert_eq!(owner_of(&previous), NEW_OWNER);
    assert_eq!(owner_of(&new), NEW_OWNER);
    assert_eq!(array.get_index(0, &LocationRange::EMPTY).unwrap(), new);
}

#[test]
fn test_append_and_insert_reparent() {
    let storage = new_storage();
    let array =
        ArrayValue::new_with_address(&storage, any_struct_array(), NEW_OWNER, []).unwrap();
    let appended = Value::Composite(new_test_composite(&storage, OLD_OWNER));
    let inserted = Value::Composite(new_test_composite(&storage, OLD_OWNER));

    array.append(appended.clone()).unwrap();
    array
        .insert(0, inserted.clone(), &LocationRange::EMPTY)
        .unwrap();

    assert_eq!(ints(&array), vec![inserted.clone(), appended.clone()]);
    assert_eq!(owner_of(&appended), NEW_OWNER);
    assert_eq!(owner_of(&inserted), NEW_OWNER);
}

#[test]
fn test_insert_at_end() {
    let storage = new_storage();
    let array = ArrayValue::new(&storage, None, [Value::int(1)]).unwrap();
    array.insert(1, Value::int(2), &LocationRange::EMPTY).unwrap();
    assert_eq!(ints(&array), vec![Value::int(1), Value::int(2)]);
}

#[test]
fn test_remove_detaches_element() {
    let storage = new_storage();
    let element = Value::Composite(new_test_composite(&storage, OLD_OWNER));
    let other = Value::Composite(new_test_composite(&storage, OLD_OWNER));
    let array = ArrayValue::new_with_address(
        &storage,
        any_struct_array(),
        NEW_OWNER,
        [element.clone(), other.clone()],
    )
    .unwrap();

    let removed = array.remove(0, &LocationRange::EMPTY).unwrap();

    assert_eq!(removed, element);
    assert_eq!(owner_of(&removed), Address::ZERO);
    assert_eq!(owner_of(&other), NEW_OWNER);
    assert_eq!(array.count().unwrap(), 1);
}

#[test]
fn test_index_out_of_bounds() {
    let storage = new_storage();
    let array = ArrayValue::new(&storage, None, [Value::int(1), Value::int(2)]).unwrap();
    let expected = |index| ValueError::IndexOutOfBounds {
        index,
        count: 2,
        location_range: LocationRange::EMPTY,
    };

    assert_eq!(
        array.get_index(2, &LocationRange::EMPTY),
        Err(expected(2))
    );
    assert_eq!(
        array.set_index(5, Value::int(0), &LocationRange::EMPTY),
        Err(expected(5))
    );
    assert_eq!(
        array.insert(3, Value::int(0), &LocationRange::EMPTY),
        Err(expected(3))
    );
    assert_eq!(array.remove(2, &LocationRange::EMPTY), Err(expected(2)));
    assert_eq!(ints(&array), vec![Value::int(1), Value::int(2)]);
}

#[test]
fn test_first_index_and_contains_use_language_equality() {
    let storage = new_storage();
    let array = ArrayValue::new(
        &storage,
        None,
        [Value::string("a"), Value::int(7), Value::int(7)],
    )
    .unwrap();

    assert_eq!(
        array
            .first_index(&Value::int(7), &LocationRange::EMPTY)
            .unwrap(),
        Some(1)
    );
    assert!(array
        .contains(&Value::string("a"), &LocationRange::EMPTY)
        .unwrap());
    assert!(!array
        .contains(&Value::string("b"), &LocationRange::EMPTY)
        .unwrap());
}

#[test]
fn test_concat_copies_both_operands() {
    let storage = new_storage();
    let left = ArrayValue::new(&storage, any_struct_array(), [Value::int(1)]).unwrap();
    let nested = ArrayValue::new(&storage, None, [Value::int(3)]).unwrap();
    let right = ArrayValue::new(
        &storage,
        any_struct_array(),
        [Value::int(2), Value::Array(nested.clone())],
    )
    .unwrap();

    let result = left.concat(&right).unwrap();

    assert_eq!(result.count().unwrap(), 3);
    assert_eq!(result.owner().unwrap(), Address::ZERO);
    assert_eq!(result.static_type(), any_struct_array().as_ref());
    let copied_nested = result.get_index(2, &LocationRange::EMPTY).unwrap();
    assert_ne!(copied_nested, Value::Array(nested.clone()));
    assert!(copied_nested.equal(&Value::Array(nested), &LocationRange::EMPTY));
    assert_eq!(left.count().unwrap(), 1);
    assert_eq!(right.count().unwrap(), 2);
}

#[test]
fn test_concat_failure_releases_result() {
    // left, right, nested: three live slabs; the result fits, its nested copy does not.
    let storage = limited_storage(4);
    let left = ArrayValue::new(&storage, None, []).unwrap();
    let nested = ArrayValue::new(&storage, None, [Value::int(1)]).unwrap();
    let right = ArrayValue::new(&storage, None, [Value::Array(nested)]).unwrap();

    let err = left.concat(&right).unwrap_err();

    assert!(matches!(
        err,
        ValueError::Storage(ember_storage::StorageError::SlabLimitExceeded { .. })
    ));
    assert_eq!(storage.slab_count(), 3);
}

#[test]
fn test_allocation_failure_is_reported() {
    let storage = limited_storage(0);
    assert!(matches!(
        ArrayValue::new(&storage, None, []),
        Err(ValueError::Storage(
            ember_storage::StorageError::SlabLimitExceeded { .. }
        ))
    ));
}
