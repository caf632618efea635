use std::error::Error;

use super::*;
use ember_ir::{Address, Location, Span};
use pretty_assertions::assert_eq;

#[test]
fn test_storage_error_is_source() {
    let id = SlabId::new(Address::ZERO, 3);
    let err = ValueError::from(StorageError::SlabNotFound(id));
    assert_eq!(err, ValueError::Storage(StorageError::SlabNotFound(id)));
    assert!(err.source().is_some());
    assert_eq!(err.to_string(), "storage error: slab 0x0#3 not found");
}

#[test]
fn test_index_out_of_bounds_display() {
    let err = ValueError::IndexOutOfBounds {
        index: 4,
        count: 2,
        location_range: LocationRange::new(Location::string("test"), Span::new(3, 9)),
    };
    assert!(err.source().is_none());
    assert_eq!(
        err.to_string(),
        "S.test:3..9: index out of bounds: got 4, expected 0 <= index < 2"
    );
}
