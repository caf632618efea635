//! Errors raised by value operations.
//!
//! Lookup misses are not errors: they surface as `Option`. Equality and
//! conformance mismatches are not errors either: they are `false`. What is
//! left is storage failures, which propagate unchanged, and a handful of
//! misuse conditions reported with the caller's location range.

use std::fmt;

use ember_ir::LocationRange;
use ember_storage::{SlabId, StorageError};

/// Result of a fallible value operation.
pub type ValueResult<T> = Result<T, ValueError>;

/// Error category for value operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueError {
    /// The storage backend failed. Never rewritten on the way up.
    Storage(StorageError),
    /// The storage a container lives in has been dropped.
    StorageReleased(SlabId),
    /// Array access outside `0..count` (or `0..=count` for insertion).
    IndexOutOfBounds {
        index: usize,
        count: usize,
        location_range: LocationRange,
    },
    /// The value has no key string, so it cannot key a dictionary.
    InvalidDictionaryKey {
        key: String,
        location_range: LocationRange,
    },
    /// Public keys cannot be constructed without a validation handler.
    PublicKeyValidationUnavailable,
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueError::Storage(err) => write!(f, "storage error: {err}"),
            ValueError::StorageReleased(id) => {
                write!(f, "storage backing slab {id} has been released")
            }
            ValueError::IndexOutOfBounds {
                index,
                count,
                location_range,
            } => write!(
                f,
                "{location_range}: index out of bounds: got {index}, expected 0 <= index < {count}"
            ),
            ValueError::InvalidDictionaryKey {
                key,
                location_range,
            } => write!(f, "{location_range}: {key} cannot be used as a dictionary key"),
            ValueError::PublicKeyValidationUnavailable => {
                write!(f, "public key validation is not configured")
            }
        }
    }
}

impl std::error::Error for ValueError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ValueError::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for ValueError {
    fn from(err: StorageError) -> Self {
        ValueError::Storage(err)
    }
}

#[cfg(test)]
mod tests;
