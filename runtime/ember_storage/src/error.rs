//! Storage errors.

use ember_ir::Address;

use crate::{SlabId, SlabKind};

/// Result of a storage operation.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors reported by a storage backend.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The handle does not name a live slab.
    #[error("slab {0} not found")]
    SlabNotFound(SlabId),

    /// The slab exists but has a different structure.
    #[error("slab {id} is not {expected}")]
    SlabKindMismatch { id: SlabId, expected: SlabKind },

    /// Array access past the end of the slab.
    #[error("index {index} out of bounds for slab {id} of length {len}")]
    IndexOutOfBounds { id: SlabId, index: usize, len: usize },

    /// The backend cannot allocate another slab.
    #[error("cannot allocate slab for {owner}: limit of {limit} slabs reached")]
    SlabLimitExceeded { owner: Address, limit: usize },
}
