//! Ember Values - the runtime value model of the Ember interpreter.
//!
//! Every value a program can produce is a [`Value`]. Scalars are held inline;
//! arrays, dictionaries and composites are handles into a slab storage
//! ([`ember_storage::SlabStorage`]) so that their contents can be persisted
//! under an owner address.
//!
//! # Ownership
//!
//! Containers and composites carry an owner address. Mutations that move a
//! value into a container re-parent the moved subgraph to the container's
//! owner; removals reset it to [`Address::ZERO`]. See [`ownership`] for the
//! re-parenting pass itself.
//!
//! # Structural Algorithms
//!
//! - [`Value::equal`]: language equality, never across kinds
//! - [`Value::deep_copy`]: storage-independent copy under a new owner
//! - [`Value::recursive_string`] / [`Value::key_string`]: rendering
//! - [`Value::dynamic_type`] / [`Value::conforms_to_dynamic_type`]
//! - [`Value::accept`]: pre-order traversal with a [`Visitor`]
//!
//! Rendering and conformance thread an identity-keyed set
//! ([`SeenReferences`], [`TypeConformanceResults`]) through the recursion so
//! that cyclic graphs built from ephemeral references terminate.
//!
//! [`Address::ZERO`]: ember_ir::Address::ZERO

mod conformance;
mod deep_copy;
mod dynamic_type;
mod equality;
mod error;
pub mod ownership;
mod render;
mod value;
mod visitor;

#[cfg(test)]
mod test_helpers;

pub use conformance::TypeConformanceResults;
pub use dynamic_type::{DynamicType, EphemeralReferenceDynamicType};
pub use error::{ValueError, ValueResult};
pub use render::{ReferenceId, SeenReferences};
pub use value::{
    ArrayValue, BlockValue, CapabilityValue, CompositeStringer, CompositeValue, DictionaryValue,
    EphemeralReferenceValue, Heap, LinkValue, NumberValue, PathValue, SharedValueStorage,
    StorageReferenceValue, TypeValue, Value, ENUM_RAW_VALUE_FIELD_NAME, FIX64_SCALE,
};
pub use visitor::{visit_number_kind, EmptyVisitor, Visitor};
