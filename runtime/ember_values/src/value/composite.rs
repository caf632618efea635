//! Composite values: structures, resources, contracts, enums and events.
//!
//! Fields live in an ordered-map slab keyed by field name, so field order is
//! insertion order and names are unique. The type header (location,
//! qualified identifier, kind, optional renderer override) is immutable and
//! shared between clones of the handle.

use std::fmt;
use std::sync::Arc;

use ember_ir::{Address, CompositeKind, Location, StaticType};
use ember_storage::{MapEntry, SlabId};

use super::{SharedValueStorage, SlabRef, Value};
use crate::ownership;
use crate::{SeenReferences, ValueResult};

/// Name of the single field an enum case carries.
pub const ENUM_RAW_VALUE_FIELD_NAME: &str = "rawValue";

/// Renderer override for a composite. Its output replaces the default
/// `Type(field: value, ...)` rendering verbatim.
///
/// The override receives the composite being rendered and must read field
/// values through it, since copies share the override with their source.
pub type CompositeStringer =
    Arc<dyn Fn(&CompositeValue, &mut SeenReferences) -> String + Send + Sync>;

struct CompositeHeader {
    location: Location,
    qualified_identifier: String,
    kind: CompositeKind,
    stringer: Option<CompositeStringer>,
}

/// Handle to a composite value.
#[derive(Clone)]
pub struct CompositeValue {
    header: Arc<CompositeHeader>,
    slab: SlabRef,
}

impl CompositeValue {
    /// Create a composite owned by `owner`, re-parenting every field to it.
    pub fn new(
        storage: &SharedValueStorage,
        location: Location,
        qualified_identifier: impl Into<String>,
        kind: CompositeKind,
        fields: impl IntoIterator<Item = (String, Value)>,
        owner: Address,
    ) -> ValueResult<Self> {
        let id = storage.new_ordered_map(owner)?;
        let composite = CompositeValue {
            header: Arc::new(CompositeHeader {
                location,
                qualified_identifier: qualified_identifier.into(),
                kind,
                stringer: None,
            }),
            slab: SlabRef::new(storage, id),
        };
        for (name, value) in fields {
            composite.set_member(&name, value)?;
        }
        Ok(composite)
    }

    /// The same composite with a renderer override installed.
    #[must_use]
    pub fn with_stringer(
        self,
        stringer: impl Fn(&CompositeValue, &mut SeenReferences) -> String + Send + Sync + 'static,
    ) -> Self {
        CompositeValue {
            header: Arc::new(CompositeHeader {
                location: self.header.location.clone(),
                qualified_identifier: self.header.qualified_identifier.clone(),
                kind: self.header.kind,
                stringer: Some(Arc::new(stringer)),
            }),
            slab: self.slab,
        }
    }

    /// A handle to a freshly allocated slab that shares this composite's
    /// type header, renderer override included.
    pub(crate) fn with_slab(&self, slab: SlabRef) -> Self {
        CompositeValue {
            header: Arc::clone(&self.header),
            slab,
        }
    }

    #[inline]
    pub fn location(&self) -> &Location {
        &self.header.location
    }

    #[inline]
    pub fn qualified_identifier(&self) -> &str {
        &self.header.qualified_identifier
    }

    #[inline]
    pub fn kind(&self) -> CompositeKind {
        self.header.kind
    }

    #[inline]
    pub fn is_resource(&self) -> bool {
        self.header.kind.is_resource()
    }

    /// Location-qualified type ID, e.g. `S.test.Foo`.
    pub fn type_id(&self) -> String {
        self.header.location.type_id(&self.header.qualified_identifier)
    }

    pub fn static_type(&self) -> StaticType {
        StaticType::composite(
            self.header.location.clone(),
            self.header.qualified_identifier.clone(),
        )
    }

    pub fn stringer(&self) -> Option<&CompositeStringer> {
        self.header.stringer.as_ref()
    }

    #[inline]
    pub fn slab_id(&self) -> SlabId {
        self.slab.id()
    }

    pub(crate) fn slab(&self) -> &SlabRef {
        &self.slab
    }

    pub fn owner(&self) -> ValueResult<Address> {
        self.slab.owner()
    }

    pub fn field_count(&self) -> ValueResult<usize> {
        Ok(self.slab.storage()?.map_len(self.slab.id())?)
    }

    /// Snapshot of `(name, value)` pairs in field order.
    pub fn fields(&self) -> ValueResult<Vec<(String, Value)>> {
        let entries = self.slab.storage()?.map_entries(self.slab.id())?;
        Ok(entries
            .into_iter()
            .map(|entry| {
                let name = match &entry.key {
                    Value::String(name) => name.to_string(),
                    other => other.to_string(),
                };
                (name, entry.value)
            })
            .collect())
    }

    pub fn field_names(&self) -> ValueResult<Vec<String>> {
        Ok(self.fields()?.into_iter().map(|(name, _)| name).collect())
    }

    pub fn get_member(&self, name: &str) -> ValueResult<Option<Value>> {
        let entry = self.slab.storage()?.map_get(self.slab.id(), name)?;
        Ok(entry.map(|entry| entry.value))
    }

    /// Set field `name`, re-parenting `value` to this composite's owner.
    ///
    /// Returns the previous field value detached to the zero address.
    pub fn set_member(&self, name: &str, value: Value) -> ValueResult<Option<Value>> {
        let storage = self.slab.storage()?;
        ownership::set_owner(&value, storage.owner(self.slab.id())?)?;
        let previous = storage.map_set(
            self.slab.id(),
            name.to_string(),
            MapEntry::new(Value::string(name), value),
        )?;
        previous.map(|entry| detach(entry.value)).transpose()
    }

    /// Remove field `name`, returning its value detached to the zero address.
    pub fn remove_member(&self, name: &str) -> ValueResult<Option<Value>> {
        let removed = self.slab.storage()?.map_remove(self.slab.id(), name)?;
        removed.map(|entry| detach(entry.value)).transpose()
    }

    /// The raw value of an enum case, `None` for other kinds.
    pub fn raw_value(&self) -> ValueResult<Option<Value>> {
        if self.header.kind != CompositeKind::Enum {
            return Ok(None);
        }
        self.get_member(ENUM_RAW_VALUE_FIELD_NAME)
    }
}

fn detach(value: Value) -> ValueResult<Value> {
    ownership::set_owner(&value, Address::ZERO)?;
    Ok(value)
}

impl PartialEq for CompositeValue {
    fn eq(&self, other: &Self) -> bool {
        self.slab == other.slab
    }
}

impl Eq for CompositeValue {}

impl std::hash::Hash for CompositeValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.slab.hash(state);
    }
}

impl fmt::Debug for CompositeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeValue")
            .field("type_id", &self.type_id())
            .field("kind", &self.header.kind)
            .field("slab", &self.slab)
            .finish_non_exhaustive()
    }
}
