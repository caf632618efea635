//! String rendering.
//!
//! [`Value::recursive_string`] is the human-readable form used by `Display`.
//! It threads a [`SeenReferences`] set through the recursion: an ephemeral
//! reference met again while it is still being rendered prints as `...`,
//! so a self-containing array renders as `[[...]]`.
//!
//! [`Value::key_string`] is the compact form used for dictionary keys. Only
//! hashable kinds have one.

use std::fmt;
use std::sync::Arc;

use ember_stack::ensure_sufficient_stack;
use rustc_hash::FxHashSet;

use crate::value::{BlockValue, CompositeValue, Value};
use crate::ValueResult;

/// Identity of a shared allocation, used to key cycle-detection sets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReferenceId(usize);

impl ReferenceId {
    pub(crate) fn of<T: ?Sized>(arc: &Arc<T>) -> Self {
        ReferenceId(Arc::as_ptr(arc).cast::<()>() as usize)
    }
}

/// References currently on the active rendering (or reification) path.
#[derive(Clone, Debug, Default)]
pub struct SeenReferences {
    active: FxHashSet<ReferenceId>,
}

impl SeenReferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: ReferenceId) -> bool {
        self.active.contains(&id)
    }

    /// Mark `id` as active. Returns `false` if it already was.
    pub fn insert(&mut self, id: ReferenceId) -> bool {
        self.active.insert(id)
    }

    pub fn remove(&mut self, id: ReferenceId) {
        self.active.remove(&id);
    }

    /// Run `f` with `id` marked active, unmarking it afterwards.
    ///
    /// Returns `None` without running `f` if `id` is already active.
    pub fn visit<R>(&mut self, id: ReferenceId, f: impl FnOnce(&mut Self) -> R) -> Option<R> {
        if !self.insert(id) {
            return None;
        }
        let result = f(self);
        self.remove(id);
        Some(result)
    }
}

/// Rendering of a reference met again on the active path.
const CYCLE_MARKER: &str = "...";

impl Value {
    /// Human-readable rendering, cycle-safe through `seen`.
    pub fn recursive_string(&self, seen: &mut SeenReferences) -> String {
        ensure_sufficient_stack(|| match self {
            Value::Void => "()".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Nil => "nil".to_string(),
            Value::Some(inner) => inner.recursive_string(seen),
            Value::String(s) => format!("\"{}\"", &**s),
            Value::Address(address) => address.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Array(array) => or_error(array.elements().map(|elements| {
                let items: Vec<String> = elements
                    .iter()
                    .map(|element| element.recursive_string(seen))
                    .collect();
                format!("[{}]", items.join(", "))
            })),
            Value::Dictionary(dictionary) => or_error(dictionary.entries().map(|entries| {
                let items: Vec<String> = entries
                    .iter()
                    .map(|(key, value)| {
                        format!(
                            "{}: {}",
                            key.recursive_string(seen),
                            value.recursive_string(seen)
                        )
                    })
                    .collect();
                format!("{{{}}}", items.join(", "))
            })),
            Value::Composite(composite) => or_error(composite_string(composite, seen)),
            Value::EphemeralReference(reference) => seen
                .visit(reference.id(), |seen| reference.value().recursive_string(seen))
                .unwrap_or_else(|| CYCLE_MARKER.to_string()),
            Value::StorageReference(_) => "StorageReference()".to_string(),
            Value::Capability(capability) => capability.to_string(),
            Value::Link(link) => link.to_string(),
            Value::Path(path) => path.to_string(),
            Value::Type(ty) => ty.to_string(),
            Value::Block(block) => or_error(block_string(block)),
        })
    }

    /// Compact rendering for use as a key: strings unquoted, enum cases as
    /// their raw value, paths with the domain's tag name.
    ///
    /// `None` for kinds that cannot key a dictionary.
    pub fn key_string(&self) -> Option<String> {
        match self {
            Value::Bool(b) => Some(b.to_string()),
            Value::String(s) => Some((**s).clone()),
            Value::Address(address) => Some(address.to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Path(path) => Some(path.key_string()),
            Value::Composite(composite) => match composite.raw_value() {
                Ok(raw_value) => raw_value?.key_string(),
                Err(err) => {
                    tracing::warn!(%err, "could not read enum raw value");
                    None
                }
            },
            _ => None,
        }
    }
}

fn or_error(rendered: ValueResult<String>) -> String {
    rendered.unwrap_or_else(|err| format!("<error: {err}>"))
}

fn composite_string(composite: &CompositeValue, seen: &mut SeenReferences) -> ValueResult<String> {
    if let Some(stringer) = composite.stringer() {
        return Ok(stringer(composite, seen));
    }
    let fields: Vec<String> = composite
        .fields()?
        .iter()
        .map(|(name, value)| format!("{name}: {}", value.recursive_string(seen)))
        .collect();
    Ok(format!("{}({})", composite.type_id(), fields.join(", ")))
}

fn block_string(block: &BlockValue) -> ValueResult<String> {
    Ok(format!(
        "Block(height: {}, view: {}, id: 0x{}, timestamp: {})",
        block.height,
        block.view,
        block.id_hex()?,
        block.timestamp_value()
    ))
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.recursive_string(&mut SeenReferences::new()))
    }
}
