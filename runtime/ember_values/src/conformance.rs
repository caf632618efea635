//! Dynamic-type conformance.
//!
//! [`Value::conforms_to_dynamic_type`] checks a value against a reified
//! type. Mismatches are `false`, never errors; so are storage reads that
//! fail along the way.
//!
//! Cycles can only pass through ephemeral references. Before descending into
//! a reference's target, the pair (reference, reference type) is looked up
//! in [`TypeConformanceResults`]. A hit returns the cached answer. A miss
//! records `true` before recursing and overwrites it with the real answer
//! afterwards, so re-entering the same pair while it is being checked
//! terminates instead of recursing forever.

use ember_stack::ensure_sufficient_stack;
use rustc_hash::FxHashMap;

use crate::dynamic_type::{DynamicType, EphemeralReferenceDynamicType};
use crate::value::{
    ArrayValue, CompositeValue, DictionaryValue, EphemeralReferenceValue, Value,
};
use crate::{ReferenceId, SeenReferences, ValueResult};

/// Cache of conformance results for (reference, reference type) pairs.
#[derive(Clone, Debug, Default)]
pub struct TypeConformanceResults {
    results: FxHashMap<(ReferenceId, EphemeralReferenceDynamicType), bool>,
}

impl TypeConformanceResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(
        &self,
        reference: ReferenceId,
        dynamic_type: &EphemeralReferenceDynamicType,
    ) -> Option<bool> {
        self.results
            .get(&(reference, dynamic_type.clone()))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    fn record(
        &mut self,
        reference: ReferenceId,
        dynamic_type: &EphemeralReferenceDynamicType,
        result: bool,
    ) {
        self.results
            .insert((reference, dynamic_type.clone()), result);
    }
}

impl Value {
    /// Whether this value structurally conforms to `dynamic_type`.
    pub fn conforms_to_dynamic_type(
        &self,
        dynamic_type: &DynamicType,
        results: &mut TypeConformanceResults,
    ) -> bool {
        ensure_sufficient_stack(|| match (self, dynamic_type) {
            (Value::Void, DynamicType::Void)
            | (Value::Nil, DynamicType::Nil)
            | (Value::Bool(_), DynamicType::Bool)
            | (Value::String(_), DynamicType::String)
            | (Value::Address(_), DynamicType::Address)
            | (Value::Link(_), DynamicType::Link)
            | (Value::Type(_), DynamicType::MetaType)
            | (Value::Block(_), DynamicType::Block) => true,
            (Value::Some(inner), DynamicType::Some(inner_type)) => {
                inner.conforms_to_dynamic_type(inner_type, results)
            }
            (Value::Number(n), DynamicType::Number(kind)) => n.static_type() == *kind,
            (
                Value::Array(array),
                DynamicType::Array {
                    element_types,
                    static_type,
                },
            ) => settle(array_conforms(array, element_types, static_type.as_ref(), results)),
            (
                Value::Dictionary(dictionary),
                DynamicType::Dictionary {
                    entry_types,
                    static_type,
                },
            ) => settle(dictionary_conforms(
                dictionary,
                entry_types,
                static_type.as_ref(),
                results,
            )),
            (
                Value::Composite(composite),
                DynamicType::Composite {
                    location,
                    qualified_identifier,
                    kind,
                },
            ) => {
                composite.location() == location
                    && composite.qualified_identifier() == qualified_identifier
                    && composite.kind() == *kind
                    && settle(fields_conform(composite, results))
            }
            (Value::EphemeralReference(reference), DynamicType::EphemeralReference(ty)) => {
                reference_conforms(reference, ty, results)
            }
            (
                Value::StorageReference(reference),
                DynamicType::StorageReference {
                    authorized,
                    borrowed_type,
                },
            ) => reference.authorized == *authorized && reference.borrowed_type == *borrowed_type,
            (Value::Capability(capability), DynamicType::Capability { borrow_type }) => {
                capability.borrow_type == *borrow_type
            }
            (Value::Path(path), DynamicType::Path { domain }) => path.domain == *domain,
            _ => false,
        })
    }
}

fn settle(result: ValueResult<bool>) -> bool {
    result.unwrap_or_else(|err| {
        tracing::warn!(%err, "conformance check could not read storage");
        false
    })
}

fn array_conforms(
    array: &ArrayValue,
    element_types: &[DynamicType],
    static_type: Option<&ember_ir::StaticType>,
    results: &mut TypeConformanceResults,
) -> ValueResult<bool> {
    if array.static_type() != static_type {
        return Ok(false);
    }
    let elements = array.elements()?;
    if elements.len() != element_types.len() {
        return Ok(false);
    }
    Ok(elements
        .iter()
        .zip(element_types)
        .all(|(element, element_type)| element.conforms_to_dynamic_type(element_type, results)))
}

fn dictionary_conforms(
    dictionary: &DictionaryValue,
    entry_types: &[(DynamicType, DynamicType)],
    static_type: Option<&ember_ir::StaticType>,
    results: &mut TypeConformanceResults,
) -> ValueResult<bool> {
    if dictionary.static_type() != static_type {
        return Ok(false);
    }
    let entries = dictionary.entries()?;
    if entries.len() != entry_types.len() {
        return Ok(false);
    }
    Ok(entries
        .iter()
        .zip(entry_types)
        .all(|((key, value), (key_type, value_type))| {
            key.conforms_to_dynamic_type(key_type, results)
                && value.conforms_to_dynamic_type(value_type, results)
        }))
}

/// Every field conforms to its own freshly reified dynamic type.
fn fields_conform(
    composite: &CompositeValue,
    results: &mut TypeConformanceResults,
) -> ValueResult<bool> {
    for (_, value) in composite.fields()? {
        let field_type = value.dynamic_type(&mut SeenReferences::new())?;
        if !value.conforms_to_dynamic_type(&field_type, results) {
            return Ok(false);
        }
    }
    Ok(true)
}

fn reference_conforms(
    reference: &EphemeralReferenceValue,
    ty: &EphemeralReferenceDynamicType,
    results: &mut TypeConformanceResults,
) -> bool {
    if reference.authorized() != ty.authorized || reference.borrowed_type() != ty.borrowed_type.as_ref()
    {
        return false;
    }

    let id = reference.id();
    if let Some(cached) = results.get(id, ty) {
        return cached;
    }

    // Optimistic entry; the final answer depends on the rest of the graph.
    results.record(id, ty, true);
    let result = match &ty.inner {
        Some(inner) => reference.value().conforms_to_dynamic_type(inner, results),
        None => false,
    };
    results.record(id, ty, result);
    result
}
