//! Example extraction - synthesizes a representative instance value from a
//! schema node.
//!
//! The extractor walks the same composition algebra as the resolver but
//! produces only a value tree, no property metadata. Arrays are represented
//! by a single element, unions by their first variant, and `rel: "self"`
//! references by an example of the nearest enclosing id-bearing scope.

use serde_json::{Map, Value};

use crate::error::ExtractError;
use crate::types::{
    additional_properties_schema, classify, exclusive_groups, is_closed, is_flagged, Composition,
    ExtractOptions, MAX_DEPTH, REL_SELF,
};

/// Extract a representative example value for a schema node.
///
/// The node acts as its own scope for `rel: "self"` resolution.
///
/// # Errors
///
/// Returns `ExtractError::MissingSchema` when `component` is null, or
/// `ExtractError::SchemaCycle` when extraction never bottoms out.
pub fn extract(component: &Value, options: &ExtractOptions) -> Result<Value, ExtractError> {
    extract_with_root(component, component, options)
}

/// Extract with an explicit scope for `rel: "self"` resolution.
///
/// `root` is rebound whenever a descendant carries an `id` marker, matching
/// hyper-schema semantics: self-references resolve against the nearest
/// enclosing id-bearing ancestor, not the original caller's root.
pub fn extract_with_root(
    component: &Value,
    root: &Value,
    options: &ExtractOptions,
) -> Result<Value, ExtractError> {
    if component.is_null() {
        return Err(ExtractError::MissingSchema);
    }
    extract_inner(component, root, options, 0)
}

fn extract_inner(
    component: &Value,
    root: &Value,
    options: &ExtractOptions,
    depth: usize,
) -> Result<Value, ExtractError> {
    if depth > MAX_DEPTH {
        return Err(ExtractError::SchemaCycle { depth });
    }

    // An id marker re-anchors self-reference resolution for this subtree.
    let root = if component.get("id").is_some() {
        component
    } else {
        root
    };

    let mut reduced = match classify(component) {
        // One representative element, not multiple.
        Composition::ArrayItems(items) => {
            return Ok(Value::Array(match items {
                Some(items) => vec![extract_inner(items, root, options, depth + 1)?],
                None => Vec::new(),
            }));
        }

        Composition::AllOf(members) => {
            let mut acc = Map::new();
            for member in members {
                let value = extract_inner(member, root, options, depth + 1)?;
                if is_closed(member) {
                    // Closed-schema override: discard what came before.
                    acc = match value {
                        Value::Object(map) => map,
                        _ => Map::new(),
                    };
                } else if let Value::Object(map) = value {
                    for (key, val) in map {
                        acc.insert(key, val);
                    }
                }
            }
            Value::Object(acc)
        }

        // Deterministic tie-break: always the first listed alternative.
        Composition::OneOf(variants) | Composition::AnyOf(variants) => match variants.first() {
            Some(first) => extract_inner(first, root, options, depth + 1)?,
            None => Value::Object(Map::new()),
        },

        other => {
            if component.get("rel").and_then(Value::as_str) == Some(REL_SELF) {
                // Example of the whole enclosing schema, scoped to itself.
                extract_inner(root, root, options, depth + 1)?
            } else if let Composition::ObjectProps(props) = other {
                Value::Object(map_properties_inner(props, root, options, depth)?)
            } else {
                leaf_example(component)
            }
        }
    };

    if let Some(additional) = additional_properties_schema(component) {
        if options.includes_additional(component) {
            let value = extract_inner(additional, root, options, depth + 1)?;
            if let (Value::Object(acc), Value::Object(map)) = (&mut reduced, value) {
                for (key, val) in map {
                    acc.entry(key).or_insert(val);
                }
            }
        }
    }

    // Composition branches can legitimately reduce to an empty mapping;
    // fall back to the node's own declared properties.
    if reduced.as_object().is_some_and(Map::is_empty) {
        if let Some(props) = component.get("properties").and_then(Value::as_object) {
            reduced = Value::Object(map_properties_inner(props, root, options, depth)?);
        }
    }

    if let Value::Object(map) = &mut reduced {
        for group in exclusive_groups(component) {
            for name in group.iter().skip(1) {
                map.shift_remove(name);
            }
        }
    }

    Ok(reduced)
}

/// Map each visible property to its example value.
///
/// Properties whose name starts with `__` or that are flagged `private` are
/// skipped. A property literally named `ID` surfaces under the key `id`; the
/// bare `id` key is reserved as a schema-scope marker.
pub fn map_properties_to_examples(
    props: &Map<String, Value>,
    root: &Value,
    options: &ExtractOptions,
) -> Result<Map<String, Value>, ExtractError> {
    map_properties_inner(props, root, options, 0)
}

fn map_properties_inner(
    props: &Map<String, Value>,
    root: &Value,
    options: &ExtractOptions,
    depth: usize,
) -> Result<Map<String, Value>, ExtractError> {
    let mut out = Map::new();
    for (name, prop) in props {
        if name.starts_with("__") || is_flagged(prop, "private") {
            continue;
        }
        let key = if name == "ID" { "id".to_string() } else { name.clone() };
        let value = extract_inner(prop, root, options, depth + 1)?;
        out.insert(key, value);
    }
    Ok(out)
}

/// Literal example for a leaf node: `example`, then `default`, then an empty
/// mapping for object-shaped nodes, then the `"unknown"` placeholder.
fn leaf_example(component: &Value) -> Value {
    if let Some(example) = component.get("example") {
        return example.clone();
    }
    if let Some(default) = component.get("default") {
        return default.clone();
    }
    if component.is_object() {
        Value::Object(Map::new())
    } else {
        Value::String("unknown".to_string())
    }
}
