//! Core types for schema documentation generation.

use serde_json::{Map, Value};

/// Private extension keywords recognized on top of draft-04 vocabulary.
pub const EXTENSION_KEYWORDS: &[&str] = &["noDisplay", "private", "rel", "exclusive", "generator"];

/// Sentinel value of `rel` marking an id-scoped self-reference.
pub const REL_SELF: &str = "self";

/// Recursion budget shared by the resolver and the extractor.
///
/// Self-referential schemas that never bottom out are reported as cycles
/// instead of overflowing the stack.
pub const MAX_DEPTH: usize = 64;

/// Returns the JSON type name for a runtime value.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Composition kind of a schema node.
///
/// Drives the extractor's dispatch: a node is classified once and each
/// combinator goes to its own handler. The resolver applies the keyword
/// steps cumulatively (one definition can take contributions from `allOf`,
/// the union keywords, and `properties` at once) and shares the keyword
/// helpers below instead of this classification.
#[derive(Debug, Clone, Copy)]
pub enum Composition<'a> {
    /// `allOf` - every subschema applies, merged left to right.
    AllOf(&'a [Value]),
    /// `oneOf` - exactly one subschema models the value.
    OneOf(&'a [Value]),
    /// `anyOf` - at least one subschema models the value.
    AnyOf(&'a [Value]),
    /// `type: "array"` - the element shape lives under `items`.
    ArrayItems(Option<&'a Value>),
    /// Plain object schema with declared `properties`.
    ObjectProps(&'a Map<String, Value>),
    /// No composition keyword - scalar or opaque leaf.
    Leaf,
}

/// Classify a schema node by its dominant composition keyword.
///
/// Precedence mirrors extraction dispatch: arrays first (their `items` may
/// themselves compose), then `allOf`, then the union keywords, then declared
/// properties. Nodes matching nothing are leaves.
pub fn classify(node: &Value) -> Composition<'_> {
    if node.get("type").and_then(Value::as_str) == Some("array") {
        return Composition::ArrayItems(node.get("items"));
    }
    if let Some(members) = node.get("allOf").and_then(Value::as_array) {
        return Composition::AllOf(members);
    }
    if let Some(variants) = node.get("oneOf").and_then(Value::as_array) {
        return Composition::OneOf(variants);
    }
    if let Some(variants) = node.get("anyOf").and_then(Value::as_array) {
        return Composition::AnyOf(variants);
    }
    if let Some(props) = node.get("properties").and_then(Value::as_object) {
        return Composition::ObjectProps(props);
    }
    Composition::Leaf
}

/// True when the node carries a boolean extension flag set to `true`.
pub fn is_flagged(node: &Value, flag: &str) -> bool {
    node.get(flag).and_then(Value::as_bool).unwrap_or(false)
}

/// True when `additionalProperties` is explicitly `false` (closed schema).
pub fn is_closed(node: &Value) -> bool {
    node.get("additionalProperties") == Some(&Value::Bool(false))
}

/// Schema-valued `additionalProperties`, if any.
pub fn additional_properties_schema(node: &Value) -> Option<&Value> {
    node.get("additionalProperties").filter(|v| v.is_object())
}

/// The node's `required` list as owned names; missing or malformed entries
/// degrade to the empty list.
pub fn required_names(node: &Value) -> Vec<String> {
    node.get("required")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

/// The node's `exclusive` groups: sequences of property-name groups where
/// only the first member of each group survives in an example.
pub fn exclusive_groups(node: &Value) -> Vec<Vec<String>> {
    node.get("exclusive")
        .and_then(Value::as_array)
        .map(|groups| {
            groups
                .iter()
                .filter_map(Value::as_array)
                .map(|group| {
                    group
                        .iter()
                        .filter_map(|v| v.as_str().map(String::from))
                        .collect()
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Options for example extraction.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    /// Merge examples of schema-valued `additionalProperties` into object
    /// examples. Individual nodes can also opt in via
    /// `generator.includeAdditionalProperties`.
    pub include_additional_properties: bool,
}

impl ExtractOptions {
    /// Effective opt-in for a given node: global option or per-node flag.
    pub fn includes_additional(&self, node: &Value) -> bool {
        self.include_additional_properties
            || node
                .get("generator")
                .and_then(|g| g.get("includeAdditionalProperties"))
                .and_then(Value::as_bool)
                .unwrap_or(false)
    }
}
