//! Output types: flattened object definitions for documentation rendering.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Resolved properties keyed by name.
pub type PropertyMap<'a> = BTreeMap<String, PropertyDefinition<'a>>;

/// Flattened description of a schema node's object surface.
///
/// Borrows the source schema for the lifetime of the definition; the input is
/// never mutated and nothing is cached between builds.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectDefinition<'a> {
    /// Render-key identifier, freshly drawn at random per build. Not a
    /// content hash and not stable across calls.
    pub id: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,

    /// Every resolved property; `None` (not empty) when nothing resolved.
    #[serde(rename = "allProps", skip_serializing_if = "Option::is_none")]
    pub all_props: Option<PropertyMap<'a>>,

    /// Partition of `all_props` by the resolved required-name set. Each side
    /// is `None` when empty; when both are present their union equals
    /// `all_props` and their intersection is empty.
    #[serde(rename = "requiredProps", skip_serializing_if = "Option::is_none")]
    pub required_props: Option<PropertyMap<'a>>,

    #[serde(rename = "optionalProps", skip_serializing_if = "Option::is_none")]
    pub optional_props: Option<PropertyMap<'a>>,

    /// Nested definitions, one per `oneOf`/`anyOf` variant in source order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub objects: Vec<ObjectDefinition<'a>>,

    /// Formatted representative instance of the whole node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,

    /// Back-reference to the source node for downstream inspection; never
    /// serialized and never used for ownership.
    #[serde(skip)]
    pub original: &'a Value,
}

impl<'a> ObjectDefinition<'a> {
    pub(crate) fn new(id: u32, original: &'a Value) -> Self {
        Self {
            id,
            title: None,
            description: None,
            enum_values: None,
            all_props: None,
            required_props: None,
            optional_props: None,
            objects: Vec::new(),
            example: None,
            original,
        }
    }

    /// Insert a resolved property into `all_props`.
    pub(crate) fn insert_prop(&mut self, name: String, prop: PropertyDefinition<'a>) {
        self.all_props.get_or_insert_with(BTreeMap::new).insert(name, prop);
    }

    /// Split `all_props` into required/optional by membership in `required`.
    ///
    /// Empty partitions become `None`; an empty `all_props` is cleared to
    /// `None` as well.
    pub(crate) fn partition(&mut self, required: &[String]) {
        if self.all_props.as_ref().is_some_and(BTreeMap::is_empty) {
            self.all_props = None;
        }
        let Some(all) = &self.all_props else {
            self.required_props = None;
            self.optional_props = None;
            return;
        };

        let mut req = BTreeMap::new();
        let mut opt = BTreeMap::new();
        for (name, prop) in all {
            if required.iter().any(|r| r == name) {
                req.insert(name.clone(), prop.clone());
            } else {
                opt.insert(name.clone(), prop.clone());
            }
        }
        self.required_props = (!req.is_empty()).then_some(req);
        self.optional_props = (!opt.is_empty()).then_some(opt);
    }
}

/// Resolved description of a single property.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PropertyDefinition<'a> {
    /// Display type: the runtime type of the first `enum` element when an
    /// enum is present, otherwise the node's literal `type`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,

    /// Nested properties when the property is itself an object or an array
    /// of objects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<PropertyMap<'a>>,

    #[serde(rename = "oneOf", skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<ObjectDefinition<'a>>>,

    #[serde(rename = "anyOf", skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<ObjectDefinition<'a>>>,
}
