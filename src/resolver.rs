//! Object-definition resolution - flattens a schema node into the property
//! surface a documentation renderer displays.
//!
//! The resolver walks the same composition algebra as the extractor but keeps
//! property metadata: every node becomes an [`ObjectDefinition`] with its
//! properties partitioned into required/optional, nested definitions per
//! `oneOf`/`anyOf` variant, and a formatted example string.

use std::collections::HashSet;

use rand::Rng;
use serde_json::{Map, Value};

use crate::definition::{ObjectDefinition, PropertyDefinition, PropertyMap};
use crate::error::ResolveError;
use crate::example::extract;
use crate::format::{Formatter, JsonFormatter};
use crate::types::{
    additional_properties_schema, is_closed, is_flagged, json_type_name, required_names,
    ExtractOptions, MAX_DEPTH,
};

/// Builds object definitions from schema nodes.
///
/// Holds the formatter used to stringify examples and the extraction options
/// forwarded to the example extractor. Every build produces a fresh result
/// tree; nothing is cached and the input is never mutated.
pub struct SchemaResolver<F = JsonFormatter> {
    formatter: F,
    options: ExtractOptions,
}

impl SchemaResolver<JsonFormatter> {
    /// Resolver with the default JSON formatter.
    pub fn new() -> Self {
        Self::with_formatter(JsonFormatter::default())
    }
}

impl Default for SchemaResolver<JsonFormatter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Formatter> SchemaResolver<F> {
    /// Resolver with a custom formatter.
    pub fn with_formatter(formatter: F) -> Self {
        Self {
            formatter,
            options: ExtractOptions::default(),
        }
    }

    /// Set the extraction options used for example values.
    pub fn extract_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the object definition for a schema node.
    ///
    /// Returns `Ok(None)` when the node is flagged `noDisplay`.
    ///
    /// # Errors
    ///
    /// Fails when the formatter rejects an example value, or when the schema
    /// revisits one of its own scopes (cycle).
    pub fn build<'a>(
        &self,
        schema: &'a Value,
    ) -> Result<Option<ObjectDefinition<'a>>, ResolveError> {
        let mut walk = Walk::default();
        self.build_node(schema, &mut walk)
    }

    /// Resolve a single property node.
    ///
    /// Returns `Ok(None)` when the property is flagged `noDisplay`.
    pub fn define_property<'a>(
        &self,
        prop: &'a Value,
    ) -> Result<Option<PropertyDefinition<'a>>, ResolveError> {
        let mut walk = Walk::default();
        self.define_property_inner(prop, &mut walk)
    }

    fn build_node<'a>(
        &self,
        schema: &'a Value,
        walk: &mut Walk,
    ) -> Result<Option<ObjectDefinition<'a>>, ResolveError> {
        if is_flagged(schema, "noDisplay") {
            return Ok(None);
        }
        if walk.depth >= MAX_DEPTH {
            return Err(ResolveError::SchemaCycle { depth: walk.depth });
        }
        walk.depth += 1;

        let scope = schema.get("id").and_then(Value::as_str).map(str::to_owned);
        if let Some(scope) = &scope {
            if !walk.scopes.insert(scope.clone()) {
                return Err(ResolveError::ScopeCycle {
                    scope: scope.clone(),
                });
            }
        }

        let result = self.build_node_inner(schema, walk);

        walk.depth -= 1;
        if let Some(scope) = &scope {
            walk.scopes.remove(scope);
        }
        result
    }

    fn build_node_inner<'a>(
        &self,
        schema: &'a Value,
        walk: &mut Walk,
    ) -> Result<Option<ObjectDefinition<'a>>, ResolveError> {
        let mut def = ObjectDefinition::new(render_id(), schema);
        let mut required = required_names(schema);
        let mut hidden: Vec<String> = Vec::new();

        // 1. allOf: fold members into the accumulator. A closed member
        // (additionalProperties: false) replaces everything merged so far and
        // suppresses the rest of the chain.
        if let Some(members) = schema.get("allOf").and_then(Value::as_array) {
            let mut sealed = false;
            for member in members {
                if let Some(props) = member.get("properties").and_then(Value::as_object) {
                    for (name, prop) in props {
                        if is_flagged(prop, "noDisplay") {
                            hidden.push(name.clone());
                        }
                    }
                }
                if sealed {
                    continue;
                }
                let Some(sub) = self.build_node(member, walk)? else {
                    continue;
                };
                if is_closed(member) {
                    let id = def.id;
                    def = sub;
                    def.id = id;
                    def.original = schema;
                    required = required_names(member);
                    sealed = true;
                } else {
                    required.extend(required_names(member));
                    merge_definition(&mut def, sub);
                }
            }
        }

        // 2. oneOf / anyOf: every variant becomes a nested definition; none
        // is privileged.
        for key in ["oneOf", "anyOf"] {
            if let Some(variants) = schema.get(key).and_then(Value::as_array) {
                for variant in variants {
                    if let Some(sub) = self.build_node(variant, walk)? {
                        def.objects.push(sub);
                    }
                }
            }
        }

        // 3. Declared properties. A closed object narrows to exactly its own
        // declared set, discarding anything accumulated from allOf.
        if let Some(props) = schema.get("properties").and_then(Value::as_object) {
            if is_closed(schema) {
                def.all_props = None;
            }
            self.resolve_props_into(&mut def, props, walk)?;
            if let Some(additional) = additional_properties_schema(schema) {
                if let Some(extra) = additional.get("properties").and_then(Value::as_object) {
                    self.resolve_props_into(&mut def, extra, walk)?;
                }
            }
        }

        // 4. A schema-valued catch-all next to a union applies to every
        // variant.
        if !def.objects.is_empty() {
            if let Some(additional) = additional_properties_schema(schema) {
                if let Some(extra) = additional.get("properties").and_then(Value::as_object) {
                    let shared = self.resolve_props(extra, walk)?;
                    for variant in &mut def.objects {
                        // The variant's own finalization already resolved its
                        // full required set (allOf members included); reuse it
                        // rather than re-reading the raw node.
                        let variant_required: Vec<String> = variant
                            .required_props
                            .as_ref()
                            .map(|m| m.keys().cloned().collect())
                            .unwrap_or_default();
                        for (name, prop) in &shared {
                            variant.insert_prop(name.clone(), prop.clone());
                        }
                        variant.partition(&variant_required);
                    }
                }
            }
        }

        // 5. Array schemas describe the shape of their elements.
        if let Some(items) = schema.get("items").filter(|v| v.is_object()) {
            if let Some(props) = items.get("properties").and_then(Value::as_object) {
                self.resolve_props_into(&mut def, props, walk)?;
            }
            if let Some(additional) = additional_properties_schema(items) {
                if let Some(extra) = additional.get("properties").and_then(Value::as_object) {
                    self.resolve_props_into(&mut def, extra, walk)?;
                }
            }
        }

        // Finalization.
        if let Some(title) = schema.get("title").and_then(Value::as_str) {
            def.title = Some(title.to_string());
        }
        if let Some(description) = schema.get("description").and_then(Value::as_str) {
            def.description = Some(description.to_string());
        }
        if let Some(choices) = schema.get("enum").and_then(Value::as_array) {
            def.enum_values = Some(choices.clone());
        }

        // Properties any allOf member hides are dropped post-merge, even when
        // an earlier member contributed them. Operates on the owned
        // accumulator; the input is untouched.
        if !hidden.is_empty() {
            if let Some(all) = &mut def.all_props {
                for name in &hidden {
                    all.remove(name);
                }
            }
        }

        def.partition(&required);
        def.example = Some(self.format_example(schema)?);
        Ok(Some(def))
    }

    fn define_property_inner<'a>(
        &self,
        prop: &'a Value,
        walk: &mut Walk,
    ) -> Result<Option<PropertyDefinition<'a>>, ResolveError> {
        if is_flagged(prop, "noDisplay") {
            return Ok(None);
        }

        let mut pd = PropertyDefinition::default();
        let mut fully_built = false;

        if prop.get("allOf").is_some() {
            // Composed property: re-enter the full algebra.
            if let Some(built) = self.build_node(prop, walk)? {
                self.project_definition(&mut pd, prop, built);
                fully_built = true;
            }
        } else if let Some((key, variants)) = union_variants(prop) {
            let mut nested = Vec::new();
            for alt in variants {
                let alt_type = alt.get("type").and_then(Value::as_str);
                if matches!(alt_type, Some("object") | Some("array")) {
                    if let Some(built) = self.build_node(alt, walk)? {
                        nested.push(built);
                    }
                } else if let Some(alt_pd) = self.define_property_inner(alt, walk)? {
                    // First scalar alternative's example wins.
                    if pd.example.is_none() {
                        pd.example = alt_pd.example;
                    }
                }
            }
            if !nested.is_empty() {
                match key {
                    "oneOf" => pd.one_of = Some(nested),
                    _ => pd.any_of = Some(nested),
                }
            }
        } else if let Some(props) = nested_properties(prop) {
            let mut map = PropertyMap::new();
            for (name, sub) in props {
                if let Some(sub_pd) = self.define_property_inner(sub, walk)? {
                    map.insert(name.clone(), sub_pd);
                }
            }
            pd.properties = Some(map);
        }

        pd.kind = prop
            .get("enum")
            .and_then(Value::as_array)
            .and_then(|arr| arr.first())
            .map(|head| json_type_name(head).to_string())
            .or_else(|| prop.get("type").and_then(Value::as_str).map(String::from));

        if pd.example.is_none() {
            pd.example = Some(self.format_example(prop)?);
        }

        // Back-fill from a full build so composition metadata survives even
        // for plain properties.
        if !fully_built {
            if let Some(built) = self.build_node(prop, walk)? {
                if pd.properties.is_none() {
                    pd.properties = built.all_props.clone();
                }
                if !built.objects.is_empty() {
                    if prop.get("oneOf").is_some() && pd.one_of.is_none() {
                        pd.one_of = Some(built.objects);
                    } else if prop.get("anyOf").is_some() && pd.any_of.is_none() {
                        pd.any_of = Some(built.objects);
                    }
                }
            }
        }

        Ok(Some(pd))
    }

    /// Project a fully built definition onto a property definition.
    fn project_definition<'a>(
        &self,
        pd: &mut PropertyDefinition<'a>,
        prop: &Value,
        built: ObjectDefinition<'a>,
    ) {
        pd.example = built.example;
        pd.properties = built.all_props;
        if !built.objects.is_empty() {
            if prop.get("oneOf").is_some() {
                pd.one_of = Some(built.objects);
            } else if prop.get("anyOf").is_some() {
                pd.any_of = Some(built.objects);
            }
        }
    }

    fn resolve_props<'a>(
        &self,
        props: &'a Map<String, Value>,
        walk: &mut Walk,
    ) -> Result<PropertyMap<'a>, ResolveError> {
        let mut out = PropertyMap::new();
        for (name, prop) in props {
            if let Some(pd) = self.define_property_inner(prop, walk)? {
                out.insert(name.clone(), pd);
            }
        }
        Ok(out)
    }

    fn resolve_props_into<'a>(
        &self,
        def: &mut ObjectDefinition<'a>,
        props: &'a Map<String, Value>,
        walk: &mut Walk,
    ) -> Result<(), ResolveError> {
        for (name, prop) in self.resolve_props(props, walk)? {
            def.insert_prop(name, prop);
        }
        Ok(())
    }

    /// Extract and format an example for a node. A formatter failure is
    /// re-raised with the serialized schema so the offending node can be
    /// located.
    fn format_example(&self, schema: &Value) -> Result<String, ResolveError> {
        let value = extract(schema, &self.options)?;
        self.formatter
            .format(&value)
            .map_err(|e| ResolveError::FormatFailed {
                schema: serde_json::to_string(schema)
                    .unwrap_or_else(|_| "<unserializable>".to_string()),
                message: e.to_string(),
            })
    }
}

/// Build an object definition with the default JSON formatter.
///
/// Convenience wrapper over [`SchemaResolver::build`].
pub fn build(schema: &Value) -> Result<Option<ObjectDefinition<'_>>, ResolveError> {
    SchemaResolver::new().build(schema)
}

/// Walk state: recursion depth plus the scope ids on the current path.
#[derive(Default)]
struct Walk {
    depth: usize,
    scopes: HashSet<String>,
}

/// Fresh render-key identifier. Random by design: the id exists only to key
/// DOM/UI nodes and carries no stability guarantee across builds.
fn render_id() -> u32 {
    rand::rng().random_range(0..=1_000_000_000)
}

fn union_variants(node: &Value) -> Option<(&'static str, &Vec<Value>)> {
    for key in ["oneOf", "anyOf"] {
        if let Some(variants) = node.get(key).and_then(Value::as_array) {
            return Some((key, variants));
        }
    }
    None
}

/// Nested property map of a node, either direct or through `items`.
fn nested_properties(node: &Value) -> Option<&Map<String, Value>> {
    node.get("properties")
        .and_then(Value::as_object)
        .or_else(|| {
            node.get("items")
                .and_then(|items| items.get("properties"))
                .and_then(Value::as_object)
        })
}

/// Right-biased deep merge: maps merge per key, sequences concatenate,
/// scalars from the later definition win.
fn merge_definition<'a>(acc: &mut ObjectDefinition<'a>, other: ObjectDefinition<'a>) {
    if let Some(props) = other.all_props {
        let all = acc.all_props.get_or_insert_with(Default::default);
        for (name, prop) in props {
            all.insert(name, prop);
        }
    }
    acc.objects.extend(other.objects);
    if let Some(choices) = other.enum_values {
        acc.enum_values
            .get_or_insert_with(Vec::new)
            .extend(choices);
    }
    if other.title.is_some() {
        acc.title = other.title;
    }
    if other.description.is_some() {
        acc.description = other.description;
    }
    if other.example.is_some() {
        acc.example = other.example;
    }
}
