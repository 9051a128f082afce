//! Schema documentation generator
//!
//! Derives two artifacts from JSON-Schema-like documents (draft-04 style plus
//! private extensions): a flattened *object definition* - the properties a
//! schema exposes, partitioned into required and optional - and a synthetic
//! *example value* a renderer can display as a representative instance.
//!
//! Both derivations share one recursive algebra over composition keywords:
//! `allOf` merging, `oneOf`/`anyOf` variant selection, `additionalProperties`,
//! array `items` unwrapping, id-scoped self-reference (`rel: "self"`), and
//! visibility filtering (`noDisplay`, `private`, double-underscore names).
//!
//! # Example
//!
//! ```
//! use schema_docgen::{build, extract, ExtractOptions};
//! use serde_json::json;
//!
//! let schema = json!({
//!     "title": "Order",
//!     "required": ["id"],
//!     "properties": {
//!         "id": { "type": "string", "example": "ord-1" },
//!         "note": { "type": "string" }
//!     }
//! });
//!
//! let def = build(&schema).unwrap().unwrap();
//! assert!(def.required_props.unwrap().contains_key("id"));
//! assert!(def.optional_props.unwrap().contains_key("note"));
//!
//! let example = extract(&schema, &ExtractOptions::default()).unwrap();
//! assert_eq!(example["id"], json!("ord-1"));
//! ```
//!
//! # Extension keywords
//!
//! | Keyword | Effect |
//! |---------|--------|
//! | `noDisplay` | Node or property is excluded from definitions |
//! | `private` | Property is excluded from example values |
//! | `rel: "self"` | Example resolves to the nearest id-bearing scope |
//! | `exclusive` | Only the first member of each group survives in examples |
//! | `generator.includeAdditionalProperties` | Merge catch-all examples |
//!
//! The input schema is never mutated, results are built fresh per call, and
//! self-referential schemas that never bottom out are reported as cycle
//! errors instead of overflowing the stack.

mod curl;
mod definition;
mod error;
mod example;
mod format;
mod loader;
mod resolver;
mod types;

pub use curl::{generate, generate_with, CurlOptions};
pub use definition::{ObjectDefinition, PropertyDefinition, PropertyMap};
pub use error::{ExtractError, FormatError, LoadError, ResolveError};
pub use example::{extract, extract_with_root, map_properties_to_examples};
pub use format::{Formatter, JsonFormatter};
pub use loader::{is_url, load_schema, load_schema_auto, load_schema_str};
pub use resolver::{build, SchemaResolver};
pub use types::{
    classify, json_type_name, Composition, ExtractOptions, EXTENSION_KEYWORDS, REL_SELF,
};

#[cfg(feature = "remote")]
pub use loader::load_schema_url;
