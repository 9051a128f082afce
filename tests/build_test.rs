//! Integration tests for object-definition resolution.

use serde_json::{json, Value};
use schema_docgen::{build, JsonFormatter, ResolveError, SchemaResolver};

// === Partition Laws ===

mod partitions {
    use super::*;

    fn keys<'a>(props: &'a Option<schema_docgen::PropertyMap<'a>>) -> Vec<&'a String> {
        props.as_ref().map(|m| m.keys().collect()).unwrap_or_default()
    }

    #[test]
    fn union_of_partitions_equals_all_props() {
        let schema = json!({
            "required": ["a", "c"],
            "properties": {
                "a": { "type": "string" },
                "b": { "type": "number" },
                "c": { "type": "boolean" },
                "d": { "type": "string" }
            }
        });
        let def = build(&schema).unwrap().unwrap();

        let all = keys(&def.all_props);
        let req = keys(&def.required_props);
        let opt = keys(&def.optional_props);

        assert_eq!(all.len(), 4);
        assert_eq!(req.len() + opt.len(), all.len());
        for key in &req {
            assert!(!opt.contains(key));
        }
        for key in all {
            assert!(req.contains(&key) || opt.contains(&key));
        }
    }

    #[test]
    fn no_display_keys_excluded_from_all_partitions() {
        let schema = json!({
            "required": ["a", "b"],
            "properties": {
                "a": { "type": "string" },
                "b": { "type": "string", "noDisplay": true }
            }
        });
        let def = build(&schema).unwrap().unwrap();

        assert!(!def.all_props.as_ref().unwrap().contains_key("b"));
        assert!(!def.required_props.as_ref().unwrap().contains_key("b"));
        assert!(def.optional_props.is_none());
    }

    #[test]
    fn all_required_leaves_optional_none() {
        let schema = json!({
            "required": ["a"],
            "properties": { "a": {} }
        });
        let def = build(&schema).unwrap().unwrap();
        assert!(def.required_props.is_some());
        assert!(def.optional_props.is_none());
    }

    #[test]
    fn missing_required_defaults_to_all_optional() {
        let schema = json!({ "properties": { "a": {}, "b": {} } });
        let def = build(&schema).unwrap().unwrap();
        assert!(def.required_props.is_none());
        assert_eq!(def.optional_props.as_ref().unwrap().len(), 2);
    }
}

// === allOf Merging ===

mod all_of {
    use super::*;

    #[test]
    fn open_members_accumulate() {
        let schema = json!({ "allOf": [
            { "properties": { "a": { "type": "string" } } },
            { "properties": { "b": { "type": "number" } } }
        ]});
        let def = build(&schema).unwrap().unwrap();
        let all = def.all_props.unwrap();
        assert!(all.contains_key("a") && all.contains_key("b"));
    }

    #[test]
    fn closed_member_wins_chain() {
        let schema = json!({ "allOf": [
            { "properties": { "a": { "type": "string" } } },
            { "additionalProperties": false, "properties": { "c": { "type": "string" } } },
            { "properties": { "late": { "type": "string" } } }
        ]});
        let def = build(&schema).unwrap().unwrap();
        let all = def.all_props.unwrap();
        assert_eq!(all.keys().collect::<Vec<_>>(), vec!["c"]);
    }

    #[test]
    fn later_member_overrides_shared_property() {
        let schema = json!({ "allOf": [
            { "properties": { "a": { "type": "string" } } },
            { "properties": { "a": { "type": "number" } } }
        ]});
        let def = build(&schema).unwrap().unwrap();
        let all = def.all_props.unwrap();
        assert_eq!(all["a"].kind.as_deref(), Some("number"));
    }

    #[test]
    fn required_lists_accumulate_across_members() {
        let schema = json!({ "allOf": [
            { "required": ["a"], "properties": { "a": {} } },
            { "required": ["b"], "properties": { "b": {} } }
        ]});
        let def = build(&schema).unwrap().unwrap();
        let req = def.required_props.unwrap();
        assert!(req.contains_key("a") && req.contains_key("b"));
    }
}

// === Union Variants ===

mod unions {
    use super::*;

    #[test]
    fn one_of_variants_ordered() {
        let schema = json!({ "oneOf": [
            { "title": "A" },
            { "title": "B" },
            { "title": "C" }
        ]});
        let def = build(&schema).unwrap().unwrap();
        let titles: Vec<_> = def
            .objects
            .iter()
            .map(|o| o.title.as_deref().unwrap())
            .collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn no_display_variant_skipped() {
        let schema = json!({ "anyOf": [
            { "title": "Kept" },
            { "title": "Dropped", "noDisplay": true }
        ]});
        let def = build(&schema).unwrap().unwrap();
        assert_eq!(def.objects.len(), 1);
        assert_eq!(def.objects[0].title.as_deref(), Some("Kept"));
    }

    #[test]
    fn catch_all_merge_preserves_all_of_required() {
        // The variant's required set comes from its allOf member; merging the
        // shared catch-all must not demote it to optional.
        let schema = json!({
            "oneOf": [
                { "allOf": [ { "required": ["a"], "properties": { "a": {} } } ] }
            ],
            "additionalProperties": { "properties": { "shared": {} } }
        });
        let def = build(&schema).unwrap().unwrap();
        let variant = &def.objects[0];
        assert!(variant.required_props.as_ref().unwrap().contains_key("a"));
        let opt = variant.optional_props.as_ref().unwrap();
        assert!(opt.contains_key("shared"));
        assert!(!opt.contains_key("a"));
    }

    #[test]
    fn shared_catch_all_lands_in_every_variant() {
        let schema = json!({
            "oneOf": [
                { "required": ["a"], "properties": { "a": {} } },
                { "properties": { "b": {} } }
            ],
            "additionalProperties": { "properties": { "shared": {} } }
        });
        let def = build(&schema).unwrap().unwrap();
        for variant in &def.objects {
            let all = variant.all_props.as_ref().unwrap();
            assert!(all.contains_key("shared"));
            // Partition invariant holds after the merge.
            let req = variant.required_props.as_ref().map(|m| m.len()).unwrap_or(0);
            let opt = variant.optional_props.as_ref().map(|m| m.len()).unwrap_or(0);
            assert_eq!(req + opt, all.len());
        }
    }
}

// === Error Handling ===

mod error_handling {
    use super::*;
    use schema_docgen::FormatError;

    struct FailingFormatter;

    impl schema_docgen::Formatter for FailingFormatter {
        fn format(&self, _value: &Value) -> Result<String, FormatError> {
            Err(FormatError::new("renderer offline"))
        }
    }

    #[test]
    fn formatter_failure_embeds_schema_and_message() {
        let schema = json!({ "title": "Broken", "example": { "a": 1 } });
        let resolver = SchemaResolver::with_formatter(FailingFormatter);
        let err = resolver.build(&schema).unwrap_err();

        match err {
            ResolveError::FormatFailed { schema: s, message } => {
                assert!(s.contains("Broken"));
                assert_eq!(message, "renderer offline");
            }
            other => panic!("expected FormatFailed, got {other:?}"),
        }
    }

    #[test]
    fn self_referential_scope_fails_cleanly() {
        let schema = json!({
            "id": "urn:loop",
            "allOf": [ { "id": "urn:loop" } ]
        });
        let result = build(&schema);
        assert!(matches!(result, Err(ResolveError::ScopeCycle { .. })));
    }
}

// === Examples and Metadata ===

mod finalization {
    use super::*;

    #[test]
    fn example_uses_configured_indent() {
        let schema = json!({ "properties": { "a": { "example": 1 } } });
        let resolver = SchemaResolver::with_formatter(JsonFormatter::new(4));
        let def = resolver.build(&schema).unwrap().unwrap();
        assert_eq!(def.example.as_deref(), Some("{\n    \"a\": 1\n}"));
    }

    #[test]
    fn serialized_definition_shape() {
        let schema = json!({
            "title": "Thing",
            "required": ["a"],
            "properties": { "a": { "type": "string", "example": "x" } }
        });
        let def = build(&schema).unwrap().unwrap();
        let out = serde_json::to_value(&def).unwrap();

        assert_eq!(out["title"], json!("Thing"));
        assert_eq!(out["allProps"]["a"]["type"], json!("string"));
        assert_eq!(out["requiredProps"]["a"]["example"], json!("\"x\""));
        assert!(out.get("optionalProps").is_none());
        assert!(out.get("_original").is_none());
    }

    #[test]
    fn builds_are_independent() {
        let schema = json!({ "properties": { "a": { "example": 1 } } });
        let first = build(&schema).unwrap().unwrap();
        let second = build(&schema).unwrap().unwrap();
        assert_eq!(first.example, second.example);
        assert_eq!(
            first.all_props.as_ref().unwrap().keys().collect::<Vec<_>>(),
            second.all_props.as_ref().unwrap().keys().collect::<Vec<_>>()
        );
    }
}
