//! Value-to-string rendering for example payloads.
//!
//! The formatter is pluggable: the resolver and the cURL builder accept any
//! [`Formatter`] implementation. The default renders JSON-style pretty output
//! with a configurable indent width and is deterministic for identical input.

use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};

use crate::error::FormatError;

/// Renders an example value to a display string.
pub trait Formatter {
    /// Format a value for display.
    ///
    /// # Errors
    ///
    /// Returns `FormatError` when the value cannot be rendered.
    fn format(&self, value: &Value) -> Result<String, FormatError>;
}

/// Default JSON-style formatter.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    indent: usize,
}

impl JsonFormatter {
    /// JSON formatter with the given indent width.
    pub fn new(indent: usize) -> Self {
        Self { indent }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, value: &Value) -> Result<String, FormatError> {
        let indent = vec![b' '; self.indent];
        let mut out = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(&indent));
        serde::Serialize::serialize(value, &mut serializer)?;
        String::from_utf8(out).map_err(|e| FormatError::new(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn formats_scalars_bare() {
        let fmt = JsonFormatter::default();
        assert_eq!(fmt.format(&json!("x")).unwrap(), "\"x\"");
        assert_eq!(fmt.format(&json!(42)).unwrap(), "42");
    }

    #[test]
    fn formats_objects_with_default_indent() {
        let fmt = JsonFormatter::default();
        let out = fmt.format(&json!({ "a": 1 })).unwrap();
        assert_eq!(out, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn indent_is_configurable() {
        let fmt = JsonFormatter::new(4);
        let out = fmt.format(&json!({ "a": 1 })).unwrap();
        assert_eq!(out, "{\n    \"a\": 1\n}");
    }

    #[test]
    fn deterministic_for_identical_input() {
        let fmt = JsonFormatter::default();
        let value = json!({ "b": [1, 2], "a": { "c": true } });
        assert_eq!(fmt.format(&value).unwrap(), fmt.format(&value).unwrap());
    }
}
