//! cURL command rendering for resolved example payloads.
//!
//! Pure string formatting: no schema logic. The payload is expected to be an
//! already-extracted example value; non-GET payloads are stringified with the
//! same [`Formatter`](crate::Formatter) used for schema examples.

use serde_json::{Map, Value};

use crate::error::FormatError;
use crate::format::{Formatter, JsonFormatter};

/// Continuation-line indent (aligns flags under the command).
const FLAG_INDENT: &str = "     ";

/// Options for cURL rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurlOptions {
    /// Start the serialized query string with `&` instead of `?`, for
    /// appending to a URI that already carries a query.
    pub append_query: bool,
}

/// Render a cURL command with the default JSON formatter.
///
/// `method` defaults to `GET`. GET data is serialized onto the URI as a query
/// string; for any other method it becomes a `-data` flag line.
///
/// # Errors
///
/// Returns `FormatError` when the payload cannot be stringified.
pub fn generate(
    uri: &str,
    method: Option<&str>,
    headers: Option<&Map<String, Value>>,
    data: Option<&Value>,
) -> Result<String, FormatError> {
    generate_with(
        uri,
        method,
        headers,
        data,
        &JsonFormatter::default(),
        CurlOptions::default(),
    )
}

/// Render a cURL command with a custom formatter and options.
pub fn generate_with<F: Formatter>(
    uri: &str,
    method: Option<&str>,
    headers: Option<&Map<String, Value>>,
    data: Option<&Value>,
    formatter: &F,
    options: CurlOptions,
) -> Result<String, FormatError> {
    let method = method.unwrap_or("GET").to_uppercase();

    let mut uri = uri.to_string();
    if method == "GET" {
        if let Some(data) = data {
            uri.push_str(&query_string(data, options.append_query));
        }
    }

    let mut lines = vec![format!("curl -X \"{}\" \"{}\"", method, uri)];

    if let Some(headers) = headers {
        for (name, value) in headers {
            lines.push(format!(
                "{}-H \"{}: {}\"",
                FLAG_INDENT,
                name,
                scalar_text(value)
            ));
        }
    }

    if method != "GET" {
        if let Some(data) = data {
            lines.push(format!("{}-data '{}'", FLAG_INDENT, formatter.format(data)?));
        }
    }

    Ok(lines.join(" \\\n"))
}

/// Serialize a payload as a query string, `?k1=v1&k2=v2` in key order.
fn query_string(data: &Value, append: bool) -> String {
    let Some(map) = data.as_object() else {
        return String::new();
    };

    let mut out = String::new();
    for (i, (key, value)) in map.iter().enumerate() {
        let separator = if i == 0 && !append { '?' } else { '&' };
        out.push(separator);
        out.push_str(key);
        out.push('=');
        out.push_str(&scalar_text(value));
    }
    out
}

/// Bare text for scalar values; structured values fall back to compact JSON.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
