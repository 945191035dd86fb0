//! Compact JSON serialization, used by `Display` impls and diagnostics.

use crate::json::JsonValue;

/// Serialize a `JsonValue` to a compact JSON string without extra whitespace.
///
/// Numbers are written with `f64`'s shortest round-trip formatting, so
/// `1.0` serializes as `1` and `1.5` as `1.5`. Non-finite numbers cannot
/// occur in a decoded JSON tree and serialize as `null`.
#[must_use]
pub fn stringify(value: &JsonValue) -> String {
	match value {
		JsonValue::Array(array) => array.stringify(),
		JsonValue::Boolean(b) => b.to_string(),
		JsonValue::Null => "null".to_string(),
		JsonValue::Number(n) => {
			if n.is_finite() {
				n.to_string()
			} else {
				"null".to_string()
			}
		}
		JsonValue::Object(object) => object.stringify(),
		JsonValue::String(text) => format!("\"{}\"", escape_json_string(text)),
	}
}

/// Escape a string for embedding in JSON output.
#[must_use]
pub fn escape_json_string(text: &str) -> String {
	let mut result = String::with_capacity(text.len());
	for c in text.chars() {
		match c {
			'"' => result.push_str("\\\""),
			'\\' => result.push_str("\\\\"),
			'\n' => result.push_str("\\n"),
			'\r' => result.push_str("\\r"),
			'\t' => result.push_str("\\t"),
			c if (c as u32) < 0x20 => result.push_str(&format!("\\u{:04x}", c as u32)),
			c => result.push(c),
		}
	}
	result
}
