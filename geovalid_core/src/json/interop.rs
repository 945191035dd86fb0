//! Conversions between [`JsonValue`] and `serde_json::Value`.
//!
//! This is the supported seam for callers that decode JSON text with
//! `serde_json` and want to validate the result. Numbers are carried as
//! `f64`: integers wider than the 53-bit mantissa degrade to the nearest
//! representable `f64`, which matches what any double-based JSON decoder
//! would have produced from the same text.

use crate::json::{JsonArray, JsonObject, JsonValue};

impl From<&serde_json::Value> for JsonValue {
	fn from(input: &serde_json::Value) -> Self {
		match input {
			serde_json::Value::Null => JsonValue::Null,
			serde_json::Value::Bool(b) => JsonValue::Boolean(*b),
			serde_json::Value::Number(n) => JsonValue::Number(n.as_f64().unwrap_or(f64::NAN)),
			serde_json::Value::String(text) => JsonValue::String(text.clone()),
			serde_json::Value::Array(items) => JsonValue::Array(items.iter().map(JsonValue::from).collect()),
			serde_json::Value::Object(entries) => JsonValue::Object(JsonObject(
				entries
					.iter()
					.map(|(key, value)| (key.clone(), JsonValue::from(value)))
					.collect(),
			)),
		}
	}
}

impl From<serde_json::Value> for JsonValue {
	fn from(input: serde_json::Value) -> Self {
		JsonValue::from(&input)
	}
}

impl From<&JsonValue> for serde_json::Value {
	fn from(input: &JsonValue) -> Self {
		match input {
			JsonValue::Null => serde_json::Value::Null,
			JsonValue::Boolean(b) => serde_json::Value::Bool(*b),
			// Non-finite numbers have no JSON representation
			JsonValue::Number(n) => serde_json::Number::from_f64(*n).map_or(serde_json::Value::Null, serde_json::Value::Number),
			JsonValue::String(text) => serde_json::Value::String(text.clone()),
			JsonValue::Array(JsonArray(items)) => {
				serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
			}
			JsonValue::Object(JsonObject(entries)) => serde_json::Value::Object(
				entries
					.iter()
					.map(|(key, value)| (key.clone(), serde_json::Value::from(value)))
					.collect(),
			),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use serde_json::json;

	#[test]
	fn from_serde_json() {
		let value = JsonValue::from(json!({
			"type": "Point",
			"coordinates": [102.0, 0.5],
			"extra": null
		}));

		let object = value.as_object().unwrap();
		assert_eq!(object.get_str("type").unwrap(), Some("Point"));
		assert_eq!(
			object.get_array("coordinates").unwrap().unwrap().as_f64_vec().unwrap(),
			vec![102.0, 0.5]
		);
		assert_eq!(object.get("extra"), Some(&JsonValue::Null));
	}

	#[test]
	fn round_trip_preserves_numbers() {
		let input = json!([1, -2.5, 0.1, 1e21]);
		let tree = JsonValue::from(&input);
		let back = serde_json::Value::from(&tree);
		assert_eq!(
			back.as_array()
				.unwrap()
				.iter()
				.map(|v| v.as_f64().unwrap())
				.collect::<Vec<_>>(),
			vec![1.0, -2.5, 0.1, 1e21]
		);
	}

	#[test]
	fn round_trip_nested_object() {
		let input = json!({"a": {"b": [true, "x"]}, "c": 3});
		let back = serde_json::Value::from(&JsonValue::from(&input));
		assert_eq!(back, input);
	}
}
