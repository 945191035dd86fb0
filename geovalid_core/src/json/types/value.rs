//! JSON value enum representing any decoded JSON data.

use crate::json::*;
use anyhow::{Result, bail};
use std::fmt::Display;

/// Any decoded JSON value: arrays, objects, numbers, strings, booleans, and null.
///
/// Numbers are stored as `f64`, matching what a JSON decoder produces. The
/// value is never normalized after construction, so the numbers a validator
/// accepts are exactly the numbers that were handed in.
#[derive(Clone, Debug, PartialEq)]
pub enum JsonValue {
	Array(JsonArray),
	Boolean(bool),
	Null,
	Number(f64),
	Object(JsonObject),
	String(String),
}

impl JsonValue {
	/// Return the JSON type as a lowercase string (`"array"`, `"object"`, etc.).
	#[must_use]
	pub fn type_name(&self) -> &'static str {
		use JsonValue::*;
		match self {
			Array(_) => "array",
			Boolean(_) => "boolean",
			Null => "null",
			Number(_) => "number",
			Object(_) => "object",
			String(_) => "string",
		}
	}

	#[must_use]
	pub fn is_null(&self) -> bool {
		matches!(self, JsonValue::Null)
	}

	/// Borrow the `JsonArray` if this value is an array.
	///
	/// # Errors
	/// Returns an error if the value is not an array.
	pub fn as_array(&self) -> Result<&JsonArray> {
		if let JsonValue::Array(array) = self {
			Ok(array)
		} else {
			bail!("expected an array, found a {}", self.type_name())
		}
	}

	/// Borrow the `JsonObject` if this value is an object.
	///
	/// # Errors
	/// Returns an error if the value is not an object.
	pub fn as_object(&self) -> Result<&JsonObject> {
		if let JsonValue::Object(object) = self {
			Ok(object)
		} else {
			bail!("expected an object, found a {}", self.type_name())
		}
	}

	/// Return a string slice if this value is a JSON string.
	///
	/// # Errors
	/// Returns an error if the value is not a string.
	pub fn as_str(&self) -> Result<&str> {
		if let JsonValue::String(text) = self {
			Ok(text)
		} else {
			bail!("expected a string, found a {}", self.type_name())
		}
	}

	/// Return the numeric value if this value is a JSON number.
	///
	/// # Errors
	/// Returns an error if the value is not a number.
	pub fn as_f64(&self) -> Result<f64> {
		if let JsonValue::Number(value) = self {
			Ok(*value)
		} else {
			bail!("expected a number, found a {}", self.type_name())
		}
	}

	/// Serialize to a compact JSON string without unnecessary whitespace.
	#[must_use]
	pub fn stringify(&self) -> String {
		stringify(self)
	}
}

impl Display for JsonValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.stringify())
	}
}

impl From<&str> for JsonValue {
	fn from(input: &str) -> Self {
		JsonValue::String(input.to_string())
	}
}

impl From<String> for JsonValue {
	fn from(input: String) -> Self {
		JsonValue::String(input)
	}
}

impl From<bool> for JsonValue {
	fn from(input: bool) -> Self {
		JsonValue::Boolean(input)
	}
}

impl From<f64> for JsonValue {
	fn from(input: f64) -> Self {
		JsonValue::Number(input)
	}
}

impl From<i32> for JsonValue {
	fn from(input: i32) -> Self {
		JsonValue::Number(f64::from(input))
	}
}

impl From<JsonArray> for JsonValue {
	fn from(input: JsonArray) -> Self {
		JsonValue::Array(input)
	}
}

impl From<JsonObject> for JsonValue {
	fn from(input: JsonObject) -> Self {
		JsonValue::Object(input)
	}
}

impl<T> From<Vec<T>> for JsonValue
where
	JsonValue: From<T>,
{
	fn from(input: Vec<T>) -> Self {
		JsonValue::Array(JsonArray::from(input))
	}
}
