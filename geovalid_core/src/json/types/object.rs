//! JSON object type with checked key accessors.

use crate::json::*;
use anyhow::Result;
use std::{
	collections::BTreeMap,
	fmt::{Debug, Display},
};

/// A JSON object backed by a `BTreeMap<String, JsonValue>`.
///
/// Key order is therefore lexicographic, which keeps serialized output and
/// diagnostics deterministic.
#[derive(Clone, Default, PartialEq)]
pub struct JsonObject(pub BTreeMap<String, JsonValue>);

impl JsonObject {
	#[must_use]
	pub fn new() -> Self {
		Self(BTreeMap::new())
	}

	#[must_use]
	pub fn get(&self, key: &str) -> Option<&JsonValue> {
		self.0.get(key)
	}

	#[must_use]
	pub fn contains_key(&self, key: &str) -> bool {
		self.0.contains_key(key)
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Retrieve an array for the specified key, or `None` if the key is missing.
	///
	/// # Errors
	/// Returns an error if the key is present but not an array.
	pub fn get_array(&self, key: &str) -> Result<Option<&JsonArray>> {
		self.get(key).map(JsonValue::as_array).transpose()
	}

	/// Retrieve a string slice for the specified key, or `None` if the key is missing.
	///
	/// # Errors
	/// Returns an error if the key is present but not a string.
	pub fn get_str(&self, key: &str) -> Result<Option<&str>> {
		self.get(key).map(JsonValue::as_str).transpose()
	}

	/// Set the specified key to the given value, converting it into a `JsonValue`.
	pub fn set<T>(&mut self, key: &str, value: T)
	where
		JsonValue: From<T>,
	{
		self.0.insert(key.to_owned(), JsonValue::from(value));
	}

	/// Set the specified key only if the provided `Option` is `Some`.
	pub fn set_optional<T>(&mut self, key: &str, value: Option<T>)
	where
		JsonValue: From<T>,
	{
		if let Some(v) = value {
			self.0.insert(key.to_owned(), JsonValue::from(v));
		}
	}

	/// Remove the specified key, returning its value if it was present.
	pub fn remove(&mut self, key: &str) -> Option<JsonValue> {
		self.0.remove(key)
	}

	/// Return an iterator over key-value pairs in lexicographic key order.
	pub fn iter(&self) -> impl Iterator<Item = (&String, &JsonValue)> {
		self.0.iter()
	}

	/// Serialize to a compact JSON string.
	#[must_use]
	pub fn stringify(&self) -> String {
		let items = self
			.0
			.iter()
			.map(|(key, value)| format!("\"{}\":{}", escape_json_string(key), stringify(value)))
			.collect::<Vec<_>>();
		format!("{{{}}}", items.join(","))
	}
}

impl Debug for JsonObject {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.0)
	}
}

impl Display for JsonObject {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.stringify())
	}
}

impl<T> From<Vec<(&str, T)>> for JsonObject
where
	JsonValue: From<T>,
{
	fn from(input: Vec<(&str, T)>) -> Self {
		JsonObject(
			input
				.into_iter()
				.map(|(key, value)| (key.to_string(), JsonValue::from(value)))
				.collect(),
		)
	}
}
