//! JSON array type and conversions to Rust vectors.

use crate::json::*;
use anyhow::{Context, Result};
use std::fmt::Display;

/// A JSON array, backed by a `Vec<JsonValue>`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JsonArray(pub Vec<JsonValue>);

impl JsonArray {
	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &JsonValue> {
		self.0.iter()
	}

	#[must_use]
	pub fn first(&self) -> Option<&JsonValue> {
		self.0.first()
	}

	/// Convert every element to `f64`.
	///
	/// # Errors
	/// Returns an error naming the first non-numeric element.
	pub fn as_f64_vec(&self) -> Result<Vec<f64>> {
		self
			.0
			.iter()
			.enumerate()
			.map(|(index, value)| value.as_f64().with_context(|| format!("at index {index}")))
			.collect()
	}

	/// Serialize to a compact JSON string.
	#[must_use]
	pub fn stringify(&self) -> String {
		let items = self.0.iter().map(stringify).collect::<Vec<_>>();
		format!("[{}]", items.join(","))
	}
}

impl Display for JsonArray {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.stringify())
	}
}

impl<T> From<Vec<T>> for JsonArray
where
	JsonValue: From<T>,
{
	fn from(input: Vec<T>) -> Self {
		JsonArray(input.into_iter().map(JsonValue::from).collect())
	}
}

impl FromIterator<JsonValue> for JsonArray {
	fn from_iter<I: IntoIterator<Item = JsonValue>>(iter: I) -> Self {
		JsonArray(iter.into_iter().collect())
	}
}
