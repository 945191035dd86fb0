use super::{BBox, Geometry};
use geovalid_core::json::{JsonObject, JsonValue};

/// A GeoJSON Feature: a geometry (possibly `null`), an opaque properties
/// map (possibly `null`), an optional id, and an optional bbox.
///
/// `geometry: None` and `properties: None` mean the member was explicitly
/// `null` in the input; an absent member is a structural error and never
/// produces a typed value.
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
	pub geometry: Option<Geometry>,
	pub properties: Option<JsonObject>,
	pub id: Option<JsonValue>,
	pub bbox: Option<BBox>,
	pub foreign: JsonObject,
}

impl Feature {
	#[must_use]
	pub fn new(geometry: Option<Geometry>) -> Self {
		Self {
			geometry,
			properties: None,
			id: None,
			bbox: None,
			foreign: JsonObject::new(),
		}
	}

	/// Re-serialize to the generic JSON tree, preserving foreign members.
	#[must_use]
	pub fn to_json(&self) -> JsonValue {
		let mut object = self.foreign.clone();
		object.set("type", "Feature");
		object.set(
			"geometry",
			self.geometry.as_ref().map_or(JsonValue::Null, Geometry::to_json),
		);
		object.set(
			"properties",
			self
				.properties
				.as_ref()
				.map_or(JsonValue::Null, |p| JsonValue::Object(p.clone())),
		);
		object.set_optional("id", self.id.clone());
		object.set_optional("bbox", self.bbox.as_ref().map(BBox::to_json));
		JsonValue::Object(object)
	}
}
