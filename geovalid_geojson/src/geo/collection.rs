use super::{BBox, Feature, Geometry};
use geovalid_core::json::{JsonObject, JsonValue};

/// A GeoJSON FeatureCollection: an ordered list of features and an optional
/// bbox covering all of their geometries.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureCollection {
	pub features: Vec<Feature>,
	pub bbox: Option<BBox>,
	pub foreign: JsonObject,
}

impl FeatureCollection {
	#[must_use]
	pub fn new(features: Vec<Feature>) -> Self {
		Self {
			features,
			bbox: None,
			foreign: JsonObject::new(),
		}
	}

	/// Re-serialize to the generic JSON tree, preserving foreign members.
	#[must_use]
	pub fn to_json(&self) -> JsonValue {
		let mut object = self.foreign.clone();
		object.set("type", "FeatureCollection");
		object.set(
			"features",
			JsonValue::from(self.features.iter().map(Feature::to_json).collect::<Vec<_>>()),
		);
		object.set_optional("bbox", self.bbox.as_ref().map(BBox::to_json));
		JsonValue::Object(object)
	}
}

/// The typed result of a top-level validation: one GeoJSON document.
#[derive(Clone, Debug, PartialEq)]
pub enum GeoJson {
	Geometry(Geometry),
	Feature(Feature),
	FeatureCollection(FeatureCollection),
}

impl GeoJson {
	#[must_use]
	pub fn type_name(&self) -> &'static str {
		match self {
			GeoJson::Geometry(geometry) => geometry.type_name(),
			GeoJson::Feature(_) => "Feature",
			GeoJson::FeatureCollection(_) => "FeatureCollection",
		}
	}

	/// Re-serialize to the generic JSON tree. Validation never normalizes:
	/// for an accepted input this reproduces the document, key order aside.
	#[must_use]
	pub fn to_json(&self) -> JsonValue {
		match self {
			GeoJson::Geometry(geometry) => geometry.to_json(),
			GeoJson::Feature(feature) => feature.to_json(),
			GeoJson::FeatureCollection(collection) => collection.to_json(),
		}
	}
}
