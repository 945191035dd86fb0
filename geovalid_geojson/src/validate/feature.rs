//! Feature and FeatureCollection validation.
//!
//! A feature validates its geometry (when non-null) through the geometry
//! dispatcher, then reconciles its own bbox against the geometry's computed
//! one. A feature collection validates every feature first, then runs its
//! collection-level checks in order: uniform dimension across all non-null
//! geometries, then the merged bbox. The first collection-level failure
//! stops further collection-level checks.

use super::{
	Context, IssueKind, check_bbox_member, compute_bbox, merge_bboxes,
	geometry::{check_geometry_value, check_reserved_keys, foreign_members, type_member},
};
use crate::geo::{Feature, FeatureCollection, Geometry};
use geovalid_core::json::{JsonObject, JsonValue};

const RESERVED_ON_FEATURE: [&str; 3] = ["coordinates", "features", "geometries"];
const RESERVED_ON_FEATURE_COLLECTION: [&str; 4] = ["coordinates", "geometries", "geometry", "properties"];

pub(crate) fn check_feature_value(ctx: &mut Context, value: &JsonValue) -> Option<Feature> {
	let object = match value.as_object() {
		Ok(object) => object,
		Err(_) => {
			ctx.issue(
				IssueKind::InvalidType,
				format!("a feature must be an object, found a {}", value.type_name()),
			);
			return None;
		}
	};
	check_feature_object(ctx, object)
}

pub(crate) fn check_feature_object(ctx: &mut Context, object: &JsonObject) -> Option<Feature> {
	if !ctx.enter() {
		return None;
	}
	let feature = check_feature_inner(ctx, object);
	ctx.leave();
	feature
}

fn check_feature_inner(ctx: &mut Context, object: &JsonObject) -> Option<Feature> {
	match type_member(ctx, object)? {
		"Feature" => {}
		other => {
			let message = format!("expected type \"Feature\", found \"{other}\"");
			ctx.with_key("type", |ctx| ctx.issue(IssueKind::InvalidType, message));
			return None;
		}
	}
	if !check_reserved_keys(ctx, object, "Feature", &RESERVED_ON_FEATURE) {
		return None;
	}

	// decode every member before giving up, so one bad member does not hide
	// diagnostics in the others
	let mut structural = true;

	let geometry = match object.get("geometry") {
		None => {
			ctx.issue(
				IssueKind::InvalidType,
				"missing geometry member (use null for a feature without geometry)".to_string(),
			);
			structural = false;
			None
		}
		Some(JsonValue::Null) => None,
		Some(value) => match ctx.with_key("geometry", |ctx| check_geometry_value(ctx, value)) {
			Some(geometry) => Some(geometry),
			None => {
				structural = false;
				None
			}
		},
	};

	let properties = match object.get("properties") {
		None => {
			ctx.issue(
				IssueKind::InvalidType,
				"missing properties member (use null for no properties)".to_string(),
			);
			structural = false;
			None
		}
		Some(JsonValue::Null) => None,
		Some(JsonValue::Object(map)) => Some(map.clone()),
		Some(other) => {
			let message = format!("the properties member must be an object or null, found a {}", other.type_name());
			ctx.with_key("properties", |ctx| ctx.issue(IssueKind::InvalidType, message));
			structural = false;
			None
		}
	};

	let id = match object.get("id") {
		None => None,
		Some(value @ (JsonValue::String(_) | JsonValue::Number(_))) => Some(value.clone()),
		Some(other) => {
			let message = format!("the id member must be a string or a number, found a {}", other.type_name());
			ctx.with_key("id", |ctx| ctx.issue(IssueKind::InvalidType, message));
			structural = false;
			None
		}
	};

	if !structural {
		return None;
	}

	let mut feature = Feature::new(geometry);
	feature.properties = properties;
	feature.id = id;
	feature.foreign = foreign_members(object, &["type", "geometry", "properties", "id"]);

	check_feature_bbox(ctx, &mut feature);
	Some(feature)
}

/// A null or empty geometry, or one without well-defined extrema because
/// its dimensions disagree, leaves nothing to compare a feature bbox
/// against, so the bbox rides along unvalidated.
fn check_feature_bbox(ctx: &mut Context, feature: &mut Feature) {
	let Some(raw) = feature.foreign.remove("bbox") else {
		return;
	};
	match feature.geometry.as_ref().and_then(Geometry::computed_bbox) {
		Some(computed) => match check_bbox_member(ctx, &raw, &computed) {
			Some(bbox) => feature.bbox = Some(bbox),
			None => feature.foreign.set("bbox", raw),
		},
		None => feature.foreign.set("bbox", raw),
	}
}

pub(crate) fn check_feature_collection_object(ctx: &mut Context, object: &JsonObject) -> Option<FeatureCollection> {
	if !ctx.enter() {
		return None;
	}
	let collection = check_feature_collection_inner(ctx, object);
	ctx.leave();
	collection
}

fn check_feature_collection_inner(ctx: &mut Context, object: &JsonObject) -> Option<FeatureCollection> {
	if !check_reserved_keys(ctx, object, "FeatureCollection", &RESERVED_ON_FEATURE_COLLECTION) {
		return None;
	}
	let Some(raw) = object.get("features") else {
		ctx.issue(IssueKind::InvalidType, "missing features member".to_string());
		return None;
	};
	let array = match raw.as_array() {
		Ok(array) => array,
		Err(_) => {
			let message = format!("the features member must be an array, found a {}", raw.type_name());
			ctx.with_key("features", |ctx| ctx.issue(IssueKind::InvalidType, message));
			return None;
		}
	};

	let features = ctx.with_key("features", |ctx| {
		let mut decoded = true;
		let mut features = Vec::with_capacity(array.len());
		for (index, item) in array.iter().enumerate() {
			match ctx.with_index(index, |ctx| check_feature_value(ctx, item)) {
				Some(feature) => features.push(feature),
				None => decoded = false,
			}
		}
		decoded.then_some(features)
	})?;

	let mut collection = FeatureCollection::new(features);
	collection.foreign = foreign_members(object, &["type", "features"]);

	// an empty feature list is an immediate success
	if collection.features.is_empty() {
		return Some(collection);
	}

	if !check_collection_dimensions(ctx, &collection.features) {
		return Some(collection);
	}

	check_collection_bbox(ctx, &mut collection);
	Some(collection)
}

/// Uniform dimension across the non-null, non-empty geometries of all
/// features. Each geometry is internally consistent (or already flagged), so
/// its nominal dimension stands for it here.
fn check_collection_dimensions(ctx: &mut Context, features: &[Feature]) -> bool {
	let mut expected: Option<usize> = None;
	for (index, feature) in features.iter().enumerate() {
		let Some(dim) = feature.geometry.as_ref().and_then(Geometry::dimension) else {
			continue;
		};
		match expected {
			None => expected = Some(dim),
			Some(expected) if dim != expected => {
				let message = format!("the geometry of feature {index} has dimension {dim}, expected {expected}");
				ctx.with_key("features", |ctx| ctx.issue(IssueKind::InconsistentDimension, message));
				return false;
			}
			Some(_) => {}
		}
	}
	true
}

fn check_collection_bbox(ctx: &mut Context, collection: &mut FeatureCollection) {
	let Some(raw) = collection.foreign.remove("bbox") else {
		return;
	};
	// a geometry with positions but no computed bbox carries a dimension
	// inconsistency (already flagged); there is no well-defined merge to
	// compare against, so the bbox stays unvalidated
	let mut bboxes = Vec::with_capacity(collection.features.len());
	for feature in &collection.features {
		let Some(geometry) = &feature.geometry else {
			continue;
		};
		let mut positions = Vec::new();
		geometry.kind.collect_positions(&mut positions);
		if positions.is_empty() {
			continue;
		}
		match compute_bbox(positions) {
			Some(bbox) => bboxes.push(bbox),
			None => {
				collection.foreign.set("bbox", raw);
				return;
			}
		}
	}
	match merge_bboxes(bboxes) {
		Some(computed) => match check_bbox_member(ctx, &raw, &computed) {
			Some(bbox) => collection.bbox = Some(bbox),
			None => collection.foreign.set("bbox", raw),
		},
		// all geometries null or empty, nothing to compare against
		None => collection.foreign.set("bbox", raw),
	}
}
