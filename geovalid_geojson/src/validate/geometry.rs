//! Decode-and-validate for the seven geometry kinds.
//!
//! Each node runs its checks in order (structural, dimension, ring closure,
//! bbox) and stops at the first failing stage for that node, while sibling
//! and child nodes are always fully evaluated. A structural failure yields no
//! typed value; a semantic failure records its issue but still yields the
//! typed value so that enclosing collections can run their own checks.

use super::{
	Context, IssueKind, check_bbox_member, check_collection_dimension, check_uniform_dimension,
	ring::{MIN_RING_LEN, is_closed_ring},
};
use crate::geo::{Geometry, GeometryKind, Position};
use geovalid_core::json::{JsonObject, JsonValue};

const RESERVED_ON_SIMPLE: [&str; 4] = ["features", "geometries", "geometry", "properties"];
const RESERVED_ON_COLLECTION: [&str; 4] = ["coordinates", "features", "geometry", "properties"];

pub(crate) fn check_geometry_value(ctx: &mut Context, value: &JsonValue) -> Option<Geometry> {
	let object = match value.as_object() {
		Ok(object) => object,
		Err(_) => {
			ctx.issue(
				IssueKind::InvalidType,
				format!("a geometry must be an object, found a {}", value.type_name()),
			);
			return None;
		}
	};
	check_geometry_object(ctx, object)
}

pub(crate) fn check_geometry_object(ctx: &mut Context, object: &JsonObject) -> Option<Geometry> {
	if !ctx.enter() {
		return None;
	}
	let geometry = check_geometry_inner(ctx, object);
	ctx.leave();
	geometry
}

fn check_geometry_inner(ctx: &mut Context, object: &JsonObject) -> Option<Geometry> {
	let type_name = type_member(ctx, object)?.to_owned();
	match type_name.as_str() {
		"Point" | "MultiPoint" | "LineString" | "MultiLineString" | "Polygon" | "MultiPolygon" => {
			check_simple(ctx, object, &type_name)
		}
		"GeometryCollection" => check_collection(ctx, object),
		_ => {
			ctx.with_key("type", |ctx| {
				ctx.issue(
					IssueKind::InvalidType,
					format!("\"{type_name}\" is not a geometry type"),
				);
			});
			None
		}
	}
}

/// Read the `type` discriminant of a GeoJSON object.
pub(crate) fn type_member<'a>(ctx: &mut Context, object: &'a JsonObject) -> Option<&'a str> {
	match object.get("type") {
		Some(JsonValue::String(name)) => Some(name),
		Some(other) => {
			ctx.with_key("type", |ctx| {
				ctx.issue(
					IssueKind::InvalidType,
					format!("the type member must be a string, found a {}", other.type_name()),
				);
			});
			None
		}
		None => {
			ctx.issue(IssueKind::InvalidType, "missing type member".to_string());
			None
		}
	}
}

/// Copy every member not consumed by the typed decode, so unknown keys
/// survive re-serialization untouched.
pub(crate) fn foreign_members(object: &JsonObject, consumed: &[&str]) -> JsonObject {
	let mut foreign = JsonObject::new();
	for (key, value) in object.iter() {
		if !consumed.contains(&key.as_str()) {
			foreign.set(key, value.clone());
		}
	}
	foreign
}

pub(crate) fn check_reserved_keys(ctx: &mut Context, object: &JsonObject, type_name: &str, reserved: &[&str]) -> bool {
	let mut clean = true;
	for key in reserved {
		if object.contains_key(key) {
			ctx.with_key(key, |ctx| {
				ctx.issue(
					IssueKind::ReservedKeyConflict,
					format!("the {key} member is not allowed on a {type_name}"),
				);
			});
			clean = false;
		}
	}
	clean
}

fn check_simple(ctx: &mut Context, object: &JsonObject, type_name: &str) -> Option<Geometry> {
	if !check_reserved_keys(ctx, object, type_name, &RESERVED_ON_SIMPLE) {
		return None;
	}
	let Some(raw) = object.get("coordinates") else {
		ctx.issue(IssueKind::InvalidType, "missing coordinates member".to_string());
		return None;
	};
	let kind = ctx.with_key("coordinates", |ctx| decode_kind(ctx, type_name, raw))?;

	let mut geometry = Geometry::new(kind);
	geometry.foreign = foreign_members(object, &["type", "coordinates"]);

	// an empty coordinate tree is a valid no-op, nothing left to check
	if geometry.is_empty() {
		return Some(geometry);
	}

	let mut positions = Vec::new();
	geometry.kind.collect_positions(&mut positions);
	if let Err(mismatch) = check_uniform_dimension(positions.iter().copied()) {
		ctx.with_key("coordinates", |ctx| {
			ctx.issue(
				IssueKind::InconsistentDimension,
				format!(
					"position {} has dimension {}, expected {}",
					mismatch.index, mismatch.found, mismatch.expected
				),
			);
		});
		return Some(geometry);
	}

	if !check_rings(ctx, &geometry.kind) {
		return Some(geometry);
	}

	check_node_bbox(ctx, &mut geometry);
	Some(geometry)
}

fn check_collection(ctx: &mut Context, object: &JsonObject) -> Option<Geometry> {
	if !check_reserved_keys(ctx, object, "GeometryCollection", &RESERVED_ON_COLLECTION) {
		return None;
	}
	let Some(raw) = object.get("geometries") else {
		ctx.issue(IssueKind::InvalidType, "missing geometries member".to_string());
		return None;
	};
	let array = match raw.as_array() {
		Ok(array) => array,
		Err(_) => {
			ctx.with_key("geometries", |ctx| {
				ctx.issue(
					IssueKind::InvalidType,
					format!("the geometries member must be an array, found a {}", raw.type_name()),
				);
			});
			return None;
		}
	};

	// decode every child first so all child diagnostics are collected; a
	// structurally failed child leaves nothing to run collection checks on
	let children = ctx.with_key("geometries", |ctx| {
		let mut decoded = true;
		let mut children = Vec::with_capacity(array.len());
		for (index, child) in array.iter().enumerate() {
			match ctx.with_index(index, |ctx| check_geometry_value(ctx, child)) {
				Some(child) => children.push(child),
				None => decoded = false,
			}
		}
		decoded.then_some(children)
	})?;

	let mut geometry = Geometry::new(GeometryKind::GeometryCollection(children));
	geometry.foreign = foreign_members(object, &["type", "geometries"]);

	if geometry.is_empty() {
		return Some(geometry);
	}

	if let GeometryKind::GeometryCollection(children) = &geometry.kind
		&& let Err(mismatch) = check_collection_dimension(children)
	{
		ctx.with_key("geometries", |ctx| {
			ctx.issue(
				IssueKind::InconsistentDimension,
				format!(
					"geometry {} of the recursively expanded collection has dimension {}, expected {}",
					mismatch.index, mismatch.found, mismatch.expected
				),
			);
		});
		return Some(geometry);
	}

	check_node_bbox(ctx, &mut geometry);
	Some(geometry)
}

/// Compare an attached bbox against the computed extrema. An unvalidated
/// bbox (no positions or no well-defined extrema to compare against, or
/// structurally undecodable) stays in the foreign members so it round-trips
/// verbatim.
fn check_node_bbox(ctx: &mut Context, geometry: &mut Geometry) {
	let Some(raw) = geometry.foreign.remove("bbox") else {
		return;
	};
	match geometry.computed_bbox() {
		Some(computed) => match check_bbox_member(ctx, &raw, &computed) {
			Some(bbox) => geometry.bbox = Some(bbox),
			None => geometry.foreign.set("bbox", raw),
		},
		None => geometry.foreign.set("bbox", raw),
	}
}

fn decode_kind(ctx: &mut Context, type_name: &str, raw: &JsonValue) -> Option<GeometryKind> {
	use GeometryKind::*;
	Some(match type_name {
		"Point" => Point(decode_position(ctx, raw)?),
		"MultiPoint" => MultiPoint(decode_position_list(ctx, raw)?),
		"LineString" => LineString(decode_position_list(ctx, raw)?),
		"MultiLineString" => MultiLineString(decode_position_grid(ctx, raw)?),
		"Polygon" => Polygon(decode_position_grid(ctx, raw)?),
		"MultiPolygon" => MultiPolygon(decode_position_grids(ctx, raw)?),
		_ => return None,
	})
}

fn decode_position(ctx: &mut Context, value: &JsonValue) -> Option<Position> {
	let array = match value.as_array() {
		Ok(array) => array,
		Err(_) => {
			ctx.issue(
				IssueKind::InvalidType,
				format!("a position must be an array of numbers, found a {}", value.type_name()),
			);
			return None;
		}
	};
	let numbers = match array.as_f64_vec() {
		Ok(numbers) => numbers,
		Err(error) => {
			ctx.issue(
				IssueKind::InvalidType,
				format!("a position must contain only numbers: {error:#}"),
			);
			return None;
		}
	};
	match Position::new(numbers) {
		Ok(position) => Some(position),
		Err(_) => {
			ctx.issue(
				IssueKind::InvalidPositionArity,
				format!("a position needs at least two axes, found {}", array.len()),
			);
			None
		}
	}
}

fn decode_position_list(ctx: &mut Context, value: &JsonValue) -> Option<Vec<Position>> {
	let array = match value.as_array() {
		Ok(array) => array,
		Err(_) => {
			ctx.issue(
				IssueKind::InvalidType,
				format!("expected an array of positions, found a {}", value.type_name()),
			);
			return None;
		}
	};
	let mut decoded = true;
	let mut list = Vec::with_capacity(array.len());
	for (index, item) in array.iter().enumerate() {
		match ctx.with_index(index, |ctx| decode_position(ctx, item)) {
			Some(position) => list.push(position),
			None => decoded = false,
		}
	}
	decoded.then_some(list)
}

fn decode_position_grid(ctx: &mut Context, value: &JsonValue) -> Option<Vec<Vec<Position>>> {
	let array = match value.as_array() {
		Ok(array) => array,
		Err(_) => {
			ctx.issue(
				IssueKind::InvalidType,
				format!("expected an array of position arrays, found a {}", value.type_name()),
			);
			return None;
		}
	};
	let mut decoded = true;
	let mut grid = Vec::with_capacity(array.len());
	for (index, item) in array.iter().enumerate() {
		match ctx.with_index(index, |ctx| decode_position_list(ctx, item)) {
			Some(list) => grid.push(list),
			None => decoded = false,
		}
	}
	decoded.then_some(grid)
}

fn decode_position_grids(ctx: &mut Context, value: &JsonValue) -> Option<Vec<Vec<Vec<Position>>>> {
	let array = match value.as_array() {
		Ok(array) => array,
		Err(_) => {
			ctx.issue(
				IssueKind::InvalidType,
				format!("expected an array of polygons, found a {}", value.type_name()),
			);
			return None;
		}
	};
	let mut decoded = true;
	let mut grids = Vec::with_capacity(array.len());
	for (index, item) in array.iter().enumerate() {
		match ctx.with_index(index, |ctx| decode_position_grid(ctx, item)) {
			Some(grid) => grids.push(grid),
			None => decoded = false,
		}
	}
	decoded.then_some(grids)
}

fn check_rings(ctx: &mut Context, kind: &GeometryKind) -> bool {
	match kind {
		GeometryKind::Polygon(rings) => ctx.with_key("coordinates", |ctx| check_ring_list(ctx, rings)),
		GeometryKind::MultiPolygon(polygons) => ctx.with_key("coordinates", |ctx| {
			let mut valid = true;
			for (index, rings) in polygons.iter().enumerate() {
				valid &= ctx.with_index(index, |ctx| check_ring_list(ctx, rings));
			}
			valid
		}),
		_ => true,
	}
}

/// Minimum length is structural and checked for every ring first; closure is
/// only judged once all lengths pass.
fn check_ring_list(ctx: &mut Context, rings: &[Vec<Position>]) -> bool {
	let mut lengths_valid = true;
	for (index, ring) in rings.iter().enumerate() {
		if ring.len() < MIN_RING_LEN {
			ctx.with_index(index, |ctx| {
				ctx.issue(
					IssueKind::OpenLinearRing,
					format!("a linear ring needs at least {MIN_RING_LEN} positions, found {}", ring.len()),
				);
			});
			lengths_valid = false;
		}
	}
	if !lengths_valid {
		return false;
	}

	let mut closed = true;
	for (index, ring) in rings.iter().enumerate() {
		if !is_closed_ring(ring) {
			ctx.with_index(index, |ctx| {
				ctx.issue(
					IssueKind::OpenLinearRing,
					"the first and last positions of a linear ring must be equal".to_string(),
				);
			});
			closed = false;
		}
	}
	closed
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::validate::Issue;

	fn run(value: &JsonValue) -> (Option<Geometry>, Vec<Issue>) {
		let mut ctx = Context::new(32);
		let geometry = check_geometry_value(&mut ctx, value);
		(geometry, ctx.issues)
	}

	fn object(members: Vec<(&str, JsonValue)>) -> JsonValue {
		JsonValue::Object(JsonObject::from(members))
	}

	fn point(x: f64, y: f64) -> JsonValue {
		object(vec![
			("type", JsonValue::from("Point")),
			("coordinates", JsonValue::from(vec![x, y])),
		])
	}

	#[test]
	fn valid_point() {
		let (geometry, issues) = run(&point(1.0, 2.0));
		assert!(issues.is_empty());
		assert_eq!(geometry.unwrap().type_name(), "Point");
	}

	#[test]
	fn unknown_type_tag() {
		let (geometry, issues) = run(&object(vec![("type", JsonValue::from("Circle"))]));
		assert!(geometry.is_none());
		assert_eq!(issues[0].kind, IssueKind::InvalidType);
		assert_eq!(issues[0].path.to_string(), "$.type");
	}

	#[test]
	fn missing_type_tag() {
		let (geometry, issues) = run(&object(vec![("coordinates", JsonValue::from(vec![1.0, 2.0]))]));
		assert!(geometry.is_none());
		assert_eq!(issues[0].kind, IssueKind::InvalidType);
	}

	#[test]
	fn not_an_object() {
		let (geometry, issues) = run(&JsonValue::from(vec![1.0, 2.0]));
		assert!(geometry.is_none());
		assert_eq!(issues[0].kind, IssueKind::InvalidType);
	}

	#[test]
	fn short_position() {
		let value = object(vec![
			("type", JsonValue::from("Point")),
			("coordinates", JsonValue::from(vec![1.0])),
		]);
		let (geometry, issues) = run(&value);
		assert!(geometry.is_none());
		assert_eq!(issues[0].kind, IssueKind::InvalidPositionArity);
		assert_eq!(issues[0].path.to_string(), "$.coordinates");
	}

	#[test]
	fn multipoint_dimension_mismatch() {
		let value = object(vec![
			("type", JsonValue::from("MultiPoint")),
			(
				"coordinates",
				JsonValue::from(vec![JsonValue::from(vec![0.0, 0.0]), JsonValue::from(vec![1.0, 1.0, 2.0])]),
			),
		]);
		let (geometry, issues) = run(&value);
		// semantic failure still yields the typed value
		assert!(geometry.is_some());
		assert_eq!(issues.len(), 1);
		assert_eq!(issues[0].kind, IssueKind::InconsistentDimension);
		assert_eq!(issues[0].path.to_string(), "$.coordinates");
	}

	#[test]
	fn open_polygon_ring() {
		let ring = vec![
			JsonValue::from(vec![0.0, 0.0]),
			JsonValue::from(vec![1.0, 0.0]),
			JsonValue::from(vec![1.0, 1.0]),
			JsonValue::from(vec![0.0, 1.0]),
		];
		let value = object(vec![
			("type", JsonValue::from("Polygon")),
			("coordinates", JsonValue::from(vec![JsonValue::from(ring)])),
		]);
		let (geometry, issues) = run(&value);
		assert!(geometry.is_some());
		assert_eq!(issues[0].kind, IssueKind::OpenLinearRing);
		assert_eq!(issues[0].path.to_string(), "$.coordinates[0]");
	}

	#[test]
	fn short_ring_reported_before_closure() {
		let ring = vec![
			JsonValue::from(vec![0.0, 0.0]),
			JsonValue::from(vec![1.0, 0.0]),
			JsonValue::from(vec![0.0, 0.0]),
		];
		let value = object(vec![
			("type", JsonValue::from("Polygon")),
			("coordinates", JsonValue::from(vec![JsonValue::from(ring)])),
		]);
		let (_, issues) = run(&value);
		assert_eq!(issues.len(), 1);
		assert_eq!(issues[0].kind, IssueKind::OpenLinearRing);
		assert!(issues[0].message.contains("at least 4"));
	}

	#[test]
	fn bbox_must_match_exactly() {
		let mut members = vec![
			("type", JsonValue::from("Point")),
			("coordinates", JsonValue::from(vec![1.0, 2.0])),
			("bbox", JsonValue::from(vec![1.0, 2.0, 1.0, 2.0])),
		];
		let (geometry, issues) = run(&object(members.clone()));
		assert!(issues.is_empty());
		assert!(geometry.unwrap().bbox.is_some());

		members[2] = ("bbox", JsonValue::from(vec![1.0, 2.0, 1.0, 3.0]));
		let (geometry, issues) = run(&object(members));
		assert!(geometry.is_some());
		assert_eq!(issues[0].kind, IssueKind::InvalidBbox);
		assert_eq!(issues[0].path.to_string(), "$.bbox");
	}

	#[test]
	fn empty_geometry_skips_every_check() {
		let value = object(vec![
			("type", JsonValue::from("LineString")),
			("coordinates", JsonValue::from(Vec::<f64>::new())),
			("bbox", JsonValue::from("nonsense")),
		]);
		let (geometry, issues) = run(&value);
		assert!(issues.is_empty());
		let geometry = geometry.unwrap();
		assert!(geometry.is_empty());
		// the unvalidated bbox rides along verbatim
		assert_eq!(geometry.foreign.get("bbox"), Some(&JsonValue::from("nonsense")));
	}

	#[test]
	fn collection_dimension_across_children() {
		let value = object(vec![
			("type", JsonValue::from("GeometryCollection")),
			("geometries", JsonValue::from(vec![point(0.0, 0.0), point(1.0, 2.0)])),
		]);
		let (geometry, issues) = run(&value);
		assert!(issues.is_empty());
		assert!(geometry.is_some());

		let mixed = object(vec![
			("type", JsonValue::from("GeometryCollection")),
			(
				"geometries",
				JsonValue::from(vec![
					point(0.0, 0.0),
					object(vec![
						("type", JsonValue::from("Point")),
						("coordinates", JsonValue::from(vec![1.0, 2.0, 3.0])),
					]),
				]),
			),
		]);
		let (geometry, issues) = run(&mixed);
		assert!(geometry.is_some());
		assert_eq!(issues[0].kind, IssueKind::InconsistentDimension);
		assert_eq!(issues[0].path.to_string(), "$.geometries");
	}

	#[test]
	fn collection_child_issues_carry_their_path() {
		let value = object(vec![
			("type", JsonValue::from("GeometryCollection")),
			(
				"geometries",
				JsonValue::from(vec![
					point(0.0, 0.0),
					object(vec![
						("type", JsonValue::from("Point")),
						("coordinates", JsonValue::from(vec![1.0])),
					]),
				]),
			),
		]);
		let (geometry, issues) = run(&value);
		// a structurally failed child leaves no typed collection
		assert!(geometry.is_none());
		assert_eq!(issues[0].kind, IssueKind::InvalidPositionArity);
		assert_eq!(issues[0].path.to_string(), "$.geometries[1].coordinates");
	}

	#[test]
	fn collection_bbox_merges_children() {
		let value = object(vec![
			("type", JsonValue::from("GeometryCollection")),
			("geometries", JsonValue::from(vec![point(0.0, 0.0), point(10.0, 10.0)])),
			("bbox", JsonValue::from(vec![0.0, 0.0, 10.0, 10.0])),
		]);
		let (_, issues) = run(&value);
		assert!(issues.is_empty());
	}

	#[test]
	fn reserved_key_on_geometry() {
		let value = object(vec![
			("type", JsonValue::from("Point")),
			("coordinates", JsonValue::from(vec![1.0, 2.0])),
			("properties", JsonValue::Null),
		]);
		let (geometry, issues) = run(&value);
		assert!(geometry.is_none());
		assert_eq!(issues[0].kind, IssueKind::ReservedKeyConflict);
		assert_eq!(issues[0].path.to_string(), "$.properties");
	}

	#[test]
	fn foreign_members_survive() {
		let value = object(vec![
			("type", JsonValue::from("Point")),
			("coordinates", JsonValue::from(vec![1.0, 2.0])),
			("name", JsonValue::from("origin")),
		]);
		let (geometry, issues) = run(&value);
		assert!(issues.is_empty());
		assert_eq!(
			geometry.unwrap().to_json().to_string(),
			r#"{"coordinates":[1,2],"name":"origin","type":"Point"}"#
		);
	}

	#[test]
	fn depth_bound_trips() {
		let mut value = point(0.0, 0.0);
		for _ in 0..8 {
			value = object(vec![
				("type", JsonValue::from("GeometryCollection")),
				("geometries", JsonValue::from(vec![value])),
			]);
		}
		let mut ctx = Context::new(4);
		let geometry = check_geometry_value(&mut ctx, &value);
		assert!(geometry.is_none());
		assert_eq!(ctx.issues[0].kind, IssueKind::TooDeep);
	}
}
