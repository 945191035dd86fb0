use super::{BBox, Position};
use geovalid_core::json::{JsonObject, JsonValue};
use std::fmt::Debug;

/// One of the seven GeoJSON geometry kinds with its coordinate tree.
///
/// The nesting depth of the coordinate tree grows with the kind: a Point
/// owns a single position, a MultiPolygon a list of lists of rings.
/// GeometryCollection owns child geometries by value; the input is a tree,
/// so no cycles are possible.
#[derive(Clone, Debug, PartialEq)]
pub enum GeometryKind {
	Point(Position),
	MultiPoint(Vec<Position>),
	LineString(Vec<Position>),
	MultiLineString(Vec<Vec<Position>>),
	Polygon(Vec<Vec<Position>>),
	MultiPolygon(Vec<Vec<Vec<Position>>>),
	GeometryCollection(Vec<Geometry>),
}

/// A validated-or-to-be-validated geometry: its kind, an optional bbox, and
/// any foreign members carried along untouched for round-tripping.
#[derive(Clone, Debug, PartialEq)]
pub struct Geometry {
	pub kind: GeometryKind,
	pub bbox: Option<BBox>,
	pub foreign: JsonObject,
}

impl GeometryKind {
	#[must_use]
	pub fn type_name(&self) -> &'static str {
		use GeometryKind::*;
		match self {
			Point(_) => "Point",
			MultiPoint(_) => "MultiPoint",
			LineString(_) => "LineString",
			MultiLineString(_) => "MultiLineString",
			Polygon(_) => "Polygon",
			MultiPolygon(_) => "MultiPolygon",
			GeometryCollection(_) => "GeometryCollection",
		}
	}

	/// Whether the coordinate tree (or child list) is empty at the top level.
	/// Empty geometries are valid no-ops: dimension, ring, and bbox checks
	/// are skipped for them.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		use GeometryKind::*;
		match self {
			Point(_) => false,
			MultiPoint(list) | LineString(list) => list.is_empty(),
			MultiLineString(grid) | Polygon(grid) => grid.is_empty(),
			MultiPolygon(grids) => grids.is_empty(),
			GeometryCollection(children) => children.is_empty(),
		}
	}

	/// Collect references to every position reachable from this kind,
	/// recursing into geometry collections.
	pub fn collect_positions<'a>(&'a self, out: &mut Vec<&'a Position>) {
		use GeometryKind::*;
		match self {
			Point(position) => out.push(position),
			MultiPoint(list) | LineString(list) => out.extend(list.iter()),
			MultiLineString(grid) | Polygon(grid) => {
				for list in grid {
					out.extend(list.iter());
				}
			}
			MultiPolygon(grids) => {
				for grid in grids {
					for list in grid {
						out.extend(list.iter());
					}
				}
			}
			GeometryCollection(children) => {
				for child in children {
					child.kind.collect_positions(out);
				}
			}
		}
	}

	fn coordinates_json(&self) -> JsonValue {
		use GeometryKind::*;

		fn list(positions: &[Position]) -> JsonValue {
			JsonValue::from(positions.iter().map(Position::to_json).collect::<Vec<_>>())
		}
		fn grid(lists: &[Vec<Position>]) -> JsonValue {
			JsonValue::from(lists.iter().map(|l| list(l)).collect::<Vec<_>>())
		}

		match self {
			Point(position) => position.to_json(),
			MultiPoint(positions) | LineString(positions) => list(positions),
			MultiLineString(lists) | Polygon(lists) => grid(lists),
			MultiPolygon(grids) => JsonValue::from(grids.iter().map(|g| grid(g)).collect::<Vec<_>>()),
			GeometryCollection(_) => JsonValue::Null,
		}
	}
}

impl Geometry {
	#[must_use]
	pub fn new(kind: GeometryKind) -> Self {
		Self {
			kind,
			bbox: None,
			foreign: JsonObject::new(),
		}
	}

	#[must_use]
	pub fn type_name(&self) -> &'static str {
		self.kind.type_name()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.kind.is_empty()
	}

	/// The dimension of this geometry, defined by its first position: the
	/// position itself for Point, the first position of the first (and
	/// deeper) nesting level otherwise, and the first child's dimension for
	/// GeometryCollection. `None` for empty geometries.
	#[must_use]
	pub fn dimension(&self) -> Option<usize> {
		use GeometryKind::*;
		match &self.kind {
			Point(position) => Some(position.dim()),
			MultiPoint(list) | LineString(list) => list.first().map(Position::dim),
			MultiLineString(grid) | Polygon(grid) => grid.first().and_then(|l| l.first()).map(Position::dim),
			MultiPolygon(grids) => grids
				.first()
				.and_then(|g| g.first())
				.and_then(|l| l.first())
				.map(Position::dim),
			GeometryCollection(children) => children.first().and_then(Geometry::dimension),
		}
	}

	/// The exact minimal bounding box of this geometry, folded over every
	/// reachable position (for collections this equals the axis-wise merge of
	/// the children's bboxes). `None` if the geometry is empty or its
	/// positions disagree in dimension, since no well-defined extrema exist
	/// then.
	#[must_use]
	pub fn computed_bbox(&self) -> Option<BBox> {
		let mut positions = Vec::new();
		self.kind.collect_positions(&mut positions);
		crate::validate::compute_bbox(positions)
	}

	/// Re-serialize to the generic JSON tree, preserving every numeric field
	/// and any foreign members of the input.
	#[must_use]
	pub fn to_json(&self) -> JsonValue {
		let mut object = self.foreign.clone();
		object.set("type", self.type_name());
		if let GeometryKind::GeometryCollection(children) = &self.kind {
			object.set(
				"geometries",
				JsonValue::from(children.iter().map(Geometry::to_json).collect::<Vec<_>>()),
			);
		} else {
			object.set("coordinates", self.kind.coordinates_json());
		}
		object.set_optional("bbox", self.bbox.as_ref().map(BBox::to_json));
		JsonValue::Object(object)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn position(axes: &[f64]) -> Position {
		Position::new(axes.to_vec()).unwrap()
	}

	fn point(x: f64, y: f64) -> Geometry {
		Geometry::new(GeometryKind::Point(position(&[x, y])))
	}

	#[test]
	fn type_names() {
		assert_eq!(point(0.0, 0.0).type_name(), "Point");
		assert_eq!(
			Geometry::new(GeometryKind::GeometryCollection(vec![])).type_name(),
			"GeometryCollection"
		);
	}

	#[test]
	fn emptiness() {
		assert!(!point(0.0, 0.0).is_empty());
		assert!(Geometry::new(GeometryKind::LineString(vec![])).is_empty());
		assert!(Geometry::new(GeometryKind::MultiPolygon(vec![])).is_empty());
		assert!(Geometry::new(GeometryKind::GeometryCollection(vec![])).is_empty());
	}

	#[test]
	fn dimension_follows_first_position() {
		assert_eq!(point(0.0, 0.0).dimension(), Some(2));

		let line = Geometry::new(GeometryKind::LineString(vec![
			position(&[0.0, 0.0, 5.0]),
			position(&[1.0, 1.0]),
		]));
		// first position decides, even if the rest disagree
		assert_eq!(line.dimension(), Some(3));

		assert_eq!(Geometry::new(GeometryKind::MultiPoint(vec![])).dimension(), None);

		let nested = Geometry::new(GeometryKind::GeometryCollection(vec![Geometry::new(
			GeometryKind::GeometryCollection(vec![point(1.0, 2.0)]),
		)]));
		assert_eq!(nested.dimension(), Some(2));
	}

	#[test]
	fn computed_bbox_point() {
		assert_eq!(
			point(1.0, 2.0).computed_bbox().unwrap().as_vec(),
			vec![1.0, 2.0, 1.0, 2.0]
		);
	}

	#[test]
	fn computed_bbox_polygon() {
		let polygon = Geometry::new(GeometryKind::Polygon(vec![vec![
			position(&[0.0, 0.0]),
			position(&[4.0, 0.0]),
			position(&[4.0, 3.0]),
			position(&[0.0, 0.0]),
		]]));
		assert_eq!(polygon.computed_bbox().unwrap().as_vec(), vec![0.0, 0.0, 4.0, 3.0]);
	}

	#[test]
	fn computed_bbox_collection_merges_children() {
		let collection = Geometry::new(GeometryKind::GeometryCollection(vec![
			point(0.0, 0.0),
			point(10.0, -5.0),
			Geometry::new(GeometryKind::MultiPoint(vec![])),
		]));
		assert_eq!(
			collection.computed_bbox().unwrap().as_vec(),
			vec![0.0, -5.0, 10.0, 0.0]
		);
	}

	#[test]
	fn computed_bbox_empty_is_none() {
		assert_eq!(Geometry::new(GeometryKind::LineString(vec![])).computed_bbox(), None);
		assert_eq!(
			Geometry::new(GeometryKind::GeometryCollection(vec![])).computed_bbox(),
			None
		);
	}

	#[test]
	fn computed_bbox_inconsistent_dimensions_is_none() {
		let line = Geometry::new(GeometryKind::LineString(vec![
			position(&[0.0, 0.0]),
			position(&[1.0, 1.0, 2.0]),
		]));
		assert_eq!(line.computed_bbox(), None);

		let collection = Geometry::new(GeometryKind::GeometryCollection(vec![
			point(0.0, 0.0),
			Geometry::new(GeometryKind::Point(position(&[1.0, 1.0, 1.0]))),
		]));
		assert_eq!(collection.computed_bbox(), None);
	}

	#[test]
	fn to_json_round_trip_shape() {
		let mut geometry = point(102.0, 0.5);
		geometry.bbox = Some(BBox::from_position(&position(&[102.0, 0.5])));
		geometry.foreign.set("name", "origin");

		assert_eq!(
			geometry.to_json().to_string(),
			r#"{"bbox":[102,0.5,102,0.5],"coordinates":[102,0.5],"name":"origin","type":"Point"}"#
		);
	}

	#[test]
	fn to_json_collection() {
		let collection = Geometry::new(GeometryKind::GeometryCollection(vec![point(1.0, 2.0)]));
		assert_eq!(
			collection.to_json().to_string(),
			r#"{"geometries":[{"coordinates":[1,2],"type":"Point"}],"type":"GeometryCollection"}"#
		);
	}
}
