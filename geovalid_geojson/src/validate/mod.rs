//! The validation engine.
//!
//! Entry point is [`Validator::validate`] (or the free [`validate`] with the
//! default configuration): it routes a decoded JSON document on its `type`
//! member and returns either the typed document or the full diagnostic list.
//! Validation never raises for control flow; every failure becomes an
//! [`Issue`] and the caller decides what a non-empty list means.

mod bbox;
mod dimension;
mod feature;
mod geometry;
mod issue;
mod path;
mod ring;

pub use bbox::{bbox_matches, compute_bbox, merge_bboxes};
pub use dimension::{DimensionMismatch, check_collection_dimension, check_uniform_dimension};
pub use issue::{Issue, IssueKind, Issues};
pub use path::{JsonPath, PathSegment};
pub use ring::{MIN_RING_LEN, is_closed_ring};

pub(crate) use bbox::check_bbox_member;

use crate::geo::GeoJson;
use geovalid_core::json::JsonValue;

/// The default bound on geometry/feature nesting. Deep enough for any
/// real-world document, shallow enough to keep adversarial nesting from
/// exhausting the stack.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Shared state of one validation call: the collected diagnostics, the
/// current sub-path, and the recursion depth against its bound.
pub(crate) struct Context {
	pub(crate) issues: Vec<Issue>,
	path: Vec<PathSegment>,
	depth: usize,
	max_depth: usize,
}

impl Context {
	pub(crate) fn new(max_depth: usize) -> Self {
		Self {
			issues: Vec::new(),
			path: Vec::new(),
			depth: 0,
			max_depth,
		}
	}

	pub(crate) fn issue(&mut self, kind: IssueKind, message: String) {
		let path = JsonPath::from(self.path.clone());
		log::debug!("{kind} at {path}: {message}");
		self.issues.push(Issue::new(kind, path, message));
	}

	pub(crate) fn with_key<T>(&mut self, key: &str, f: impl FnOnce(&mut Self) -> T) -> T {
		self.path.push(PathSegment::Key(key.to_string()));
		let result = f(self);
		self.path.pop();
		result
	}

	pub(crate) fn with_index<T>(&mut self, index: usize, f: impl FnOnce(&mut Self) -> T) -> T {
		self.path.push(PathSegment::Index(index));
		let result = f(self);
		self.path.pop();
		result
	}

	/// Descend one nesting level. Records `TooDeep` and refuses when the
	/// configured bound is exceeded.
	pub(crate) fn enter(&mut self) -> bool {
		if self.depth >= self.max_depth {
			self.issue(
				IssueKind::TooDeep,
				format!("nesting exceeds the configured bound of {}", self.max_depth),
			);
			return false;
		}
		self.depth += 1;
		true
	}

	pub(crate) fn leave(&mut self) {
		self.depth -= 1;
	}
}

/// A configured validator. Carries no state across calls; every call gets
/// its own context, so one validator may be shared freely.
#[derive(Clone, Copy, Debug)]
pub struct Validator {
	max_depth: usize,
}

impl Validator {
	#[must_use]
	pub fn new() -> Self {
		Self {
			max_depth: DEFAULT_MAX_DEPTH,
		}
	}

	/// A validator with a custom bound on geometry/feature nesting.
	#[must_use]
	pub fn with_max_depth(max_depth: usize) -> Self {
		Self { max_depth }
	}

	/// Validate one GeoJSON document.
	///
	/// Accepted documents come back as typed values with every numeric field
	/// and every unknown member preserved; rejected ones come back as the
	/// ordered list of all diagnostics found.
	///
	/// # Errors
	/// Returns all collected [`Issues`] if the document is not valid GeoJSON.
	pub fn validate(&self, value: &JsonValue) -> Result<GeoJson, Issues> {
		let mut ctx = Context::new(self.max_depth);
		let typed = check_document(&mut ctx, value);
		log::trace!(
			"validation finished: typed={}, issues={}",
			typed.is_some(),
			ctx.issues.len()
		);
		match typed {
			Some(document) if ctx.issues.is_empty() => Ok(document),
			_ => Err(Issues::from(ctx.issues)),
		}
	}
}

impl Default for Validator {
	fn default() -> Self {
		Self::new()
	}
}

/// Validate one GeoJSON document with the default configuration.
///
/// # Errors
/// Returns all collected [`Issues`] if the document is not valid GeoJSON.
pub fn validate(value: &JsonValue) -> Result<GeoJson, Issues> {
	Validator::new().validate(value)
}

fn check_document(ctx: &mut Context, value: &JsonValue) -> Option<GeoJson> {
	let object = match value.as_object() {
		Ok(object) => object,
		Err(_) => {
			ctx.issue(
				IssueKind::InvalidType,
				format!("a GeoJSON document must be an object, found a {}", value.type_name()),
			);
			return None;
		}
	};
	match geometry::type_member(ctx, object)? {
		"Feature" => feature::check_feature_object(ctx, object).map(GeoJson::Feature),
		"FeatureCollection" => feature::check_feature_collection_object(ctx, object).map(GeoJson::FeatureCollection),
		"Point" | "MultiPoint" | "LineString" | "MultiLineString" | "Polygon" | "MultiPolygon"
		| "GeometryCollection" => geometry::check_geometry_object(ctx, object).map(GeoJson::Geometry),
		other => {
			let message = format!("\"{other}\" is not a GeoJSON type");
			ctx.with_key("type", |ctx| ctx.issue(IssueKind::InvalidType, message));
			None
		}
	}
}
