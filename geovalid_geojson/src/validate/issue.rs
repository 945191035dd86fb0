use super::JsonPath;
use std::fmt::Display;
use thiserror::Error;

/// Stable classification of a validation failure, one per invariant class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum IssueKind {
	/// Unknown or mismatched `type` discriminant, or a structurally
	/// malformed member.
	InvalidType,
	/// A position shorter than two axes.
	InvalidPositionArity,
	/// Positions or child geometries disagree in dimension.
	InconsistentDimension,
	/// A supplied bbox has the wrong length or does not equal the computed
	/// extrema exactly.
	InvalidBbox,
	/// A polygon ring is below the minimum length or not closed.
	OpenLinearRing,
	/// An object carries a key forbidden for its type.
	ReservedKeyConflict,
	/// Nesting exceeds the validator's configured recursion bound.
	TooDeep,
}

impl IssueKind {
	/// The stable error code, suitable for machine consumption.
	#[must_use]
	pub fn code(self) -> &'static str {
		use IssueKind::*;
		match self {
			InvalidType => "InvalidType",
			InvalidPositionArity => "InvalidPositionArity",
			InconsistentDimension => "InconsistentDimension",
			InvalidBbox => "InvalidBbox",
			OpenLinearRing => "OpenLinearRing",
			ReservedKeyConflict => "ReservedKeyConflict",
			TooDeep => "TooDeep",
		}
	}
}

impl Display for IssueKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.code())
	}
}

/// A single diagnostic: what failed, where, and a human-readable message.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{kind} at {path}: {message}")]
pub struct Issue {
	pub kind: IssueKind,
	pub path: JsonPath,
	pub message: String,
}

impl Issue {
	#[must_use]
	pub fn new(kind: IssueKind, path: JsonPath, message: String) -> Self {
		Self { kind, path, message }
	}
}

/// The ordered, non-empty list of diagnostics of a failed validation.
///
/// Per-node checks are fail-fast, but sibling and child nodes are always
/// fully evaluated, so one failed document can carry several issues.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{}", summary(.0))]
pub struct Issues(pub Vec<Issue>);

impl Issues {
	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Issue> {
		self.0.iter()
	}

	#[must_use]
	pub fn first(&self) -> Option<&Issue> {
		self.0.first()
	}

	/// Whether any contained issue has the given kind.
	#[must_use]
	pub fn has_kind(&self, kind: IssueKind) -> bool {
		self.0.iter().any(|issue| issue.kind == kind)
	}
}

impl From<Vec<Issue>> for Issues {
	fn from(issues: Vec<Issue>) -> Self {
		Self(issues)
	}
}

impl IntoIterator for Issues {
	type Item = Issue;
	type IntoIter = std::vec::IntoIter<Issue>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

fn summary(issues: &[Issue]) -> String {
	let items = issues.iter().map(ToString::to_string).collect::<Vec<_>>();
	format!("validation failed with {} issue(s): {}", issues.len(), items.join("; "))
}
