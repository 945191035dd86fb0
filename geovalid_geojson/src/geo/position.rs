use anyhow::{Result, ensure};
use geovalid_core::json::JsonValue;
use std::fmt::Debug;

/// An ordered tuple of axis values identifying a point in space.
///
/// A position has at least two axes; its length is the *dimension* of the
/// geometry it belongs to. Positions are immutable once constructed and
/// compare element-wise with exact `f64` equality.
#[derive(Clone, PartialEq)]
pub struct Position(Vec<f64>);

impl Position {
	/// Create a position from its axis values.
	///
	/// # Errors
	/// Returns an error if fewer than two axes are given.
	pub fn new(axes: Vec<f64>) -> Result<Self> {
		ensure!(axes.len() >= 2, "a position must have at least 2 axes, got {}", axes.len());
		Ok(Self(axes))
	}

	/// The number of axes of this position.
	#[must_use]
	pub fn dim(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn axes(&self) -> &[f64] {
		&self.0
	}

	#[must_use]
	pub fn to_json(&self) -> JsonValue {
		JsonValue::from(self.0.clone())
	}
}

impl<const N: usize> TryFrom<[f64; N]> for Position {
	type Error = anyhow::Error;

	fn try_from(axes: [f64; N]) -> Result<Self> {
		Position::new(axes.to_vec())
	}
}

impl Debug for Position {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.0.fmt(f)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn new_requires_two_axes() {
		assert!(Position::new(vec![]).is_err());
		assert!(Position::new(vec![1.0]).is_err());
		assert!(Position::new(vec![1.0, 2.0]).is_ok());
		assert!(Position::new(vec![1.0, 2.0, 3.0, 4.0]).is_ok());
	}

	#[test]
	fn dim_and_axes() {
		let position = Position::new(vec![13.4, 52.5, 34.0]).unwrap();
		assert_eq!(position.dim(), 3);
		assert_eq!(position.axes(), &[13.4, 52.5, 34.0]);
	}

	#[test]
	fn equality_is_element_wise() {
		let a = Position::try_from([1.0, 2.0]).unwrap();
		let b = Position::try_from([1.0, 2.0]).unwrap();
		let c = Position::try_from([1.0, 2.0 + 1e-12]).unwrap();
		assert_eq!(a, b);
		assert_ne!(a, c);
	}

	#[test]
	fn to_json() {
		let position = Position::try_from([1.5, -2.0]).unwrap();
		assert_eq!(position.to_json().to_string(), "[1.5,-2]");
	}

	#[test]
	fn debug_formats_like_array() {
		let position = Position::try_from([1.0, 2.0]).unwrap();
		assert_eq!(format!("{position:?}"), "[1.0, 2.0]");
	}
}
