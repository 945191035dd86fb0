use super::Position;
use anyhow::{Result, ensure};
use geovalid_core::json::JsonValue;
use std::fmt::Debug;

/// A bounding box of arbitrary dimension `n`, stored as per-axis minima and
/// maxima in the same axis order as the positions it covers.
///
/// The serialized form is a single array of `2·n` numbers: first the `n`
/// minima, then the `n` maxima. Two bboxes are equal only if every element
/// is exactly equal (`f64 ==`, no tolerance).
#[derive(Clone, PartialEq)]
pub struct BBox {
	min: Vec<f64>,
	max: Vec<f64>,
}

impl BBox {
	/// The degenerate bbox covering a single position.
	#[must_use]
	pub fn from_position(position: &Position) -> Self {
		Self {
			min: position.axes().to_vec(),
			max: position.axes().to_vec(),
		}
	}

	/// The number of axes covered by this bbox.
	#[must_use]
	pub fn dim(&self) -> usize {
		self.min.len()
	}

	#[must_use]
	pub fn min(&self) -> &[f64] {
		&self.min
	}

	#[must_use]
	pub fn max(&self) -> &[f64] {
		&self.max
	}

	/// Grow this bbox in place to cover `position`.
	///
	/// The caller has already established a uniform dimension; axes beyond
	/// the shorter of the two are left untouched.
	pub fn extend_position(&mut self, position: &Position) {
		debug_assert_eq!(self.dim(), position.dim());
		for (axis, value) in position.axes().iter().enumerate().take(self.dim()) {
			self.min[axis] = self.min[axis].min(*value);
			self.max[axis] = self.max[axis].max(*value);
		}
	}

	/// Grow this bbox in place to cover `other` (axis-wise min of minima,
	/// max of maxima).
	pub fn extend(&mut self, other: &BBox) {
		debug_assert_eq!(self.dim(), other.dim());
		for axis in 0..self.dim().min(other.dim()) {
			self.min[axis] = self.min[axis].min(other.min[axis]);
			self.max[axis] = self.max[axis].max(other.max[axis]);
		}
	}

	/// Return the serialized form: `n` minima followed by `n` maxima.
	#[must_use]
	pub fn as_vec(&self) -> Vec<f64> {
		let mut result = self.min.clone();
		result.extend_from_slice(&self.max);
		result
	}

	#[must_use]
	pub fn to_json(&self) -> JsonValue {
		JsonValue::from(self.as_vec())
	}
}

impl TryFrom<Vec<f64>> for BBox {
	type Error = anyhow::Error;

	/// Split a flat `2·n` array into minima and maxima.
	///
	/// # Errors
	/// Returns an error if the length is odd or below 4. No ordering check
	/// is applied here: a supplied bbox is judged by exact comparison with
	/// the computed one.
	fn try_from(input: Vec<f64>) -> Result<Self> {
		ensure!(
			input.len() >= 4 && input.len() % 2 == 0,
			"a bbox must have 2·n elements with n >= 2, got {}",
			input.len()
		);
		let n = input.len() / 2;
		Ok(Self {
			min: input[..n].to_vec(),
			max: input[n..].to_vec(),
		})
	}
}

impl Debug for BBox {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "BBox{:?}", self.as_vec())
	}
}
