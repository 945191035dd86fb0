use super::{Context, IssueKind};
use crate::geo::{BBox, Position};
use geovalid_core::json::JsonValue;

/// Fold the exact per-axis extrema over a set of positions.
///
/// The accumulator is initialized lazily from the first position, so the
/// dimension need not be known in advance. Min and max are commutative and
/// associative, so traversal order does not affect the result. Returns
/// `None` when there are no positions, or when the positions disagree in
/// dimension and no well-defined extrema exist.
pub fn compute_bbox<'a, I>(positions: I) -> Option<BBox>
where
	I: IntoIterator<Item = &'a Position>,
{
	let mut bbox: Option<BBox> = None;
	for position in positions {
		match &mut bbox {
			Some(bbox) => {
				if bbox.dim() != position.dim() {
					return None;
				}
				bbox.extend_position(position);
			}
			None => bbox = Some(BBox::from_position(position)),
		}
	}
	bbox
}

/// Merge bboxes axis-wise: min of minima, max of maxima. Returns `None` for
/// an empty input or when the bboxes disagree in dimension.
pub fn merge_bboxes<I>(bboxes: I) -> Option<BBox>
where
	I: IntoIterator<Item = BBox>,
{
	let mut merged: Option<BBox> = None;
	for bbox in bboxes {
		match &mut merged {
			Some(merged) => {
				if merged.dim() != bbox.dim() {
					return None;
				}
				merged.extend(&bbox);
			}
			None => merged = Some(bbox),
		}
	}
	merged
}

/// Whether a supplied bbox equals the computed one: same length and every
/// element exactly equal (`f64 ==`, no tolerance).
#[must_use]
pub fn bbox_matches(provided: &BBox, computed: &BBox) -> bool {
	provided == computed
}

/// Decode a raw `bbox` member and compare it against the computed extrema,
/// recording `InvalidBbox` issues under the `bbox` key. Returns the typed
/// bbox whenever it was structurally decodable, even if it did not match.
pub(crate) fn check_bbox_member(ctx: &mut Context, raw: &JsonValue, computed: &BBox) -> Option<BBox> {
	ctx.with_key("bbox", |ctx| {
		let array = match raw.as_array() {
			Ok(array) => array,
			Err(_) => {
				ctx.issue(
					IssueKind::InvalidBbox,
					format!("bbox must be an array of numbers, found a {}", raw.type_name()),
				);
				return None;
			}
		};
		let numbers = match array.as_f64_vec() {
			Ok(numbers) => numbers,
			Err(error) => {
				ctx.issue(IssueKind::InvalidBbox, format!("bbox must contain only numbers: {error:#}"));
				return None;
			}
		};
		let provided = match BBox::try_from(numbers) {
			Ok(bbox) => bbox,
			Err(error) => {
				ctx.issue(IssueKind::InvalidBbox, format!("{error:#}"));
				return None;
			}
		};

		if provided.dim() != computed.dim() {
			ctx.issue(
				IssueKind::InvalidBbox,
				format!(
					"bbox has {} elements but the geometry has dimension {}",
					provided.as_vec().len(),
					computed.dim()
				),
			);
		} else if !bbox_matches(&provided, computed) {
			ctx.issue(
				IssueKind::InvalidBbox,
				format!(
					"bbox {:?} does not equal the computed extrema {:?}",
					provided.as_vec(),
					computed.as_vec()
				),
			);
		}
		Some(provided)
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn position(axes: &[f64]) -> Position {
		Position::new(axes.to_vec()).unwrap()
	}

	#[test]
	fn compute_bbox_of_nothing() {
		assert_eq!(compute_bbox(std::iter::empty::<&Position>()), None);
	}

	#[test]
	fn compute_bbox_single_position() {
		let p = position(&[1.0, 2.0]);
		assert_eq!(compute_bbox([&p]).unwrap().as_vec(), vec![1.0, 2.0, 1.0, 2.0]);
	}

	#[test]
	fn compute_bbox_order_independent() {
		let positions = vec![position(&[3.0, -1.0]), position(&[-2.0, 4.0]), position(&[0.0, 0.0])];
		let forward = compute_bbox(&positions).unwrap();
		let reversed = compute_bbox(positions.iter().rev()).unwrap();
		assert_eq!(forward, reversed);
		assert_eq!(forward.as_vec(), vec![-2.0, -1.0, 3.0, 4.0]);
	}

	#[test]
	fn merge_bboxes_axis_wise() {
		let a = BBox::try_from(vec![0.0, 0.0, 1.0, 1.0]).unwrap();
		let b = BBox::try_from(vec![5.0, -2.0, 6.0, 0.5]).unwrap();
		let merged = merge_bboxes([a, b]).unwrap();
		assert_eq!(merged.as_vec(), vec![0.0, -2.0, 6.0, 1.0]);
	}

	#[test]
	fn merge_bboxes_empty() {
		assert_eq!(merge_bboxes(std::iter::empty::<BBox>()), None);
	}

	#[test]
	fn mixed_dimensions_have_no_extrema() {
		let positions = vec![position(&[0.0, 0.0]), position(&[1.0, 1.0, 2.0])];
		assert_eq!(compute_bbox(&positions), None);

		let a = BBox::try_from(vec![0.0, 0.0, 1.0, 1.0]).unwrap();
		let b = BBox::try_from(vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0]).unwrap();
		assert_eq!(merge_bboxes([a, b]), None);
	}

	#[test]
	fn matching_is_exact() {
		let computed = BBox::try_from(vec![0.0, 0.0, 1.0, 1.0]).unwrap();
		let exact = BBox::try_from(vec![0.0, 0.0, 1.0, 1.0]).unwrap();
		let off = BBox::try_from(vec![0.0, 0.0, 1.0, 1.0 + f64::EPSILON]).unwrap();
		assert!(bbox_matches(&exact, &computed));
		assert!(!bbox_matches(&off, &computed));
	}
}
