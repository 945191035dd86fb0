use crate::geo::{Geometry, GeometryKind, Position};

/// The first place a dimension disagreement was found: the offender's
/// ordinal in traversal order (positions as visited, geometries in recursive
/// expansion order), the dimension set by the first element, and the
/// dimension actually found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DimensionMismatch {
	pub index: usize,
	pub expected: usize,
	pub found: usize,
}

/// Check that every position shares one dimension.
///
/// The first position seen fixes the expected dimension. Returns the common
/// dimension, `Ok(None)` when there are no positions at all (empty
/// coordinate trees are valid no-ops), and the first mismatch otherwise.
pub fn check_uniform_dimension<'a, I>(positions: I) -> Result<Option<usize>, DimensionMismatch>
where
	I: IntoIterator<Item = &'a Position>,
{
	let mut expected: Option<usize> = None;
	for (index, position) in positions.into_iter().enumerate() {
		match expected {
			None => expected = Some(position.dim()),
			Some(expected) if position.dim() != expected => {
				return Err(DimensionMismatch {
					index,
					expected,
					found: position.dim(),
				});
			}
			Some(_) => {}
		}
	}
	Ok(expected)
}

/// Check that every geometry in a collection shares one dimension,
/// recursively expanding nested collections.
///
/// Each geometry contributes its nominal dimension (first-position rule);
/// internal uniformity of a child is the child's own concern and is checked
/// independently, so an internally inconsistent child and a collection-level
/// disagreement are both surfaced. Empty children contribute nothing. The
/// reported index is the offender's ordinal in the recursive expansion,
/// counting non-empty simple geometries only.
pub fn check_collection_dimension(children: &[Geometry]) -> Result<Option<usize>, DimensionMismatch> {
	let mut dims = Vec::new();
	expanded_dimensions(children, &mut dims);

	let mut expected: Option<usize> = None;
	for (index, found) in dims.into_iter().enumerate() {
		match expected {
			None => expected = Some(found),
			Some(expected) if found != expected => return Err(DimensionMismatch { index, expected, found }),
			Some(_) => {}
		}
	}
	Ok(expected)
}

fn expanded_dimensions(children: &[Geometry], out: &mut Vec<usize>) {
	for child in children {
		if let GeometryKind::GeometryCollection(grandchildren) = &child.kind {
			expanded_dimensions(grandchildren, out);
		} else if let Some(dim) = child.dimension() {
			out.push(dim);
		}
	}
}
