use crate::geo::Position;

/// The minimum number of positions in a linear ring: three distinct corners
/// plus the closing repetition of the first.
pub const MIN_RING_LEN: usize = 4;

/// Whether the ring's first and last positions are element-wise equal.
///
/// Dimension uniformity has already been checked when this runs, so the
/// comparison is a plain exact equality of the two positions.
#[must_use]
pub fn is_closed_ring(ring: &[Position]) -> bool {
	ring.first() == ring.last()
}
