use crate::chain::{SegmentChain, SegmentId};
use crate::error::Result;
use crate::geometry::BoundingVolume;

/// Fits a bounding volume around one segment of a chain.
pub struct RecalculateAabb {
    segment: SegmentId,
}

impl RecalculateAabb {
    /// Creates a new `RecalculateAabb` query.
    #[must_use]
    pub fn new(segment: SegmentId) -> Self {
        Self { segment }
    }

    /// Executes the query, overwriting the center and size of `volume`.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment is not in `chain`.
    pub fn execute(&self, chain: &SegmentChain, volume: &mut impl BoundingVolume) -> Result<()> {
        chain.segment(self.segment)?.recalculate_aabb(volume);
        Ok(())
    }
}
