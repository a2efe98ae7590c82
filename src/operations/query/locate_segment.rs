use crate::chain::{SegmentChain, SegmentId};
use crate::math::Vector3;

/// Finds the segment a body is standing on.
pub struct LocateSegment {
    pos: Vector3,
    radius_sine: f32,
}

impl LocateSegment {
    /// Creates a new `LocateSegment` query.
    ///
    /// `radius_sine` is the sine of the body's angular radius, as taken by
    /// [`ArcSegment::contains`](crate::geometry::ArcSegment::contains).
    #[must_use]
    pub fn new(pos: Vector3, radius_sine: f32) -> Self {
        Self { pos, radius_sine }
    }

    /// Executes the query, returning the first segment in insertion order
    /// that contains the position.
    #[must_use]
    pub fn execute(&self, chain: &SegmentChain) -> Option<SegmentId> {
        chain
            .iter()
            .find(|(_, node)| node.segment.contains(&self.pos, self.radius_sine))
            .map(|(id, _)| id)
    }
}
