use crate::chain::{SegmentChain, SegmentId};
use crate::error::{ChainError, Result};
use crate::geometry::ArcSegment;
use crate::math::Vector3;

/// Raw input for one arc segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcFrame {
    /// Foot-level point where the arc starts.
    pub left_edge: Vector3,
    /// Foot-level point where the arc ends.
    pub right_edge: Vector3,
    /// Normal of the arc plane; its sign selects "up".
    pub normal: Vector3,
}

impl ArcFrame {
    /// Creates a new arc frame.
    #[must_use]
    pub fn new(left_edge: Vector3, right_edge: Vector3, normal: Vector3) -> Self {
        Self {
            left_edge,
            right_edge,
            normal,
        }
    }
}

/// Builds a linked chain of segments from a sequence of frames.
pub struct BuildChain {
    frames: Vec<ArcFrame>,
    close: bool,
}

impl BuildChain {
    /// Creates a new `BuildChain` operation.
    ///
    /// When `close` is set, the last segment is linked back to the first.
    #[must_use]
    pub fn new(frames: Vec<ArcFrame>, close: bool) -> Self {
        Self { frames, close }
    }

    /// Executes the operation, inserting the segments into `chain` in order.
    ///
    /// Every frame is validated before anything is inserted, so a failure
    /// leaves `chain` untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::EmptyChain`] when there are no frames, or the
    /// [`InvalidFrame`](crate::GeometryError::InvalidFrame) error of the first
    /// frame that fails to initialize.
    pub fn execute(&self, chain: &mut SegmentChain) -> Result<Vec<SegmentId>> {
        if self.frames.is_empty() {
            return Err(ChainError::EmptyChain.into());
        }

        let segments = self
            .frames
            .iter()
            .map(|frame| ArcSegment::new(frame.left_edge, frame.right_edge, frame.normal))
            .collect::<Result<Vec<_>>>()?;

        let ids: Vec<SegmentId> = segments.into_iter().map(|s| chain.insert(s)).collect();
        for pair in ids.windows(2) {
            chain.link(pair[0], pair[1])?;
        }
        if self.close {
            if let (Some(&first), Some(&last)) = (ids.first(), ids.last()) {
                chain.link(last, first)?;
            }
        }

        tracing::debug!(segments = ids.len(), closed = self.close, "built segment chain");
        Ok(ids)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::chain::{resolve, ChainPosition};
    use crate::error::{GeometryError, SpherewalkError};
    use approx::assert_relative_eq;
    use std::f32::consts::TAU;

    fn ring_frames() -> Vec<ArcFrame> {
        let edges = [Vector3::z(), Vector3::x(), -Vector3::z(), -Vector3::x()];
        (0..4)
            .map(|i| ArcFrame::new(edges[i], edges[(i + 1) % 4], Vector3::y()))
            .collect()
    }

    #[test]
    fn closed_ring() {
        let mut chain = SegmentChain::new();
        let ids = BuildChain::new(ring_frames(), true).execute(&mut chain).unwrap();
        assert_eq!(ids.len(), 4);
        assert!(chain.is_closed_from(ids[0]).unwrap());
        assert_eq!(chain.prev(ids[0]).unwrap(), Some(ids[3]));
        assert_relative_eq!(chain.total_length_from(ids[0]).unwrap(), TAU, epsilon = 1e-5);
    }

    #[test]
    fn open_path() {
        let mut chain = SegmentChain::new();
        let ids = BuildChain::new(ring_frames(), false).execute(&mut chain).unwrap();
        assert!(!chain.is_closed_from(ids[0]).unwrap());
        assert_eq!(chain.prev(ids[0]).unwrap(), None);
        assert_eq!(chain.next(ids[3]).unwrap(), None);
    }

    #[test]
    fn lap_on_built_ring() {
        let mut chain = SegmentChain::new();
        let ids = BuildChain::new(ring_frames(), true).execute(&mut chain).unwrap();
        let sample = resolve(&chain, ChainPosition::new(ids[2], 0.7 + 2.0 * TAU), 0.0).unwrap();
        assert_eq!(sample.position.segment, ids[2]);
        assert_relative_eq!(sample.position.t, 0.7, epsilon = 1e-4);
    }

    #[test]
    fn empty_frames_fail() {
        let mut chain = SegmentChain::new();
        let err = BuildChain::new(Vec::new(), true).execute(&mut chain).unwrap_err();
        assert!(matches!(err, SpherewalkError::Chain(ChainError::EmptyChain)));
    }

    #[test]
    fn invalid_frame_leaves_chain_untouched() {
        let mut chain = SegmentChain::new();
        let mut frames = ring_frames();
        frames[2].normal = Vector3::zeros();
        let err = BuildChain::new(frames, true).execute(&mut chain).unwrap_err();
        assert!(matches!(
            err,
            SpherewalkError::Geometry(GeometryError::InvalidFrame(_))
        ));
        assert!(chain.is_empty());
    }

    #[test]
    fn single_closed_segment_links_itself() {
        let mut chain = SegmentChain::new();
        let frames = vec![ArcFrame::new(Vector3::z(), -Vector3::x(), Vector3::y())];
        let ids = BuildChain::new(frames, true).execute(&mut chain).unwrap();
        assert_eq!(chain.next(ids[0]).unwrap(), Some(ids[0]));
        assert_eq!(chain.prev(ids[0]).unwrap(), Some(ids[0]));
    }
}
