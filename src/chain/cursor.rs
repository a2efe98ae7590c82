use crate::error::ChainError;
use crate::math::Vector3;

use super::traversal::{resolve_with, ChainPosition, ChainSample};
use super::{SegmentChain, TraversalParams};

/// Position and orientation of a body on a chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Center-of-mass position.
    pub point: Vector3,
    /// Unit direction of travel.
    pub right: Vector3,
    /// Surface normal, `right x point`.
    pub normal: Vector3,
}

/// Travel state of one body moving along a chain.
///
/// Each moving body owns its own cursor; the chain itself is only read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainCursor {
    position: ChainPosition,
    height: f32,
    params: TraversalParams,
}

impl ChainCursor {
    /// Creates a cursor at `position` for a body raised by `height`.
    #[must_use]
    pub fn new(position: ChainPosition, height: f32) -> Self {
        Self {
            position,
            height,
            params: TraversalParams::default(),
        }
    }

    /// Replaces the traversal parameters.
    #[must_use]
    pub fn with_params(mut self, params: TraversalParams) -> Self {
        self.params = params;
        self
    }

    /// Returns the current chain position.
    #[must_use]
    pub fn position(&self) -> ChainPosition {
        self.position
    }

    /// Returns the body height.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Moves the cursor by `step` along the chain and returns the new pose.
    ///
    /// Negative steps move backward. On error the cursor is not moved.
    ///
    /// # Errors
    ///
    /// Returns the [`ChainError`] from resolving the new position, such as
    /// [`ChainError::ChainExhausted`] at an open end.
    pub fn advance(&mut self, chain: &SegmentChain, step: f32) -> Result<Pose, ChainError> {
        let target = ChainPosition::new(self.position.segment, self.position.t + step);
        let sample = resolve_with(chain, target, self.height, self.params)?;
        self.position = sample.position;
        pose_of(chain, &sample)
    }

    /// Returns the pose at the current position.
    ///
    /// # Errors
    ///
    /// Returns the [`ChainError`] from resolving the current position.
    pub fn pose(&self, chain: &SegmentChain) -> Result<Pose, ChainError> {
        let sample = resolve_with(chain, self.position, self.height, self.params)?;
        pose_of(chain, &sample)
    }
}

fn pose_of(chain: &SegmentChain, sample: &ChainSample) -> Result<Pose, ChainError> {
    let segment = chain.segment(sample.position.segment)?;
    let right = segment.evaluate_right(sample.position.t);
    Ok(Pose {
        point: sample.point,
        right,
        normal: segment.evaluate_normal(&sample.point, &right),
    })
}
