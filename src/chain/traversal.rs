use crate::error::ChainError;
use crate::math::Vector3;

use super::{Direction, SegmentChain, SegmentId, TraversalParams};

/// A travel parameter on a particular segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainPosition {
    /// The segment the parameter belongs to.
    pub segment: SegmentId,
    /// Arc-length parameter on that segment.
    pub t: f32,
}

impl ChainPosition {
    /// Creates a new chain position.
    #[must_use]
    pub fn new(segment: SegmentId, t: f32) -> Self {
        Self { segment, t }
    }
}

/// Result of resolving a chain position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainSample {
    /// The position after handoff, with `t` inside its segment's range.
    pub position: ChainPosition,
    /// The evaluated center-of-mass point.
    pub point: Vector3,
    /// Number of segment boundaries crossed.
    pub hops: usize,
}

/// Resolves `start` onto the segment whose range holds its parameter and
/// evaluates it there, with default [`TraversalParams`].
///
/// # Errors
///
/// See [`resolve_with`].
pub fn resolve(
    chain: &SegmentChain,
    start: ChainPosition,
    height: f32,
) -> Result<ChainSample, ChainError> {
    resolve_with(chain, start, height, TraversalParams::default())
}

/// Resolves `start` onto the segment whose range holds its parameter and
/// evaluates it there.
///
/// While the parameter is past the current segment's arc length, that length
/// is subtracted and traversal moves to `next`. While it is negative, the
/// previous segment's arc length is added and traversal moves to `prev`. Once
/// any boundary has been crossed, the point is evaluated at
/// `params.handoff_height` instead of `height`.
///
/// Once the walk has gone all the way around a closed loop, whole laps are
/// dropped from the remaining parameter, so very large steps still resolve.
///
/// # Errors
///
/// - [`ChainError::NonFiniteParameter`] if `start.t` is NaN or infinite.
/// - [`ChainError::ChainExhausted`] if traversal runs off an open end.
/// - [`ChainError::SegmentNotFound`] if a visited ID is not in `chain`.
pub fn resolve_with(
    chain: &SegmentChain,
    start: ChainPosition,
    height: f32,
    params: TraversalParams,
) -> Result<ChainSample, ChainError> {
    if !start.t.is_finite() {
        return Err(ChainError::NonFiniteParameter(start.t));
    }

    let mut id = start.segment;
    let mut t = start.t;
    let mut height = height;
    let mut hops = 0;

    loop {
        let node = chain.node(id)?;
        let extent = node.segment.arc_length();

        if t > extent {
            let Some(next) = node.next else {
                tracing::debug!(segment = ?id, t, extent, "chain exhausted moving forward");
                return Err(ChainError::ChainExhausted {
                    segment: id,
                    direction: Direction::Forward,
                    remaining: t - extent,
                });
            };
            t -= extent;
            id = next;
        } else if t < 0.0 {
            let Some(prev) = node.prev else {
                tracing::debug!(segment = ?id, t, "chain exhausted moving backward");
                return Err(ChainError::ChainExhausted {
                    segment: id,
                    direction: Direction::Backward,
                    remaining: t,
                });
            };
            t += chain.segment(prev)?.arc_length();
            id = prev;
        } else {
            return Ok(ChainSample {
                position: ChainPosition::new(id, t),
                point: node.segment.evaluate_at_height(t, height),
                hops,
            });
        }

        height = params.handoff_height;
        hops += 1;
        tracing::trace!(segment = ?id, t, hops, "handed off to neighbor");

        // After `len` hops some segment has repeated, so `id` sits on a loop.
        if hops == chain.len() {
            t = fold_laps(chain, id, t)?;
        }
    }
}

/// Drops whole laps from `t` when `id` lies on a closed loop, keeping one
/// lap so the walk still crosses a boundary.
///
/// Without this a large `t` stops changing once a segment's arc length falls
/// below its precision, and the walk never ends.
fn fold_laps(chain: &SegmentChain, id: SegmentId, t: f32) -> Result<f32, ChainError> {
    if !chain.is_closed_from(id)? {
        return Ok(t);
    }
    let lap = chain.total_length_from(id)?;
    if t.abs() <= 2.0 * lap {
        return Ok(t);
    }
    let folded = t % lap + lap.copysign(t);
    tracing::debug!(segment = ?id, t, folded, lap, "folded whole laps");
    Ok(folded)
}
