mod cursor;
mod traversal;

pub use cursor::{ChainCursor, Pose};
pub use traversal::{resolve, resolve_with, ChainPosition, ChainSample};

use slotmap::SlotMap;

use crate::debug;
use crate::error::ChainError;
use crate::geometry::ArcSegment;

slotmap::new_key_type! {
    /// Unique identifier for a segment in a [`SegmentChain`].
    pub struct SegmentId;
}

/// Direction of travel along a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward `next`, increasing parameter.
    Forward,
    /// Toward `prev`, decreasing parameter.
    Backward,
}

/// Parameters controlling chain traversal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraversalParams {
    /// Height evaluated on the segment reached after a handoff, in place of
    /// the caller's height.
    pub handoff_height: f32,
}

impl Default for TraversalParams {
    fn default() -> Self {
        Self {
            handoff_height: 0.01,
        }
    }
}

/// A segment together with its links to neighboring segments.
#[derive(Debug, Clone)]
pub struct ChainNode {
    /// The segment geometry.
    pub segment: ArcSegment,
    /// Segment reached when the parameter drops below zero, if any.
    pub prev: Option<SegmentId>,
    /// Segment reached when the parameter passes the arc length, if any.
    pub next: Option<SegmentId>,
}

/// Arena owning a chain of arc segments.
///
/// Segments reference their neighbors via typed IDs (generational indices),
/// so closed loops need no shared ownership. Segments are never removed
/// individually; the whole chain is dropped with its owner.
#[derive(Debug, Default)]
pub struct SegmentChain {
    nodes: SlotMap<SegmentId, ChainNode>,
}

impl SegmentChain {
    /// Creates a new, empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an unlinked segment and returns its ID.
    pub fn insert(&mut self, segment: ArcSegment) -> SegmentId {
        self.nodes.insert(ChainNode {
            segment,
            prev: None,
            next: None,
        })
    }

    /// Returns the node for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::SegmentNotFound`] if `id` is not in this chain.
    pub fn node(&self, id: SegmentId) -> Result<&ChainNode, ChainError> {
        self.nodes.get(id).ok_or(ChainError::SegmentNotFound)
    }

    fn node_mut(&mut self, id: SegmentId) -> Result<&mut ChainNode, ChainError> {
        self.nodes.get_mut(id).ok_or(ChainError::SegmentNotFound)
    }

    /// Returns the segment geometry for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::SegmentNotFound`] if `id` is not in this chain.
    pub fn segment(&self, id: SegmentId) -> Result<&ArcSegment, ChainError> {
        self.node(id).map(|node| &node.segment)
    }

    /// Returns the segment after `id`, if linked.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::SegmentNotFound`] if `id` is not in this chain.
    pub fn next(&self, id: SegmentId) -> Result<Option<SegmentId>, ChainError> {
        self.node(id).map(|node| node.next)
    }

    /// Returns the segment before `id`, if linked.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::SegmentNotFound`] if `id` is not in this chain.
    pub fn prev(&self, id: SegmentId) -> Result<Option<SegmentId>, ChainError> {
        self.node(id).map(|node| node.prev)
    }

    /// Links `from` to `to` so that `from.next == to` and `to.prev == from`.
    ///
    /// Neighbors that pointed back at either segment through the replaced
    /// links are detached.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::SegmentNotFound`] if either ID is not in this chain.
    pub fn link(&mut self, from: SegmentId, to: SegmentId) -> Result<(), ChainError> {
        self.node(to)?;
        self.unlink_next(from)?;
        let old_prev = self.node_mut(to)?.prev.take();
        if let Some(old_prev) = old_prev {
            if let Some(node) = self.nodes.get_mut(old_prev) {
                if node.next == Some(to) {
                    node.next = None;
                    debug::print("relinking detached a segment from its previous next");
                }
            }
        }
        self.node_mut(from)?.next = Some(to);
        self.node_mut(to)?.prev = Some(from);
        Ok(())
    }

    /// Detaches the segment after `id`, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::SegmentNotFound`] if `id` is not in this chain.
    pub fn unlink_next(&mut self, id: SegmentId) -> Result<Option<SegmentId>, ChainError> {
        let next = self.node_mut(id)?.next.take();
        if let Some(next) = next {
            if let Some(node) = self.nodes.get_mut(next) {
                if node.prev == Some(id) {
                    node.prev = None;
                }
            }
        }
        Ok(next)
    }

    /// Swaps in new geometry for `id`, keeping its links. Returns the old geometry.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::SegmentNotFound`] if `id` is not in this chain.
    pub fn replace(&mut self, id: SegmentId, segment: ArcSegment) -> Result<ArcSegment, ChainError> {
        let node = self.node_mut(id)?;
        Ok(std::mem::replace(&mut node.segment, segment))
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether the chain holds no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over segment IDs in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = SegmentId> + '_ {
        self.nodes.keys()
    }

    /// Iterates over segments in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (SegmentId, &ChainNode)> {
        self.nodes.iter()
    }

    /// Walks `next` links from `start` and reports whether they lead back to it.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::SegmentNotFound`] if `start` is not in this chain.
    pub fn is_closed_from(&self, start: SegmentId) -> Result<bool, ChainError> {
        let mut id = start;
        for _ in 0..self.len() {
            match self.next(id)? {
                Some(next) if next == start => return Ok(true),
                Some(next) => id = next,
                None => return Ok(false),
            }
        }
        Ok(false)
    }

    /// Sums arc lengths along `next` links from `start` until the chain ends
    /// or returns to `start`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::SegmentNotFound`] if `start` is not in this chain.
    pub fn total_length_from(&self, start: SegmentId) -> Result<f32, ChainError> {
        let mut total = 0.0;
        let mut id = start;
        for _ in 0..self.len() {
            let node = self.node(id)?;
            total += node.segment.arc_length();
            match node.next {
                Some(next) if next != start => id = next,
                _ => break,
            }
        }
        Ok(total)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector3;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, TAU};

    fn quarter_ring() -> Vec<ArcSegment> {
        let edges = [
            Vector3::z(),
            Vector3::x(),
            -Vector3::z(),
            -Vector3::x(),
        ];
        (0..4)
            .map(|i| ArcSegment::new(edges[i], edges[(i + 1) % 4], Vector3::y()).unwrap())
            .collect()
    }

    fn open_chain() -> (SegmentChain, Vec<SegmentId>) {
        let mut chain = SegmentChain::new();
        let ids: Vec<_> = quarter_ring().into_iter().map(|s| chain.insert(s)).collect();
        for pair in ids.windows(2) {
            chain.link(pair[0], pair[1]).unwrap();
        }
        (chain, ids)
    }

    #[test]
    fn insert_starts_unlinked() {
        let mut chain = SegmentChain::new();
        assert!(chain.is_empty());
        let id = chain.insert(quarter_ring().remove(0));
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.next(id).unwrap(), None);
        assert_eq!(chain.prev(id).unwrap(), None);
    }

    #[test]
    fn link_sets_both_sides() {
        let (chain, ids) = open_chain();
        assert_eq!(chain.next(ids[0]).unwrap(), Some(ids[1]));
        assert_eq!(chain.prev(ids[1]).unwrap(), Some(ids[0]));
        assert_eq!(chain.prev(ids[0]).unwrap(), None);
        assert_eq!(chain.next(ids[3]).unwrap(), None);
    }

    #[test]
    fn relink_detaches_old_neighbors() {
        let (mut chain, ids) = open_chain();
        chain.link(ids[0], ids[2]).unwrap();
        assert_eq!(chain.next(ids[0]).unwrap(), Some(ids[2]));
        assert_eq!(chain.prev(ids[2]).unwrap(), Some(ids[0]));
        assert_eq!(chain.prev(ids[1]).unwrap(), None);
        assert_eq!(chain.next(ids[1]).unwrap(), None);
    }

    #[test]
    fn unlink_next_returns_neighbor() {
        let (mut chain, ids) = open_chain();
        assert_eq!(chain.unlink_next(ids[1]).unwrap(), Some(ids[2]));
        assert_eq!(chain.prev(ids[2]).unwrap(), None);
        assert_eq!(chain.unlink_next(ids[1]).unwrap(), None);
    }

    #[test]
    fn closed_detection() {
        let (mut chain, ids) = open_chain();
        assert!(!chain.is_closed_from(ids[0]).unwrap());
        chain.link(ids[3], ids[0]).unwrap();
        assert!(chain.is_closed_from(ids[0]).unwrap());
        assert!(chain.is_closed_from(ids[2]).unwrap());
    }

    #[test]
    fn total_length() {
        let (mut chain, ids) = open_chain();
        assert_relative_eq!(
            chain.total_length_from(ids[1]).unwrap(),
            3.0 * FRAC_PI_2,
            epsilon = 1e-5
        );
        chain.link(ids[3], ids[0]).unwrap();
        assert_relative_eq!(chain.total_length_from(ids[1]).unwrap(), TAU, epsilon = 1e-5);
    }

    #[test]
    fn replace_keeps_links() {
        let (mut chain, ids) = open_chain();
        let lesser = ArcSegment::new(
            Vector3::new(0.0, 0.6, 0.8),
            Vector3::new(0.8, 0.6, 0.0),
            Vector3::y(),
        )
        .unwrap();
        let old = chain.replace(ids[1], lesser.clone()).unwrap();
        assert_eq!(old, quarter_ring()[1]);
        assert_eq!(chain.segment(ids[1]).unwrap(), &lesser);
        assert_eq!(chain.next(ids[1]).unwrap(), Some(ids[2]));
    }

    #[test]
    fn foreign_id_is_not_found() {
        let (other, other_ids) = open_chain();
        let chain = SegmentChain::new();
        assert_eq!(chain.segment(other_ids[0]).err(), Some(ChainError::SegmentNotFound));
        assert_eq!(other.len(), 4);
    }

    #[test]
    fn ids_follow_insertion_order() {
        let (chain, ids) = open_chain();
        assert_eq!(chain.ids().collect::<Vec<_>>(), ids);
    }
}
