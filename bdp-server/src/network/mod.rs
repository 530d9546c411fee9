//! Road network accessor.
//!
//! The BDP engine never owns the road network: it reads segments, nodes and
//! streets through [`RoadNetwork`], which the embedding application provides.
//! [`MemoryNetwork`] is a self-contained implementation backed by a JSON
//! snapshot, used by the HTTP surface and by tests.

#[cfg(test)]
pub(crate) mod fixtures;
mod memory;

pub use memory::{MemoryNetwork, NetworkBuilder, NetworkSnapshot, TurnRestriction};

use crate::domain::{Node, NodeId, Segment, SegmentId, Street, StreetId};

/// Read access to the road network held by the host application.
pub trait RoadNetwork {
    /// Look up a segment by id.
    fn segment(&self, id: SegmentId) -> Option<&Segment>;

    /// Look up a node by id.
    fn node(&self, id: NodeId) -> Option<&Node>;

    /// Look up a street by id.
    fn street(&self, id: StreetId) -> Option<&Street>;

    /// Whether a vehicle on `from` may turn into `to` at node `at`.
    fn is_turn_allowed(&self, from: &Segment, to: &Segment, at: NodeId) -> bool;

    /// Look up several segments, skipping ids the network does not hold.
    fn segments_by_ids(&self, ids: &[SegmentId]) -> Vec<&Segment> {
        ids.iter().filter_map(|id| self.segment(*id)).collect()
    }

    /// Non-empty names of the primary and alternate streets of a segment.
    fn street_names(&self, segment: &Segment) -> Vec<&str> {
        segment
            .street_ids()
            .filter_map(|id| self.street(id))
            .filter_map(Street::name)
            .collect()
    }
}

impl<N: RoadNetwork + ?Sized> RoadNetwork for &N {
    fn segment(&self, id: SegmentId) -> Option<&Segment> {
        (**self).segment(id)
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        (**self).node(id)
    }

    fn street(&self, id: StreetId) -> Option<&Street> {
        (**self).street(id)
    }

    fn is_turn_allowed(&self, from: &Segment, to: &Segment, at: NodeId) -> bool {
        (**self).is_turn_allowed(from, to, at)
    }
}
