//! In-memory road network built from a snapshot.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::RoadNetwork;
use crate::domain::{DomainError, Node, NodeId, Segment, SegmentId, Street, StreetId};

/// A turn the editor has marked as disallowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnRestriction {
    pub from: SegmentId,
    pub to: SegmentId,
    pub node: NodeId,
}

/// Serialized form of a road network region.
///
/// Nodes are optional: any node referenced by a segment but not listed is
/// created with its incident segments in snapshot order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub streets: Vec<Street>,
    #[serde(default)]
    pub restricted_turns: Vec<TurnRestriction>,
    #[serde(default)]
    pub allow_u_turns: bool,
}

/// A validated road network held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryNetwork {
    segments: HashMap<SegmentId, Segment>,
    nodes: HashMap<NodeId, Node>,
    streets: HashMap<StreetId, Street>,
    restricted: HashSet<TurnRestriction>,
    allow_u_turns: bool,
}

impl MemoryNetwork {
    /// Build a network from a snapshot, checking the model invariants.
    pub fn from_snapshot(snapshot: NetworkSnapshot) -> Result<Self, DomainError> {
        let mut streets = HashMap::with_capacity(snapshot.streets.len());
        for street in snapshot.streets {
            let id = street.id;
            if streets.insert(id, street).is_some() {
                return Err(DomainError::DuplicateId {
                    kind: "street",
                    id: id.get(),
                });
            }
        }

        let mut nodes: HashMap<NodeId, Node> = HashMap::with_capacity(snapshot.nodes.len());
        for node in snapshot.nodes {
            let id = node.id;
            if nodes.insert(id, node).is_some() {
                return Err(DomainError::DuplicateId {
                    kind: "node",
                    id: id.get(),
                });
            }
        }

        let mut segments = HashMap::with_capacity(snapshot.segments.len());
        let mut order = Vec::with_capacity(snapshot.segments.len());
        for segment in snapshot.segments {
            segment.validate()?;
            for street in segment.street_ids() {
                if !streets.contains_key(&street) {
                    return Err(DomainError::UnknownStreet {
                        segment: segment.id,
                        street,
                    });
                }
            }
            let id = segment.id;
            order.push(id);
            if segments.insert(id, segment).is_some() {
                return Err(DomainError::DuplicateId {
                    kind: "segment",
                    id: id.get(),
                });
            }
        }

        // Listed incident segments must exist and end at the node.
        for node in nodes.values() {
            for seg_id in &node.segments {
                match segments.get(seg_id) {
                    Some(seg) if seg.touches(node.id) => {}
                    _ => {
                        return Err(DomainError::NodeSegmentMismatch {
                            node: node.id,
                            segment: *seg_id,
                        });
                    }
                }
            }
        }

        for seg_id in &order {
            let seg = &segments[seg_id];
            for node_id in [seg.from_node, seg.to_node] {
                let node = nodes.entry(node_id).or_insert_with(|| Node {
                    id: node_id,
                    segments: Vec::new(),
                });
                if !node.segments.contains(seg_id) {
                    node.segments.push(*seg_id);
                }
            }
        }

        Ok(Self {
            segments,
            nodes,
            streets,
            restricted: snapshot.restricted_turns.into_iter().collect(),
            allow_u_turns: snapshot.allow_u_turns,
        })
    }

    /// Number of segments held.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl RoadNetwork for MemoryNetwork {
    fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.get(&id)
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    fn street(&self, id: StreetId) -> Option<&Street> {
        self.streets.get(&id)
    }

    fn is_turn_allowed(&self, from: &Segment, to: &Segment, at: NodeId) -> bool {
        if !from.can_arrive_at(at) || !to.can_depart_from(at) {
            return false;
        }
        if from.id == to.id && !self.allow_u_turns {
            return false;
        }
        !self.restricted.contains(&TurnRestriction {
            from: from.id,
            to: to.id,
            node: at,
        })
    }
}

/// Builder for assembling a network in code.
///
/// Provides a fluent API for adding streets, segments and restrictions.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    snapshot: NetworkSnapshot,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named street.
    pub fn street(mut self, id: i64, name: &str) -> Self {
        self.snapshot.streets.push(Street {
            id: StreetId(id),
            name: Some(name.to_string()),
        });
        self
    }

    pub fn segment(mut self, segment: Segment) -> Self {
        self.snapshot.segments.push(segment);
        self
    }

    /// Add a node with an explicit incident segment order.
    pub fn node(mut self, id: i64, segments: &[i64]) -> Self {
        self.snapshot.nodes.push(Node {
            id: NodeId(id),
            segments: segments.iter().copied().map(SegmentId).collect(),
        });
        self
    }

    /// Disallow the turn from `from` into `to` at `node`.
    pub fn restrict_turn(mut self, from: i64, to: i64, node: i64) -> Self {
        self.snapshot.restricted_turns.push(TurnRestriction {
            from: SegmentId(from),
            to: SegmentId(to),
            node: NodeId(node),
        });
        self
    }

    pub fn build(self) -> Result<MemoryNetwork, DomainError> {
        MemoryNetwork::from_snapshot(self.snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Direction, RoadType};
    use crate::network::fixtures::seg;

    #[test]
    fn nodes_are_derived_from_segments() {
        let network = NetworkBuilder::new()
            .street(1, "SR-1")
            .segment(seg(100, 1, 2, 50.0, RoadType::MinorHighway, Some(1)))
            .segment(seg(101, 2, 3, 50.0, RoadType::MinorHighway, Some(1)))
            .build()
            .unwrap();

        let node = network.node(NodeId(2)).unwrap();
        assert_eq!(
            node.incident_segment_ids(),
            &[SegmentId(100), SegmentId(101)]
        );
        assert_eq!(network.len(), 2);
    }

    #[test]
    fn explicit_node_order_is_kept() {
        let network = NetworkBuilder::new()
            .segment(seg(100, 1, 2, 50.0, RoadType::Street, None))
            .segment(seg(101, 2, 3, 50.0, RoadType::Street, None))
            .segment(seg(102, 2, 4, 50.0, RoadType::Street, None))
            .node(2, &[102, 100])
            .build()
            .unwrap();

        let node = network.node(NodeId(2)).unwrap();
        assert_eq!(
            node.incident_segment_ids(),
            &[SegmentId(102), SegmentId(100), SegmentId(101)]
        );
    }

    #[test]
    fn rejects_unknown_street() {
        let result = NetworkBuilder::new()
            .segment(seg(100, 1, 2, 50.0, RoadType::Street, Some(9)))
            .build();
        assert!(matches!(result, Err(DomainError::UnknownStreet { .. })));
    }

    #[test]
    fn rejects_node_listing_foreign_segment() {
        let result = NetworkBuilder::new()
            .segment(seg(100, 1, 2, 50.0, RoadType::Street, None))
            .node(3, &[100])
            .build();
        assert!(matches!(
            result,
            Err(DomainError::NodeSegmentMismatch { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_segment() {
        let result = NetworkBuilder::new()
            .segment(seg(100, 1, 2, 50.0, RoadType::Street, None))
            .segment(seg(100, 2, 3, 50.0, RoadType::Street, None))
            .build();
        assert!(matches!(result, Err(DomainError::DuplicateId { .. })));
    }

    #[test]
    fn turn_rules() {
        let mut one_way = seg(102, 4, 2, 50.0, RoadType::Street, None);
        one_way.direction = Direction::FromTo;

        let network = NetworkBuilder::new()
            .segment(seg(100, 1, 2, 50.0, RoadType::Street, None))
            .segment(seg(101, 2, 3, 50.0, RoadType::Street, None))
            .segment(one_way)
            .restrict_turn(101, 100, 2)
            .build()
            .unwrap();

        let a = network.segment(SegmentId(100)).unwrap();
        let b = network.segment(SegmentId(101)).unwrap();
        let c = network.segment(SegmentId(102)).unwrap();

        assert!(network.is_turn_allowed(a, b, NodeId(2)));
        assert!(!network.is_turn_allowed(b, a, NodeId(2)));
        // Entering a one-way segment against its direction.
        assert!(!network.is_turn_allowed(a, c, NodeId(2)));
        assert!(network.is_turn_allowed(c, a, NodeId(2)));
        // Not an endpoint of the segment being left.
        assert!(!network.is_turn_allowed(a, b, NodeId(3)));
        // U-turns are off by default.
        assert!(!network.is_turn_allowed(a, a, NodeId(2)));
    }

    #[test]
    fn snapshot_from_json() {
        let json = r#"{
            "segments": [
                {"id": 1, "from_node": 10, "to_node": 11, "direction": "bidirectional",
                 "length": 120.5, "road_type": 7, "primary_street": 3,
                 "center": {"lon": -80.1, "lat": 26.2}}
            ],
            "streets": [{"id": 3, "name": "SR-7"}]
        }"#;

        let snapshot: NetworkSnapshot = serde_json::from_str(json).unwrap();
        let network = MemoryNetwork::from_snapshot(snapshot).unwrap();
        let seg = network.segment(SegmentId(1)).unwrap();
        assert_eq!(seg.road_type, RoadType::MinorHighway);
        assert_eq!(network.street_names(seg), vec!["SR-7"]);
        assert!(seg.streets.is_empty());
    }
}
