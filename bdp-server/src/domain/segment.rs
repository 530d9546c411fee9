//! Road segments, nodes and streets.

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::geo::LonLat;
use super::ids::{NodeId, SegmentId, StreetId};
use super::road_type::{RoadType, RoadTypeGroup};

/// Travel directions permitted on a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Both directions.
    Bidirectional,
    /// Only from `from_node` towards `to_node`.
    FromTo,
    /// Only from `to_node` towards `from_node`.
    ToFrom,
}

/// A road segment between two distinct nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: SegmentId,
    pub from_node: NodeId,
    pub to_node: NodeId,
    pub direction: Direction,

    /// Length in meters.
    pub length: f64,

    pub road_type: RoadType,

    #[serde(default)]
    pub primary_street: Option<StreetId>,

    /// Alternate street names attached to this segment.
    #[serde(default)]
    pub streets: Vec<StreetId>,

    /// Geometric centre of the segment.
    #[serde(default)]
    pub center: LonLat,
}

impl Segment {
    /// Check the segment's own invariants.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.from_node == self.to_node {
            return Err(DomainError::SelfLoop(self.id));
        }
        if !(self.length.is_finite() && self.length > 0.0) {
            return Err(DomainError::InvalidLength {
                segment: self.id,
                length: self.length,
            });
        }
        Ok(())
    }

    /// The endpoint opposite `known`, or `None` if `known` is not an endpoint.
    pub fn other_node(&self, known: NodeId) -> Option<NodeId> {
        if known == self.from_node {
            Some(self.to_node)
        } else if known == self.to_node {
            Some(self.from_node)
        } else {
            None
        }
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.from_node == node || self.to_node == node
    }

    /// A node both segments end at, if any.
    pub fn shared_node(&self, other: &Segment) -> Option<NodeId> {
        [self.from_node, self.to_node]
            .into_iter()
            .find(|&n| other.touches(n))
    }

    pub fn is_one_way(&self) -> bool {
        self.direction != Direction::Bidirectional
    }

    /// Whether a vehicle may enter this segment at `node` and drive along it.
    pub fn can_depart_from(&self, node: NodeId) -> bool {
        match self.direction {
            Direction::Bidirectional => self.touches(node),
            Direction::FromTo => node == self.from_node,
            Direction::ToFrom => node == self.to_node,
        }
    }

    /// Whether a vehicle driving along this segment may arrive at `node`.
    pub fn can_arrive_at(&self, node: NodeId) -> bool {
        match self.other_node(node) {
            Some(start) => self.can_depart_from(start),
            None => false,
        }
    }

    /// Nodes at which traffic can leave this segment, `to_node` first.
    pub fn exit_nodes(&self) -> Vec<NodeId> {
        let mut nodes = Vec::with_capacity(2);
        if self.direction != Direction::ToFrom {
            nodes.push(self.to_node);
        }
        if self.direction != Direction::FromTo {
            nodes.push(self.from_node);
        }
        nodes
    }

    /// Nodes at which traffic can enter this segment, `from_node` first.
    pub fn entry_nodes(&self) -> Vec<NodeId> {
        let mut nodes = Vec::with_capacity(2);
        if self.direction != Direction::ToFrom {
            nodes.push(self.from_node);
        }
        if self.direction != Direction::FromTo {
            nodes.push(self.to_node);
        }
        nodes
    }

    /// Primary street followed by the alternate streets.
    pub fn street_ids(&self) -> impl Iterator<Item = StreetId> + '_ {
        self.primary_street
            .into_iter()
            .chain(self.streets.iter().copied())
    }

    pub fn group(&self) -> Option<RoadTypeGroup> {
        self.road_type.group()
    }
}

/// An intersection or segment endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,

    /// Incident segments, in the order the editor reports them.
    #[serde(default)]
    pub segments: Vec<SegmentId>,
}

impl Node {
    pub fn incident_segment_ids(&self) -> &[SegmentId] {
        &self.segments
    }
}

/// A street record that segments reference for their names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Street {
    pub id: StreetId,
    #[serde(default)]
    pub name: Option<String>,
}

impl Street {
    /// The street name, treating an empty name as absent.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }
}
