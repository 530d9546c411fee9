//! Domain error types.
//!
//! These errors represent road network data that violates the model's
//! invariants. They are distinct from routing-service and check errors.

use super::{NodeId, SegmentId, StreetId};

/// Domain-level errors for network snapshot validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Both endpoints of a segment are the same node
    #[error("segment {0} starts and ends at the same node")]
    SelfLoop(SegmentId),

    /// Segment length is not a positive number of meters
    #[error("segment {segment} has invalid length {length}")]
    InvalidLength { segment: SegmentId, length: f64 },

    /// Segment references a node missing from the snapshot
    #[error("segment {segment} references unknown node {node}")]
    UnknownNode { segment: SegmentId, node: NodeId },

    /// Segment references a street missing from the snapshot
    #[error("segment {segment} references unknown street {street}")]
    UnknownStreet { segment: SegmentId, street: StreetId },

    /// Node lists a segment that does not end at it
    #[error("node {node} lists segment {segment}, which does not end there")]
    NodeSegmentMismatch { node: NodeId, segment: SegmentId },

    /// The same id appears twice
    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: i64 },
}
