//! Reasons a BDP check stops before or instead of searching.

use std::fmt;

use crate::domain::{NodeId, SegmentId};

/// A distance in meters, displayed the way the check reports caps
/// ("500m", "5km").
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Meters(pub f64);

impl fmt::Display for Meters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meters = self.0;
        if meters >= 1_000.0 && meters % 1_000.0 == 0.0 {
            write!(f, "{}km", meters / 1_000.0)
        } else {
            write!(f, "{meters}m")
        }
    }
}

/// The selection does not have a shape the check understands.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectionError {
    #[error(
        "You must select either the two bracketing segments or an entire detour route with bracketing segments."
    )]
    TooFewSegments,

    #[error(
        "If you select more than 2 segments, the selection of segments must be continuous. Either select just the two bracketing segments or an entire detour route with bracketing segments."
    )]
    Disconnected,

    #[error(
        "You selected only two segments and they connect to each other. There are no alternate routes."
    )]
    AlreadyConnected,

    #[error("Segment {0} is not loaded in the road network.")]
    SegmentNotLoaded(SegmentId),

    #[error("Node {0} is not loaded in the road network.")]
    NodeNotLoaded(NodeId),
}

/// A BDP rule rules the selection out. No search is run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Ineligible {
    #[error(
        "At least one of the bracketing selected segments is not in the correct road type group for BDP."
    )]
    BracketRoadType,

    #[error(
        "One bracketing segment is a minor highway while the other is not. BDP only applies when bracketing segments are in the same road type group."
    )]
    BracketGroupMismatch,

    #[error(
        "Your selection contains one or more segments with an unroutable road type. The selected route is not a valid route."
    )]
    UnroutableDetour,

    #[error(
        "BDP will not be applied to this detour route because the last detour segment and the second bracketing segment share a common street name."
    )]
    DetourSharesName,

    #[error(
        "BDP will not be applied to this detour route because the last detour segment and the second bracketing segment are in the same road type group."
    )]
    DetourSharesGroup,

    #[error("BDP will not be applied to this detour route because it is less than 2 segments long.")]
    DetourTooShort,

    #[error("BDP will not be applied to this detour route because it is longer than {cap}.")]
    DetourTooLong { cap: Meters },

    #[error(
        "The bracketing segments do not share a street name. BDP will not be applied to any route."
    )]
    NoSharedName,
}

/// Why a check ended without a search result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CheckError {
    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Ineligible(#[from] Ineligible),

    /// Several detour segments end at the second bracket and none stands out.
    #[error("Could not determine the last detour segment (candidates: {}).", join_ids(.candidates))]
    AmbiguousDetourEndpoint { candidates: Vec<SegmentId> },
}

fn join_ids(ids: &[SegmentId]) -> String {
    if ids.is_empty() {
        return "none".to_string();
    }
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meters_display() {
        assert_eq!(Meters(500.0).to_string(), "500m");
        assert_eq!(Meters(5_000.0).to_string(), "5km");
        assert_eq!(Meters(1_500.0).to_string(), "1500m");
    }

    #[test]
    fn cap_in_message() {
        let err = Ineligible::DetourTooLong { cap: Meters(500.0) };
        assert_eq!(
            err.to_string(),
            "BDP will not be applied to this detour route because it is longer than 500m."
        );
    }

    #[test]
    fn umbrella_is_transparent() {
        let err = CheckError::from(Ineligible::DetourTooShort);
        assert!(err.to_string().contains("less than 2 segments long"));

        let err = CheckError::from(SelectionError::AlreadyConnected);
        assert!(err.to_string().contains("connect to each other"));
    }

    #[test]
    fn ambiguous_lists_candidates() {
        let err = CheckError::AmbiguousDetourEndpoint {
            candidates: vec![SegmentId(4), SegmentId(5)],
        };
        assert_eq!(
            err.to_string(),
            "Could not determine the last detour segment (candidates: 4, 5)."
        );
    }
}
