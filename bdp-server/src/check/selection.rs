//! Interpreting a user's segment selection.
//!
//! A selection is either the two bracketing segments on their own, or a
//! whole detour route with a bracketing segment at each end.

use std::collections::HashMap;

use petgraph::unionfind::UnionFind;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::SelectionError;
use super::session::CheckSession;
use crate::domain::{NodeId, Segment, SegmentId};
use crate::network::RoadNetwork;

/// Segments selected by the user, in selection order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    segments: Vec<SegmentId>,
}

impl Selection {
    pub fn new(segments: Vec<SegmentId>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[SegmentId] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl From<Vec<i64>> for Selection {
    fn from(ids: Vec<i64>) -> Self {
        Self::new(ids.into_iter().map(SegmentId).collect())
    }
}

/// The two shapes of selection a check accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionKind {
    /// Just the two bracketing segments.
    Pair,
    /// Bracketing segments with the detour route between them.
    Detour,
}

/// The end bracket's two endpoints, relative to the detour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetourEnds {
    /// Endpoint shared with the detour.
    pub near: NodeId,
    /// Endpoint away from the detour.
    pub far: NodeId,
}

/// A selection resolved against the road network.
#[derive(Debug, Clone)]
pub struct ClassifiedSelection<'a> {
    pub start: &'a Segment,
    pub end: &'a Segment,
    /// Segments between the brackets, in selection order. Empty for a pair.
    pub detour: Vec<&'a Segment>,
    /// Present for a detour selection.
    pub ends: Option<DetourEnds>,
}

impl ClassifiedSelection<'_> {
    pub fn kind(&self) -> SelectionKind {
        if self.ends.is_some() {
            SelectionKind::Detour
        } else {
            SelectionKind::Pair
        }
    }
}

/// Whether the selected segments form one connected piece of road.
fn is_connected(segments: &[&Segment]) -> bool {
    let mut index: HashMap<NodeId, usize> = HashMap::new();
    for segment in segments {
        for node in [segment.from_node, segment.to_node] {
            let next = index.len();
            index.entry(node).or_insert(next);
        }
    }

    let mut components = UnionFind::<usize>::new(index.len());
    for segment in segments {
        components.union(index[&segment.from_node], index[&segment.to_node]);
    }

    let Some(first) = segments.first() else {
        return true;
    };
    let root = index[&first.from_node];
    segments
        .iter()
        .all(|segment| components.equiv(root, index[&segment.from_node]))
}

/// Resolve a selection into brackets and detour.
///
/// For a detour selection the brackets are the first and last selected
/// segments. If the host reported that the first selected segment was the
/// last one clicked, the path was drawn backwards and the brackets swap.
/// The end bracket's far node is cached on the session.
pub fn classify<'a, N: RoadNetwork + ?Sized>(
    network: &'a N,
    selection: &Selection,
    session: &mut CheckSession,
) -> Result<ClassifiedSelection<'a>, SelectionError> {
    session.set_route_far_end_node(None);

    let ids = selection.segments();
    if ids.len() < 2 {
        return Err(SelectionError::TooFewSegments);
    }

    let segments = ids
        .iter()
        .map(|id| {
            network
                .segment(*id)
                .ok_or(SelectionError::SegmentNotLoaded(*id))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let connected = is_connected(&segments);

    let (first, last) = (segments[0], segments[segments.len() - 1]);

    if segments.len() == 2 {
        if connected {
            return Err(SelectionError::AlreadyConnected);
        }
        debug!(start = %first.id, end = %last.id, "Classified bracket pair");
        return Ok(ClassifiedSelection {
            start: first,
            end: last,
            detour: Vec::new(),
            ends: None,
        });
    }

    if !connected {
        return Err(SelectionError::Disconnected);
    }

    let (start, end) = if session.last_path_click() == Some(first.id) {
        (last, first)
    } else {
        (first, last)
    };
    let detour = segments[1..segments.len() - 1].to_vec();

    let touches_detour = |node: NodeId| detour.iter().any(|segment| segment.touches(node));
    let far = if touches_detour(end.from_node) {
        end.to_node
    } else {
        end.from_node
    };
    let near = end
        .other_node(far)
        .ok_or(SelectionError::NodeNotLoaded(far))?;
    if network.node(near).is_none() {
        return Err(SelectionError::NodeNotLoaded(near));
    }
    session.set_route_far_end_node(Some(far));

    debug!(
        start = %start.id,
        end = %end.id,
        detour = detour.len(),
        far = %far,
        "Classified detour selection"
    );
    Ok(ClassifiedSelection {
        start,
        end,
        detour,
        ends: Some(DetourEnds { near, far }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoadType;
    use crate::network::fixtures::seg;
    use crate::network::{MemoryNetwork, NetworkBuilder};

    fn minor(id: i64, from: i64, to: i64) -> Segment {
        seg(id, from, to, 100.0, RoadType::MinorHighway, Some(1))
    }

    /// Start 100 (10-1), detour 401 (1-5) and 402 (5-2), end 200 (2-20),
    /// direct segment 300 (1-2), and 500 (30-31) off on its own.
    fn network() -> MemoryNetwork {
        NetworkBuilder::new()
            .street(1, "SR-1")
            .segment(minor(100, 10, 1))
            .segment(minor(401, 1, 5))
            .segment(minor(402, 5, 2))
            .segment(minor(200, 2, 20))
            .segment(minor(300, 1, 2))
            .segment(minor(500, 30, 31))
            .build()
            .unwrap()
    }

    fn classify_ids<'a>(
        network: &'a MemoryNetwork,
        ids: Vec<i64>,
        session: &mut CheckSession,
    ) -> Result<ClassifiedSelection<'a>, SelectionError> {
        classify(network, &Selection::from(ids), session)
    }

    #[test]
    fn too_few_segments() {
        let network = network();
        let mut session = CheckSession::new();
        assert_eq!(
            classify_ids(&network, vec![], &mut session).unwrap_err(),
            SelectionError::TooFewSegments
        );
        assert_eq!(
            classify_ids(&network, vec![100], &mut session).unwrap_err(),
            SelectionError::TooFewSegments
        );
    }

    #[test]
    fn unknown_segment() {
        let network = network();
        let mut session = CheckSession::new();
        assert_eq!(
            classify_ids(&network, vec![100, 999], &mut session).unwrap_err(),
            SelectionError::SegmentNotLoaded(SegmentId(999))
        );
    }

    #[test]
    fn pair_of_separate_brackets() {
        let network = network();
        let mut session = CheckSession::new();
        let classified = classify_ids(&network, vec![100, 200], &mut session).unwrap();

        assert_eq!(classified.kind(), SelectionKind::Pair);
        assert_eq!(classified.start.id, SegmentId(100));
        assert_eq!(classified.end.id, SegmentId(200));
        assert!(classified.detour.is_empty());
        assert_eq!(session.route_far_end_node(), None);
    }

    #[test]
    fn pair_already_connected() {
        let network = network();
        let mut session = CheckSession::new();
        assert_eq!(
            classify_ids(&network, vec![100, 300], &mut session).unwrap_err(),
            SelectionError::AlreadyConnected
        );
    }

    #[test]
    fn detour_must_be_continuous() {
        let network = network();
        let mut session = CheckSession::new();
        assert_eq!(
            classify_ids(&network, vec![100, 401, 200], &mut session).unwrap_err(),
            SelectionError::Disconnected
        );
        assert_eq!(
            classify_ids(&network, vec![100, 401, 402, 200, 500], &mut session).unwrap_err(),
            SelectionError::Disconnected
        );
    }

    #[test]
    fn detour_in_selection_order() {
        let network = network();
        let mut session = CheckSession::new();
        let classified = classify_ids(&network, vec![100, 401, 402, 200], &mut session).unwrap();

        assert_eq!(classified.kind(), SelectionKind::Detour);
        assert_eq!(classified.start.id, SegmentId(100));
        assert_eq!(classified.end.id, SegmentId(200));
        let detour: Vec<SegmentId> = classified.detour.iter().map(|s| s.id).collect();
        assert_eq!(detour, vec![SegmentId(401), SegmentId(402)]);
        assert_eq!(
            classified.ends,
            Some(DetourEnds {
                near: NodeId(2),
                far: NodeId(20),
            })
        );
        assert_eq!(session.route_far_end_node(), Some(NodeId(20)));
    }

    #[test]
    fn detour_drawn_backwards() {
        let network = network();
        let mut session = CheckSession::new();
        session.on_path_select(SegmentId(200));

        let classified = classify_ids(&network, vec![200, 402, 401, 100], &mut session).unwrap();

        assert_eq!(classified.start.id, SegmentId(100));
        assert_eq!(classified.end.id, SegmentId(200));
        assert_eq!(session.route_far_end_node(), Some(NodeId(20)));
    }

    #[test]
    fn detour_without_path_click_keeps_order() {
        let network = network();
        let mut session = CheckSession::new();

        let classified = classify_ids(&network, vec![200, 402, 401, 100], &mut session).unwrap();

        assert_eq!(classified.start.id, SegmentId(200));
        assert_eq!(classified.end.id, SegmentId(100));
        // End bracket 100 runs 10-1 and meets the detour at node 1.
        assert_eq!(
            classified.ends,
            Some(DetourEnds {
                near: NodeId(1),
                far: NodeId(10),
            })
        );
    }

    #[test]
    fn far_node_is_cleared_by_next_classification() {
        let network = network();
        let mut session = CheckSession::new();
        classify_ids(&network, vec![100, 401, 402, 200], &mut session).unwrap();
        assert!(session.route_far_end_node().is_some());

        classify_ids(&network, vec![100, 200], &mut session).unwrap();
        assert_eq!(session.route_far_end_node(), None);
    }

    fn segs<'a>(network: &'a MemoryNetwork, ids: &[i64]) -> Vec<&'a Segment> {
        ids.iter()
            .map(|id| network.segment(SegmentId(*id)).unwrap())
            .collect()
    }

    #[test]
    fn connectivity() {
        let network = network();

        assert!(is_connected(&segs(&network, &[100, 401, 402, 200])));
        assert!(is_connected(&segs(&network, &[402, 100, 200, 401])));
        assert!(!is_connected(&segs(&network, &[100, 200])));
        assert!(!is_connected(&segs(&network, &[100, 300, 500])));
    }
}
