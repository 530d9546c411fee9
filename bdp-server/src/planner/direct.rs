//! Local depth-first search for a direct route.
//!
//! The search walks the road network from the start bracket towards the end
//! bracket, following only segments that keep street-name continuity with
//! the previous segment and with one of the two brackets. It is greedy: at
//! each node it extends the path with the first admissible segment in the
//! node's native order, and the first path that reaches the end bracket wins.
//!
//! Termination does not rely on a global visited set. A segment is excluded
//! only while it is on the current path, so the search is bounded by three
//! things together: the length limit, a memo of transitions already tried
//! (never retried from the same predecessor), and a hard step cap.

use std::collections::HashSet;

use tracing::{debug, trace, warn};

use super::route::Route;
use crate::continuity::name_continuity;
use crate::domain::{NodeId, Segment, SegmentId};
use crate::network::RoadNetwork;

/// Inputs for a direct route search.
#[derive(Debug, Clone, Copy)]
pub struct DirectRouteRequest<'a> {
    /// The bracket the route leaves from.
    pub start: &'a Segment,

    /// Endpoint of `start` at which the search begins.
    pub start_node: NodeId,

    /// The bracket the route must turn into.
    pub end: &'a Segment,

    /// Nodes from which `end` may be entered.
    pub end_nodes: &'a [NodeId],

    /// Maximum summed length of the segments between the brackets (meters).
    pub max_length: f64,

    /// Step budget for this search.
    pub max_steps: usize,
}

/// Result of a direct route search.
#[derive(Debug, Clone, Default)]
pub struct DirectSearchResult {
    /// The first direct route found, brackets included.
    pub route: Option<Route>,

    /// Number of search steps taken.
    pub steps: usize,

    /// Whether the step budget ran out before the search finished.
    pub truncated: bool,
}

impl DirectSearchResult {
    pub fn found(&self) -> bool {
        self.route.is_some()
    }
}

/// One entry on the search stack: a segment and the node it was entered at.
#[derive(Debug, Clone, Copy)]
struct Frame<'a> {
    segment: &'a Segment,
    entered_at: NodeId,
}

enum Explored {
    Found(Route),
    Exhausted,
    Truncated,
}

struct DirectSearch<'a, N: ?Sized> {
    network: &'a N,
    request: DirectRouteRequest<'a>,
    /// Transitions (from, to) already tried; never retried.
    tried: HashSet<(SegmentId, SegmentId)>,
    steps: usize,
}

/// Search for a direct route leaving the start bracket at `request.start_node`.
pub fn find_direct_route<N: RoadNetwork + ?Sized>(
    network: &N,
    request: &DirectRouteRequest<'_>,
) -> DirectSearchResult {
    let mut search = DirectSearch {
        network,
        request: *request,
        tried: HashSet::new(),
        steps: 0,
    };
    search.run()
}

/// Retry the search from each candidate start node until one succeeds.
///
/// The step budget in `request` is shared across all attempts.
pub fn find_direct_route_from_any<N: RoadNetwork + ?Sized>(
    network: &N,
    request: &DirectRouteRequest<'_>,
    start_nodes: &[NodeId],
) -> DirectSearchResult {
    let mut steps = 0;

    for &start_node in start_nodes {
        let attempt = DirectRouteRequest {
            start_node,
            max_steps: request.max_steps.saturating_sub(steps),
            ..*request
        };
        let result = find_direct_route(network, &attempt);
        steps += result.steps;

        if result.found() || result.truncated {
            return DirectSearchResult { steps, ..result };
        }
    }

    DirectSearchResult {
        route: None,
        steps,
        truncated: false,
    }
}

impl<'a, N: RoadNetwork + ?Sized> DirectSearch<'a, N> {
    fn run(&mut self) -> DirectSearchResult {
        let network = self.network;
        let start = self.request.start;
        let start_node = self.request.start_node;

        let node = match network.node(start_node) {
            Some(node) if start.touches(start_node) => node,
            _ => {
                debug!(
                    segment = %start.id,
                    node = %start_node,
                    "Start node is not a loaded endpoint of the start bracket"
                );
                return self.finish(None, false);
            }
        };

        for &root_id in node.incident_segment_ids() {
            if root_id == start.id || root_id == self.request.end.id {
                continue;
            }
            let Some(root) = network.segment(root_id) else {
                continue;
            };

            if !network.is_turn_allowed(start, root, start_node)
                || !name_continuity(network, &[start, root])
            {
                self.tried.insert((start.id, root_id));
                continue;
            }

            match self.explore(root) {
                Explored::Found(route) => {
                    debug!(
                        start = %start.id,
                        end = %self.request.end.id,
                        segments = route.len(),
                        steps = self.steps,
                        "Direct route found"
                    );
                    return self.finish(Some(route), false);
                }
                Explored::Truncated => return self.finish(None, true),
                Explored::Exhausted => {}
            }
        }

        debug!(
            start = %start.id,
            node = %start_node,
            steps = self.steps,
            "No direct route from start node"
        );
        self.finish(None, false)
    }

    /// Depth-first search below one first segment out of the start node.
    fn explore(&mut self, root: &'a Segment) -> Explored {
        let mut stack = vec![Frame {
            segment: root,
            entered_at: self.request.start_node,
        }];
        let mut length = root.length;

        while let Some(&Frame {
            segment,
            entered_at,
        }) = stack.last()
        {
            self.steps += 1;
            if self.steps > self.request.max_steps {
                warn!(
                    start = %self.request.start.id,
                    end = %self.request.end.id,
                    max_steps = self.request.max_steps,
                    "Direct route search hit its step cap"
                );
                return Explored::Truncated;
            }

            if length > self.request.max_length {
                stack.pop();
                length -= segment.length;
                continue;
            }

            let Some(far) = segment.other_node(entered_at) else {
                stack.pop();
                length -= segment.length;
                continue;
            };

            trace!(
                segment = %segment.id,
                node = %far,
                depth = stack.len(),
                length,
                "Search step"
            );

            if self.request.end_nodes.contains(&far)
                && self.network.is_turn_allowed(segment, self.request.end, far)
            {
                return Explored::Found(self.route_through(&stack));
            }

            match self.next_segment(&stack, segment, far) {
                Some(next) => {
                    self.tried.insert((segment.id, next.id));
                    length += next.length;
                    stack.push(Frame {
                        segment: next,
                        entered_at: far,
                    });
                }
                None => {
                    stack.pop();
                    length -= segment.length;
                }
            }
        }

        Explored::Exhausted
    }

    /// The first admissible segment out of `node`, in the node's native order.
    fn next_segment(
        &self,
        stack: &[Frame<'a>],
        current: &Segment,
        node: NodeId,
    ) -> Option<&'a Segment> {
        let network = self.network;
        let request = &self.request;

        network
            .node(node)?
            .incident_segment_ids()
            .iter()
            .filter(|&&id| id != request.start.id && id != request.end.id)
            .filter(|&&id| !stack.iter().any(|frame| frame.segment.id == id))
            .filter(|&&id| !self.tried.contains(&(current.id, id)))
            .filter_map(|&id| network.segment(id))
            .find(|&candidate| self.admissible(current, candidate, node))
    }

    fn admissible(&self, current: &Segment, candidate: &Segment, node: NodeId) -> bool {
        let network = self.network;
        network.is_turn_allowed(current, candidate, node)
            && name_continuity(network, &[current, candidate])
            && (name_continuity(network, &[self.request.start, candidate])
                || name_continuity(network, &[self.request.end, candidate]))
    }

    fn route_through(&self, stack: &[Frame<'a>]) -> Route {
        let mut segments = Vec::with_capacity(stack.len() + 2);
        segments.push(self.request.start.id);
        segments.extend(stack.iter().map(|frame| frame.segment.id));
        segments.push(self.request.end.id);
        Route::new(segments)
    }

    fn finish(&self, route: Option<Route>, truncated: bool) -> DirectSearchResult {
        DirectSearchResult {
            route,
            steps: self.steps,
            truncated,
        }
    }
}

#[cfg(test)]
#[path = "direct_tests.rs"]
mod tests;
