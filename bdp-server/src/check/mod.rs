//! BDP check orchestration.
//!
//! A check takes the user's selection, works out which segments bracket the
//! possible detour, applies the BDP eligibility rules, and then looks for a
//! direct route between the brackets, either with the local search or
//! through the routing service.
//!
//! Every failure comes back as a [`CheckError`] whose `Display` is the
//! reason to show the user. The map view is restored however the check
//! ends.

mod eligibility;
mod error;
mod selection;
mod session;

pub use eligibility::{
    check_bracket_names, check_bracket_road_types, check_detour_continuity, check_detour_length,
    check_detour_road_types, resolve_last_detour_segment,
};
pub use error::{CheckError, Ineligible, Meters, SelectionError};
pub use selection::{ClassifiedSelection, DetourEnds, Selection, SelectionKind, classify};
pub use session::{CheckSession, MapViewport, ViewState};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{NodeId, RoadType, Segment};
use crate::network::RoadNetwork;
use crate::planner::{
    CheckConfig, DirectRouteRequest, OfflineProvider, Route, RouteProvider,
    find_direct_route_from_any, find_remote_routes,
};

/// Where to look for a direct route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMethod {
    /// Depth-first search over the loaded road network.
    #[default]
    Local,
    /// The historical routing service.
    Remote,
}

/// Result of a check that got as far as searching.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckOutcome {
    pub kind: SelectionKind,
    pub method: SearchMethod,
    /// Direct routes found, brackets included. The first is the one to show.
    pub routes: Vec<Route>,
    /// Local search steps taken (zero for remote searches).
    pub steps_explored: usize,
    /// Whether the local search stopped at its step cap.
    pub search_truncated: bool,
}

impl CheckOutcome {
    pub fn direct_route(&self) -> Option<&Route> {
        self.routes.first()
    }

    /// A direct route exists, so BDP applies.
    pub fn penalty_applies(&self) -> bool {
        !self.routes.is_empty()
    }

    /// Message to show the user.
    pub fn message(&self) -> &'static str {
        match (self.penalty_applies(), self.kind) {
            (true, _) => "A direct route was found! A BDP penalty applies to routes that leave it.",
            (false, SelectionKind::Pair) => {
                "No direct routes found between the two selected segments. A BDP penalty will not be applied to any routes."
            }
            (false, SelectionKind::Detour) => {
                "No direct routes found between the possible detour bracketing segments. A BDP penalty will not be applied to the selected route."
            }
        }
    }
}

/// What to search for once the selection passed every rule.
struct SearchPlan<'a> {
    kind: SelectionKind,
    start: &'a Segment,
    end: &'a Segment,
    end_nodes: Vec<NodeId>,
    max_length: f64,
}

/// Runs BDP checks against one road network.
pub struct BdpChecker<N, P = OfflineProvider> {
    network: N,
    provider: P,
    config: CheckConfig,
}

impl<N: RoadNetwork> BdpChecker<N> {
    /// A checker with no routing service; remote checks find no routes.
    pub fn local(network: N, config: CheckConfig) -> Self {
        Self::new(network, OfflineProvider, config)
    }
}

impl<N: RoadNetwork, P: RouteProvider> BdpChecker<N, P> {
    pub fn new(network: N, provider: P, config: CheckConfig) -> Self {
        Self {
            network,
            provider,
            config,
        }
    }

    pub fn network(&self) -> &N {
        &self.network
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Check whether BDP applies to the selection.
    ///
    /// Any map view the check changed is restored before returning.
    pub async fn check(
        &self,
        session: &mut CheckSession,
        selection: &Selection,
        method: SearchMethod,
    ) -> Result<CheckOutcome, CheckError> {
        let result = self.run(session, selection, method).await;
        session.restore_view();

        match &result {
            Ok(outcome) => info!(
                kind = ?outcome.kind,
                method = ?outcome.method,
                routes = outcome.routes.len(),
                steps = outcome.steps_explored,
                "BDP check finished"
            ),
            Err(e) => info!(reason = %e, "BDP check rejected selection"),
        }
        result
    }

    async fn run(
        &self,
        session: &mut CheckSession,
        selection: &Selection,
        method: SearchMethod,
    ) -> Result<CheckOutcome, CheckError> {
        let plan = self.plan(session, selection)?;

        let (routes, steps_explored, search_truncated) = match method {
            SearchMethod::Remote => {
                let routes = find_remote_routes(
                    &self.network,
                    &self.provider,
                    plan.start,
                    plan.end,
                    plan.max_length,
                )
                .await;
                (routes, 0, false)
            }
            SearchMethod::Local => {
                let start_nodes = plan.start.exit_nodes();
                let Some(&first) = start_nodes.first() else {
                    return Ok(self.outcome(&plan, method, Vec::new(), 0, false));
                };
                let request = DirectRouteRequest {
                    start: plan.start,
                    start_node: first,
                    end: plan.end,
                    end_nodes: &plan.end_nodes,
                    max_length: plan.max_length,
                    max_steps: self.config.max_search_steps,
                };
                let result = find_direct_route_from_any(&self.network, &request, &start_nodes);
                (
                    result.route.into_iter().collect(),
                    result.steps,
                    result.truncated,
                )
            }
        };

        Ok(self.outcome(&plan, method, routes, steps_explored, search_truncated))
    }

    /// Classify the selection and apply the eligibility rules in order.
    fn plan<'a>(
        &'a self,
        session: &mut CheckSession,
        selection: &Selection,
    ) -> Result<SearchPlan<'a>, CheckError> {
        let network = &self.network;
        let classified = classify(network, selection, session)?;
        let (start, end) = (classified.start, classified.end);

        let group = check_bracket_road_types(start, end)?;
        let max_length = self.config.max_route_length(group);
        let target_zoom = self.config.target_zoom(group);
        let midpoint = start.center.midpoint(end.center);

        let Some(ends) = classified.ends else {
            check_bracket_names(network, start, end)?;
            session.zoom_out(midpoint, target_zoom);
            return Ok(SearchPlan {
                kind: SelectionKind::Pair,
                start,
                end,
                end_nodes: end.entry_nodes(),
                max_length,
            });
        };

        let detour = &classified.detour;
        let last_detour = resolve_last_detour_segment(network, detour, end, ends.near)?;
        check_detour_road_types(detour)?;

        // Detours over streets are checked at the current zoom.
        if !detour
            .iter()
            .any(|segment| segment.road_type == RoadType::Street)
        {
            session.zoom_out(midpoint, target_zoom);
        }

        check_detour_continuity(network, last_detour, end)?;
        check_detour_length(detour, self.config.detour_cap(group))?;
        check_bracket_names(network, start, end)?;

        debug!(
            start = %start.id,
            end = %end.id,
            last_detour = %last_detour.id,
            "Detour selection is eligible"
        );
        Ok(SearchPlan {
            kind: SelectionKind::Detour,
            start,
            end,
            end_nodes: vec![ends.near],
            max_length,
        })
    }

    fn outcome(
        &self,
        plan: &SearchPlan<'_>,
        method: SearchMethod,
        routes: Vec<Route>,
        steps_explored: usize,
        search_truncated: bool,
    ) -> CheckOutcome {
        CheckOutcome {
            kind: plan.kind,
            method,
            routes,
            steps_explored,
            search_truncated,
        }
    }
}
