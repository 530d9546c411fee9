//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::check::{CheckOutcome, SearchMethod, Selection, SelectionKind};
use crate::domain::SegmentId;
use crate::network::NetworkSnapshot;
use crate::planner::Route;

/// Request to run a BDP check.
#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    /// The road network around the selection.
    pub network: NetworkSnapshot,

    /// Selected segment ids, in selection order.
    pub selection: Selection,

    /// Segment last added by a path click, if the selection was drawn as a path.
    #[serde(default)]
    pub last_clicked: Option<SegmentId>,

    /// Search to run (defaults to local)
    #[serde(default)]
    pub method: SearchMethod,
}

/// Response for a completed check.
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub kind: SelectionKind,

    pub method: SearchMethod,

    /// Whether a direct route exists, so BDP applies
    pub penalty_applies: bool,

    /// Message for the user
    pub message: String,

    /// The direct route to highlight, brackets included
    pub route: Option<Route>,

    /// Every direct route found
    pub routes: Vec<Route>,

    /// Local search steps taken
    pub steps_explored: usize,

    /// Whether the local search stopped at its step cap
    pub search_truncated: bool,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

impl CheckResponse {
    /// Create from a check outcome.
    pub fn from_outcome(outcome: CheckOutcome) -> Self {
        let message = outcome.message().to_string();
        let penalty_applies = outcome.penalty_applies();
        let route = outcome.direct_route().cloned();

        Self {
            kind: outcome.kind,
            method: outcome.method,
            penalty_applies,
            message,
            route,
            routes: outcome.routes,
            steps_explored: outcome.steps_explored,
            search_truncated: outcome.search_truncated,
        }
    }
}
