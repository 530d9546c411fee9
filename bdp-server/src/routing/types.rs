//! Routing service response DTOs.
//!
//! These map the JSON returned by the historical routing endpoint. Only the
//! fields the check reads are modelled; everything else is ignored.

use serde::Deserialize;
use serde_json::Value;

/// Top-level routing response.
///
/// The primary route is inlined at the top level (its `response` and
/// `coords` fields); further routes are listed under `alternatives`.
#[derive(Debug, Clone, Deserialize)]
pub struct RoutingResponse {
    /// Set when the service could not route. Either a string or an object.
    pub error: Option<Value>,

    /// Steps of the primary route.
    pub response: Option<RouteResponse>,

    /// Geometry of the primary route. The primary route is only usable
    /// when this is present.
    pub coords: Option<Value>,

    /// Alternative routes, in the order the service ranked them.
    pub alternatives: Option<Vec<AlternativeRoute>>,
}

/// One alternative route.
#[derive(Debug, Clone, Deserialize)]
pub struct AlternativeRoute {
    pub response: RouteResponse,
    pub coords: Option<Value>,
}

/// The steps of a single route.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteResponse {
    pub results: Vec<RouteStepDto>,
}

/// One step of a route: a segment traversal.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteStepDto {
    pub path: PathLocation,

    /// Distance travelled on this step (meters).
    #[serde(default)]
    pub length: f64,
}

/// Where a step runs on the road network.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathLocation {
    pub segment_id: i64,

    pub node_id: Option<i64>,

    /// Whether the segment is driven from its `from` node to its `to` node.
    pub is_forward: Option<bool>,
}
