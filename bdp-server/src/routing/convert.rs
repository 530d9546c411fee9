//! Conversion from routing DTOs to route candidates.

use serde_json::Value;

use crate::domain::SegmentId;

use super::error::RoutingError;
use super::types::{RouteResponse, RoutingResponse};

/// One step of a candidate route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteStep {
    pub segment: SegmentId,
    /// Distance travelled on this step (meters).
    pub length: f64,
}

/// A route proposed by the routing service, not yet checked for continuity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteCandidate {
    pub steps: Vec<RouteStep>,
}

impl RouteCandidate {
    pub fn new(steps: Vec<RouteStep>) -> Self {
        Self { steps }
    }

    /// Segment ids in travel order.
    pub fn segment_ids(&self) -> Vec<SegmentId> {
        self.steps.iter().map(|step| step.segment).collect()
    }

    /// Length of every step except the first and the last.
    pub fn interior_length(&self) -> f64 {
        match self.steps.as_slice() {
            [_, interior @ .., _] => interior.iter().map(|step| step.length).sum(),
            _ => 0.0,
        }
    }
}

impl From<&RouteResponse> for RouteCandidate {
    fn from(response: &RouteResponse) -> Self {
        Self::new(
            response
                .results
                .iter()
                .map(|result| RouteStep {
                    segment: SegmentId(result.path.segment_id),
                    length: result.length,
                })
                .collect(),
        )
    }
}

/// Parse a raw routing response body into candidate routes.
///
/// The service emits bare `NaN` tokens, which are not JSON; they are read
/// as `0`. The primary route is only returned when its geometry is present.
pub fn parse_routing_body(body: &str) -> Result<Vec<RouteCandidate>, RoutingError> {
    let body = body.replace("NaN", "0");

    let response: RoutingResponse =
        serde_json::from_str(&body).map_err(|e| RoutingError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })?;

    convert_routing_response(response)
}

/// Convert a parsed response into candidate routes, primary first.
pub fn convert_routing_response(
    response: RoutingResponse,
) -> Result<Vec<RouteCandidate>, RoutingError> {
    if let Some(error) = response.error {
        let message = match error {
            Value::String(text) => text.replace('|', "\n"),
            other => other.to_string(),
        };
        return Err(RoutingError::Service(message));
    }

    let mut candidates = Vec::new();

    if response.coords.is_some() {
        if let Some(primary) = &response.response {
            candidates.push(RouteCandidate::from(primary));
        }
    }

    candidates.extend(
        response
            .alternatives
            .iter()
            .flatten()
            .map(|alternative| RouteCandidate::from(&alternative.response)),
    );

    Ok(candidates)
}
