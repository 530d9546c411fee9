//! Historical routing service client.
//!
//! This module provides an HTTP client for the map editor's routing
//! service, which proposes routes between two points from historic travel
//! times. The BDP check uses it as an alternative to the local search.
//!
//! Key characteristics of the service:
//! - Endpoints are regional (North America, Israel, rest of world)
//! - Responses may contain bare `NaN` tokens, which are not valid JSON
//! - The primary route is inlined at the top level; alternatives follow

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{RoutingClient, RoutingConfig, RoutingRegion};
pub use convert::{RouteCandidate, RouteStep, convert_routing_response, parse_routing_body};
pub use error::RoutingError;
pub use mock::MockRoutingClient;
pub use types::{AlternativeRoute, PathLocation, RouteResponse, RouteStepDto, RoutingResponse};
