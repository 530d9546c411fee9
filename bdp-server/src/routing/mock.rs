//! Mock routing client for testing without the live service.
//!
//! Serves a fixed response body (or a fixed failure status) for every
//! request, parsed exactly as a live response would be.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::LonLat;
use crate::planner::RouteProvider;

use super::convert::{RouteCandidate, parse_routing_body};
use super::error::RoutingError;

#[derive(Debug, Clone)]
enum MockReply {
    Body(String),
    Status(u16),
}

/// Mock routing client that answers every request the same way.
#[derive(Debug, Clone)]
pub struct MockRoutingClient {
    reply: MockReply,
    calls: Arc<AtomicUsize>,
}

impl MockRoutingClient {
    /// Answer every request with the given raw response body.
    pub fn from_body(body: impl Into<String>) -> Self {
        Self {
            reply: MockReply::Body(body.into()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Answer every request with the contents of a saved response file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RoutingError> {
        let path = path.as_ref();
        let body = std::fs::read_to_string(path).map_err(|e| RoutingError::Api {
            status: 0,
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Ok(Self::from_body(body))
    }

    /// Fail every request with the given HTTP status.
    pub fn failing(status: u16) -> Self {
        Self {
            reply: MockReply::Status(status),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of requests served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Mimics `RoutingClient::routing_request`. Coordinates are ignored.
    pub async fn routing_request(
        &self,
        _from: LonLat,
        _to: LonLat,
    ) -> Result<Vec<RouteCandidate>, RoutingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            MockReply::Body(body) => parse_routing_body(body),
            MockReply::Status(429) => Err(RoutingError::RateLimited),
            MockReply::Status(status) => Err(RoutingError::Api {
                status: *status,
                message: "mock failure".to_string(),
            }),
        }
    }
}

impl RouteProvider for MockRoutingClient {
    async fn find_routes(
        &self,
        from: LonLat,
        to: LonLat,
    ) -> Result<Vec<RouteCandidate>, RoutingError> {
        self.routing_request(from, to).await
    }
}
