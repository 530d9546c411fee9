//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedRoutingClient;
use crate::planner::CheckConfig;

/// Shared application state.
///
/// The road network arrives with each request; only the routing client and
/// the check thresholds live here.
#[derive(Clone)]
pub struct AppState {
    /// Cached routing service client
    pub routing: Arc<CachedRoutingClient>,

    /// BDP check thresholds
    pub config: Arc<CheckConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(routing: CachedRoutingClient, config: CheckConfig) -> Self {
        Self {
            routing: Arc::new(routing),
            config: Arc::new(config),
        }
    }
}
