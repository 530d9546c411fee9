//! Caching layer for routing service responses.
//!
//! Repeated checks of the same brackets ask the routing service the same
//! question. Responses are cached by bracket coordinates, rounded to a
//! millionth of a degree (about 0.1 m), so an unchanged selection is
//! answered from memory until the entry expires.
//!
//! Only successful responses are cached; failures are retried next time.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::LonLat;
use crate::planner::RouteProvider;
use crate::routing::{RouteCandidate, RoutingClient, RoutingError};

/// Cache key for routing responses: quantised (from, to) coordinates.
type RouteKey = (i64, i64, i64, i64);

/// Cached routing response entry.
type RouteEntry = Arc<Vec<RouteCandidate>>;

/// Coordinate quantum for cache keys, in degrees.
const KEY_RESOLUTION_DEG: f64 = 1e-6;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 1000,
        }
    }
}

fn quantise(degrees: f64) -> i64 {
    (degrees / KEY_RESOLUTION_DEG).round() as i64
}

fn route_key(from: LonLat, to: LonLat) -> RouteKey {
    (
        quantise(from.lon),
        quantise(from.lat),
        quantise(to.lon),
        quantise(to.lat),
    )
}

/// Routing client with caching.
///
/// Wraps a route provider (the live `RoutingClient` by default) and caches
/// its successful responses.
pub struct CachedRoutingClient<P = RoutingClient> {
    client: P,
    routes: MokaCache<RouteKey, RouteEntry>,
}

impl<P: RouteProvider> CachedRoutingClient<P> {
    /// Create a new cached client.
    pub fn new(client: P, config: &CacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { client, routes }
    }

    /// Get routes between two points, using the cache if available.
    pub async fn get_routes(&self, from: LonLat, to: LonLat) -> Result<RouteEntry, RoutingError> {
        let key = route_key(from, to);

        if let Some(cached) = self.routes.get(&key).await {
            trace!(?from, ?to, "Routing cache hit");
            return Ok(cached);
        }

        let entry = Arc::new(self.client.find_routes(from, to).await?);
        self.routes.insert(key, entry.clone()).await;

        Ok(entry)
    }

    /// Access the underlying client for operations that bypass cache.
    pub fn client(&self) -> &P {
        &self.client
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.routes.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.routes.invalidate_all();
    }
}

impl<P: RouteProvider + Send + Sync> RouteProvider for CachedRoutingClient<P> {
    async fn find_routes(
        &self,
        from: LonLat,
        to: LonLat,
    ) -> Result<Vec<RouteCandidate>, RoutingError> {
        let entry = self.get_routes(from, to).await?;
        Ok(entry.as_ref().clone())
    }
}
