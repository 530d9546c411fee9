//! Remote route search through the historical routing service.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, warn};

use super::route::Route;
use crate::continuity::{name_continuity, road_type_group_continuity};
use crate::domain::{LonLat, Segment};
use crate::network::RoadNetwork;
use crate::routing::{RouteCandidate, RoutingError};

/// Source of candidate routes between two points.
///
/// This abstraction allows the remote search to be tested without the
/// live routing service.
pub trait RouteProvider {
    /// Propose routes from `from` to `to`, best first.
    fn find_routes(
        &self,
        from: LonLat,
        to: LonLat,
    ) -> impl Future<Output = Result<Vec<RouteCandidate>, RoutingError>> + Send;
}

impl<P: RouteProvider + Sync + ?Sized> RouteProvider for &P {
    fn find_routes(
        &self,
        from: LonLat,
        to: LonLat,
    ) -> impl Future<Output = Result<Vec<RouteCandidate>, RoutingError>> + Send {
        (**self).find_routes(from, to)
    }
}

impl<P: RouteProvider + Send + Sync + ?Sized> RouteProvider for Arc<P> {
    fn find_routes(
        &self,
        from: LonLat,
        to: LonLat,
    ) -> impl Future<Output = Result<Vec<RouteCandidate>, RoutingError>> + Send {
        (**self).find_routes(from, to)
    }
}

/// Provider used when no routing service is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineProvider;

impl RouteProvider for OfflineProvider {
    async fn find_routes(
        &self,
        _from: LonLat,
        _to: LonLat,
    ) -> Result<Vec<RouteCandidate>, RoutingError> {
        Err(RoutingError::NotConfigured(
            "no routing service configured".to_string(),
        ))
    }
}

/// Ask the routing service for routes between the bracket centres and keep
/// those that qualify as direct routes.
///
/// A route qualifies when the whole route keeps name and road type group
/// continuity and its length between the brackets is under `max_length`.
/// Routes are returned in the order the service proposed them. Service
/// failures are logged and yield no routes.
pub async fn find_remote_routes<N, P>(
    network: &N,
    provider: &P,
    start: &Segment,
    end: &Segment,
    max_length: f64,
) -> Vec<Route>
where
    N: RoadNetwork + ?Sized,
    P: RouteProvider + ?Sized,
{
    let candidates = match provider.find_routes(start.center, end.center).await {
        Ok(candidates) => candidates,
        Err(e) => {
            warn!(
                start = %start.id,
                end = %end.id,
                error = %e,
                "Route request failed"
            );
            return Vec::new();
        }
    };

    let proposed = candidates.len();
    let routes: Vec<Route> = candidates
        .iter()
        .filter_map(|candidate| qualify(network, candidate, max_length))
        .collect();

    debug!(
        start = %start.id,
        end = %end.id,
        proposed,
        qualified = routes.len(),
        "Remote routes filtered"
    );
    routes
}

/// Check one proposed route against the direct route rules.
fn qualify<N: RoadNetwork + ?Sized>(
    network: &N,
    candidate: &RouteCandidate,
    max_length: f64,
) -> Option<Route> {
    let ids = candidate.segment_ids();

    let segments: Option<Vec<&Segment>> = ids.iter().map(|id| network.segment(*id)).collect();
    let Some(segments) = segments else {
        debug!(
            segments = ids.len(),
            "Discarding route through segments not in the network"
        );
        return None;
    };

    let qualifies = name_continuity(network, &segments)
        && road_type_group_continuity(&segments)
        && candidate.interior_length() < max_length;

    qualifies.then(|| Route::new(ids))
}
