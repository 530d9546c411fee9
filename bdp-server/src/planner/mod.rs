//! Direct route searches.
//!
//! This module answers the question at the heart of a BDP check: "is there
//! a direct route between the two bracketing segments?" Two searches are
//! offered:
//!
//! - [`find_direct_route`]: a bounded depth-first search over the loaded
//!   road network, returning the first admissible route it meets.
//! - [`find_remote_routes`]: routes proposed by the historical routing
//!   service, filtered with the same continuity rules.

mod config;
mod direct;
mod remote;
mod route;

pub use config::CheckConfig;
pub use direct::{
    DirectRouteRequest, DirectSearchResult, find_direct_route, find_direct_route_from_any,
};
pub use remote::{OfflineProvider, RouteProvider, find_remote_routes};
pub use route::Route;
