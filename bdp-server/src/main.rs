use std::error::Error;
use std::net::SocketAddr;

use bdp_server::cache::{CacheConfig, CachedRoutingClient};
use bdp_server::planner::CheckConfig;
use bdp_server::routing::{RoutingClient, RoutingConfig, RoutingRegion};
use bdp_server::web::{AppState, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Routing service settings from environment
    let region = match std::env::var("ROUTING_REGION") {
        Ok(region) => region.parse()?,
        Err(_) => RoutingRegion::default(),
    };
    let mut routing_config = RoutingConfig::new(region);
    match std::env::var("ROUTING_BASE_URL") {
        Ok(url) => routing_config = routing_config.with_base_url(url),
        Err(_) => warn!(
            base_url = %routing_config.base_url,
            "ROUTING_BASE_URL not set, using default routing service"
        ),
    }

    let routing = RoutingClient::new(routing_config)?;
    let cached_routing = CachedRoutingClient::new(routing, &CacheConfig::default());

    let state = AppState::new(cached_routing, CheckConfig::default());
    let app = create_router(state);

    let addr: SocketAddr = std::env::var("BDP_BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()?;
    info!(%addr, ?region, "BDP check server listening");
    info!("  GET  /health  - Health check");
    info!("  POST /check   - Run a BDP check");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
