//! Historical routing HTTP client.
//!
//! Asks the routing service for up to `paths` routes between two points,
//! using historic travel times.

use std::str::FromStr;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::LonLat;
use crate::planner::RouteProvider;

use super::convert::{RouteCandidate, parse_routing_body};
use super::error::RoutingError;

/// Default host of the routing service.
const DEFAULT_BASE_URL: &str = "https://www.waze.com";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 2;

/// Routing options sent with every request.
const DEFAULT_OPTIONS: &str =
    "AVOID_TOLL_ROADS:f,AVOID_PRIMARIES:f,AVOID_DANGEROUS_TURNS:f,AVOID_FERRIES:f,ALLOW_UTURNS:t";

/// Server-side routing timeout requested (milliseconds).
const SERVICE_TIMEOUT_MS: u32 = 60_000;

/// Which regional routing server to ask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoutingRegion {
    /// United States, Canada and their territories.
    #[default]
    NorthAmerica,
    Israel,
    RestOfWorld,
}

impl RoutingRegion {
    /// Request path of the region's routing endpoint.
    pub fn path(self) -> &'static str {
        match self {
            RoutingRegion::NorthAmerica => "/RoutingManager/routingRequest",
            RoutingRegion::Israel => "/il-RoutingManager/routingRequest",
            RoutingRegion::RestOfWorld => "/row-RoutingManager/routingRequest",
        }
    }
}

impl FromStr for RoutingRegion {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "na" | "usa" => Ok(RoutingRegion::NorthAmerica),
            "il" => Ok(RoutingRegion::Israel),
            "row" => Ok(RoutingRegion::RestOfWorld),
            other => Err(RoutingError::NotConfigured(format!(
                "unknown routing region '{other}' (expected na, il or row)"
            ))),
        }
    }
}

/// Configuration for the routing client.
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    /// Base URL of the routing service
    pub base_url: String,
    /// Regional server to use
    pub region: RoutingRegion,
    /// Number of alternative routes to ask for
    pub paths: u8,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Client version reported to the service
    pub client_version: String,
    /// Vehicle type to route for
    pub vehicle_type: String,
    /// Routing options string
    pub options: String,
}

impl RoutingConfig {
    /// Create a config for the given region with default settings.
    pub fn new(region: RoutingRegion) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            region,
            paths: 6,
            timeout_secs: 60,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            client_version: "4.0.0".to_string(),
            vehicle_type: "PRIVATE".to_string(),
            options: DEFAULT_OPTIONS.to_string(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the number of routes requested.
    pub fn with_paths(mut self, paths: u8) -> Self {
        self.paths = paths;
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Full URL of the routing endpoint.
    pub fn url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.region.path()
        )
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self::new(RoutingRegion::default())
    }
}

/// Format a coordinate the way the routing service expects.
fn point_param(point: LonLat) -> String {
    format!("x:{} y:{}", point.lon, point.lat)
}

/// Historical routing service client.
#[derive(Debug, Clone)]
pub struct RoutingClient {
    http: reqwest::Client,
    config: RoutingConfig,
    semaphore: Arc<Semaphore>,
}

impl RoutingClient {
    /// Create a new routing client with the given configuration.
    pub fn new(config: RoutingConfig) -> Result<Self, RoutingError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
            config,
        })
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Query parameters for a request between two points.
    fn query(&self, from: LonLat, to: LonLat) -> Vec<(&'static str, String)> {
        let config = &self.config;
        vec![
            ("from", point_param(from)),
            ("to", point_param(to)),
            ("returnJSON", "true".to_string()),
            ("returnGeometries", "true".to_string()),
            ("returnInstructions", "false".to_string()),
            ("timeout", SERVICE_TIMEOUT_MS.to_string()),
            ("type", "HISTORIC_TIME".to_string()),
            ("nPaths", config.paths.to_string()),
            ("clientVersion", config.client_version.clone()),
            ("vehType", config.vehicle_type.clone()),
            ("options", config.options.clone()),
        ]
    }

    /// Request routes between two points.
    ///
    /// Returns the primary route (when the service sent its geometry)
    /// followed by the alternatives, unfiltered.
    pub async fn routing_request(
        &self,
        from: LonLat,
        to: LonLat,
    ) -> Result<Vec<RouteCandidate>, RoutingError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| RoutingError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = self.config.url();
        debug!(%url, ?from, ?to, "Requesting routes");

        let response = self
            .http
            .get(&url)
            .query(&self.query(from, to))
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RoutingError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RoutingError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let routes = parse_routing_body(&body)?;
        debug!(routes = routes.len(), "Routing service answered");
        Ok(routes)
    }
}

impl RouteProvider for RoutingClient {
    async fn find_routes(
        &self,
        from: LonLat,
        to: LonLat,
    ) -> Result<Vec<RouteCandidate>, RoutingError> {
        self.routing_request(from, to).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = RoutingConfig::new(RoutingRegion::Israel)
            .with_base_url("http://localhost:8080/")
            .with_timeout(5)
            .with_paths(3)
            .with_max_concurrent(4);

        assert_eq!(config.base_url, "http://localhost:8080/");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.paths, 3);
        assert_eq!(config.max_concurrent, 4);
        assert_eq!(
            config.url(),
            "http://localhost:8080/il-RoutingManager/routingRequest"
        );
    }

    #[test]
    fn config_defaults() {
        let config = RoutingConfig::default();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.region, RoutingRegion::NorthAmerica);
        assert_eq!(config.paths, 6);
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.client_version, "4.0.0");
        assert_eq!(config.vehicle_type, "PRIVATE");
        assert_eq!(
            config.url(),
            "https://www.waze.com/RoutingManager/routingRequest"
        );
    }

    #[test]
    fn region_paths() {
        assert_eq!(
            RoutingRegion::NorthAmerica.path(),
            "/RoutingManager/routingRequest"
        );
        assert_eq!(
            RoutingRegion::RestOfWorld.path(),
            "/row-RoutingManager/routingRequest"
        );
    }

    #[test]
    fn region_from_str() {
        assert_eq!("na".parse::<RoutingRegion>().unwrap(), RoutingRegion::NorthAmerica);
        assert_eq!(" IL ".parse::<RoutingRegion>().unwrap(), RoutingRegion::Israel);
        assert_eq!("row".parse::<RoutingRegion>().unwrap(), RoutingRegion::RestOfWorld);
        assert!(matches!(
            "eu".parse::<RoutingRegion>(),
            Err(RoutingError::NotConfigured(_))
        ));
    }

    #[test]
    fn query_parameters() {
        let client = RoutingClient::new(RoutingConfig::default()).unwrap();
        let query = client.query(LonLat::new(-80.5, 26.25), LonLat::new(-80.0, 26.0));

        let get = |key: &str| {
            query
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("from"), Some("x:-80.5 y:26.25"));
        assert_eq!(get("to"), Some("x:-80 y:26"));
        assert_eq!(get("type"), Some("HISTORIC_TIME"));
        assert_eq!(get("nPaths"), Some("6"));
        assert_eq!(get("timeout"), Some("60000"));
        assert_eq!(get("returnInstructions"), Some("false"));
        assert_eq!(get("options"), Some(DEFAULT_OPTIONS));
    }

    #[tokio::test]
    async fn unreachable_service_is_an_http_error() {
        let config = RoutingConfig::default()
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(2);
        let client = RoutingClient::new(config).unwrap();

        let result = client
            .routing_request(LonLat::new(0.0, 0.0), LonLat::new(1.0, 1.0))
            .await;
        assert!(matches!(result, Err(RoutingError::Http(_))));
    }
}
