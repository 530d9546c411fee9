//! Routing client error types.

/// Errors from the historical routing service client.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Rate limited by the routing service
    #[error("rate limited by routing service")]
    RateLimited,

    /// Service returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// The response carried an `error` field
    #[error("routing service error: {0}")]
    Service(String),

    /// Remote routing not configured or not available
    #[error("not configured: {0}")]
    NotConfigured(String),
}
