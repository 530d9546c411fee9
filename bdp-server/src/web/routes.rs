//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::check::{BdpChecker, CheckError, CheckSession};
use crate::network::MemoryNetwork;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/check", post(check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Run a BDP check over the road network sent with the request.
async fn check(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: CheckRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "Invalid check request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let network = MemoryNetwork::from_snapshot(req.network).map_err(|e| AppError::BadRequest {
        message: format!("Invalid road network: {e}"),
    })?;

    let mut session = CheckSession::new();
    if let Some(segment) = req.last_clicked {
        session.on_path_select(segment);
    }

    let checker = BdpChecker::new(
        &network,
        state.routing.clone(),
        state.config.as_ref().clone(),
    );
    let outcome = checker
        .check(&mut session, &req.selection, req.method)
        .await?;

    Ok(Json(CheckResponse::from_outcome(outcome)).into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    /// The selection was understood but the check refused it.
    Unprocessable { message: String },
}

impl From<CheckError> for AppError {
    fn from(e: CheckError) -> Self {
        AppError::Unprocessable {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
        };

        warn!(%status, %message, "Request rejected");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
