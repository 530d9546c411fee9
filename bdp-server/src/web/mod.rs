//! Web layer for the BDP check service.
//!
//! Provides an HTTP endpoint that runs a check over a road network snapshot
//! sent by the client.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
