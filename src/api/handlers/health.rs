use crate::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
}

/// Liveness plus a store round-trip. Always 200; a broken store is reported
/// in the body.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match state.flows.store().ping().await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::error!(error = %e, "database health check failed");
            "disconnected"
        }
    };

    Json(HealthResponse {
        status: "ok",
        database,
        version: env!("CARGO_PKG_VERSION"),
    })
}
