//! Health check handler.

use axum::{Json, extract::State};

use crate::error::Result;
use crate::state::AppState;
use crate::types::HealthResponse;

/// GET /health - Liveness with entity counts.
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    let stats = state.directory.stats()?;
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        buildings: stats.buildings,
        activities: stats.activities,
        organizations: stats.organizations,
        phones: stats.phones,
    }))
}
