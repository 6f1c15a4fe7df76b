//! Building handlers.

use axum::{Json, extract::State};

use crate::error::Result;
use crate::state::AppState;
use crate::types::BuildingResponse;

/// GET /buildings - Every building of the directory.
pub async fn list_buildings(State(state): State<AppState>) -> Result<Json<Vec<BuildingResponse>>> {
    let catalog = state.directory.catalog()?;
    Ok(Json(
        catalog.buildings().iter().map(BuildingResponse::from).collect(),
    ))
}
