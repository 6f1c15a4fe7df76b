//! Activity handlers.

use axum::{Json, extract::State};
use orgdir::TreeNode;

use crate::error::Result;
use crate::state::AppState;

/// GET /activities/tree - The whole activity forest.
pub async fn activity_tree(State(state): State<AppState>) -> Result<Json<Vec<TreeNode>>> {
    Ok(Json(state.directory.activity_tree()?))
}
