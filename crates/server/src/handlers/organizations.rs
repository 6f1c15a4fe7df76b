//! Organization handlers.
//!
//! Lookups by building, activity and id answer 404 when nothing matches;
//! region and name searches answer an empty list.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::error::{ApiError, Result};
use crate::state::AppState;
use crate::types::{NameSearchParams, OrganizationResponse, RadiusQuery, RectangleQuery};

/// GET /buildings/:id/organizations
pub async fn organizations_in_building(
    State(state): State<AppState>,
    Path(building_id): Path<i64>,
) -> Result<Json<Vec<OrganizationResponse>>> {
    let catalog = state.directory.catalog()?;
    let found = catalog.organizations_in_building(building_id);
    if found.is_empty() {
        return Err(ApiError::NotFound(
            "No organizations found in this building".to_string(),
        ));
    }
    Ok(Json(OrganizationResponse::list(found, &catalog)))
}

/// GET /activities/:id/organizations
pub async fn organizations_by_activity(
    State(state): State<AppState>,
    Path(activity_id): Path<i64>,
) -> Result<Json<Vec<OrganizationResponse>>> {
    let catalog = state.directory.catalog()?;
    let found = catalog.organizations_by_activity(activity_id);
    if found.is_empty() {
        return Err(ApiError::NotFound(
            "No organizations found for this activity".to_string(),
        ));
    }
    Ok(Json(OrganizationResponse::list(found, &catalog)))
}

/// GET /activities/:id/tree/organizations
pub async fn organizations_by_activity_tree(
    State(state): State<AppState>,
    Path(activity_id): Path<i64>,
) -> Result<Json<Vec<OrganizationResponse>>> {
    let catalog = state.directory.catalog()?;
    let found = catalog.organizations_by_activity_tree(activity_id);
    if found.is_empty() {
        return Err(ApiError::NotFound(
            "No organizations found in this activity tree".to_string(),
        ));
    }
    Ok(Json(OrganizationResponse::list(found, &catalog)))
}

/// POST /organizations/nearby/radius
pub async fn organizations_in_radius(
    State(state): State<AppState>,
    Json(query): Json<RadiusQuery>,
) -> Result<Json<Vec<OrganizationResponse>>> {
    let catalog = state.directory.catalog()?;
    let found = catalog.organizations_in_radius(&query);
    Ok(Json(OrganizationResponse::list(found, &catalog)))
}

/// POST /organizations/nearby/rectangle
pub async fn organizations_in_rectangle(
    State(state): State<AppState>,
    Json(query): Json<RectangleQuery>,
) -> Result<Json<Vec<OrganizationResponse>>> {
    let catalog = state.directory.catalog()?;
    let found = catalog.organizations_in_rectangle(&query);
    Ok(Json(OrganizationResponse::list(found, &catalog)))
}

/// GET /organizations/:id
pub async fn get_organization(
    State(state): State<AppState>,
    Path(organization_id): Path<i64>,
) -> Result<Json<OrganizationResponse>> {
    let catalog = state.directory.catalog()?;
    let record = catalog
        .organization(organization_id)
        .ok_or_else(|| ApiError::NotFound("Organization not found".to_string()))?;
    Ok(Json(OrganizationResponse::from_record(record, &catalog)))
}

/// GET /organizations/search/name?name=
pub async fn search_organizations_by_name(
    State(state): State<AppState>,
    Query(params): Query<NameSearchParams>,
) -> Result<Json<Vec<OrganizationResponse>>> {
    let max_len = state.directory.config().name_search_max_len;
    if params.name.chars().count() > max_len {
        return Err(ApiError::BadRequest(format!(
            "name must be at most {} characters",
            max_len
        )));
    }

    let catalog = state.directory.catalog()?;
    let found = catalog.search_by_name(&params.name);
    Ok(Json(OrganizationResponse::list(found, &catalog)))
}
