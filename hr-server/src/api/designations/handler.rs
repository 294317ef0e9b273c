//! Designation API handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use shared::client::{DeleteResponse, DesignationFilter};
use shared::error::ErrorCode;
use shared::models::{Designation, DesignationCreate, DesignationUpdate};
use validator::Validate;

use crate::api::ResourceErrors;
use crate::api::extract::{JsonBody, PathParam, QueryParams};
use crate::error::ServiceResult;
use crate::state::AppState;

const ERRORS: ResourceErrors = ResourceErrors {
    not_found: ErrorCode::DesignationNotFound,
    duplicate: ErrorCode::DesignationCodeExists,
    invalid: ErrorCode::ValidationFailed,
};

/// GET /designations?department=<code>
pub async fn list(
    State(state): State<AppState>,
    QueryParams(filter): QueryParams<DesignationFilter>,
) -> ServiceResult<Json<Vec<Designation>>> {
    let mut designations = state.stores.designations.list().await?;
    if let Some(department) = filter.department.as_deref().map(str::trim)
        && !department.is_empty()
    {
        designations.retain(|d| d.department_code == department);
    }
    Ok(Json(designations))
}

/// GET /designations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> ServiceResult<Json<Designation>> {
    let designation = state
        .stores
        .designations
        .find(id)
        .await?
        .ok_or_else(|| ERRORS.missing())?;
    Ok(Json(designation))
}

/// POST /designations
pub async fn create(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<DesignationCreate>,
) -> ServiceResult<(StatusCode, Json<Designation>)> {
    let payload = payload.normalized();
    payload.validate()?;

    let designation = state
        .stores
        .designations
        .create(payload)
        .await
        .map_err(|e| ERRORS.map(e))?;
    tracing::info!(id = designation.id, code = %designation.designation_code, "Designation created");
    Ok((StatusCode::CREATED, Json(designation)))
}

/// PUT /designations/{id}
pub async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    JsonBody(payload): JsonBody<DesignationUpdate>,
) -> ServiceResult<Json<Designation>> {
    let payload = payload.normalized();
    payload.validate()?;

    let designation = state
        .stores
        .designations
        .update(id, payload)
        .await
        .map_err(|e| ERRORS.map(e))?
        .ok_or_else(|| ERRORS.missing())?;
    Ok(Json(designation))
}

/// PATCH /designations/{id}/status
pub async fn toggle_status(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> ServiceResult<Json<Designation>> {
    let designation = state
        .stores
        .designations
        .toggle_status(id)
        .await
        .map_err(|e| ERRORS.map(e))?
        .ok_or_else(|| ERRORS.missing())?;
    Ok(Json(designation))
}

/// DELETE /designations/{id}
pub async fn delete(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> ServiceResult<Json<DeleteResponse>> {
    if !state.stores.designations.delete(id).await? {
        return Err(ERRORS.missing());
    }
    tracing::info!(id, "Designation deleted");
    Ok(Json(DeleteResponse { deleted: true }))
}
