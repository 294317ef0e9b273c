//! Department API handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use shared::client::DeleteResponse;
use shared::error::ErrorCode;
use shared::models::{Department, DepartmentCreate, DepartmentUpdate};
use validator::Validate;

use crate::api::ResourceErrors;
use crate::api::extract::{JsonBody, PathParam};
use crate::error::ServiceResult;
use crate::state::AppState;

const ERRORS: ResourceErrors = ResourceErrors {
    not_found: ErrorCode::DepartmentNotFound,
    duplicate: ErrorCode::DepartmentCodeExists,
    invalid: ErrorCode::ValidationFailed,
};

/// GET /departments
pub async fn list(State(state): State<AppState>) -> ServiceResult<Json<Vec<Department>>> {
    let departments = state.stores.departments.list().await?;
    Ok(Json(departments))
}

/// GET /departments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> ServiceResult<Json<Department>> {
    let department = state
        .stores
        .departments
        .find(id)
        .await?
        .ok_or_else(|| ERRORS.missing())?;
    Ok(Json(department))
}

/// POST /departments
pub async fn create(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<DepartmentCreate>,
) -> ServiceResult<(StatusCode, Json<Department>)> {
    let payload = payload.normalized();
    payload.validate()?;

    let department = state
        .stores
        .departments
        .create(payload)
        .await
        .map_err(|e| ERRORS.map(e))?;
    tracing::info!(id = department.id, code = %department.department_code, "Department created");
    Ok((StatusCode::CREATED, Json(department)))
}

/// PUT /departments/{id}
pub async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    JsonBody(payload): JsonBody<DepartmentUpdate>,
) -> ServiceResult<Json<Department>> {
    let payload = payload.normalized();
    payload.validate()?;

    let department = state
        .stores
        .departments
        .update(id, payload)
        .await
        .map_err(|e| ERRORS.map(e))?
        .ok_or_else(|| ERRORS.missing())?;
    Ok(Json(department))
}

/// PATCH /departments/{id}/status
pub async fn toggle_status(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> ServiceResult<Json<Department>> {
    let department = state
        .stores
        .departments
        .toggle_status(id)
        .await
        .map_err(|e| ERRORS.map(e))?
        .ok_or_else(|| ERRORS.missing())?;
    Ok(Json(department))
}

/// DELETE /departments/{id}
///
/// Designations referencing the code are left in place.
pub async fn delete(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> ServiceResult<Json<DeleteResponse>> {
    if !state.stores.departments.delete(id).await? {
        return Err(ERRORS.missing());
    }
    tracing::info!(id, "Department deleted");
    Ok(Json(DeleteResponse { deleted: true }))
}
