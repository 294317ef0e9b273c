//! Employee API handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use shared::client::{DeleteResponse, EmployeeCount};
use shared::error::ErrorCode;
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate};
use validator::Validate;

use crate::api::ResourceErrors;
use crate::api::extract::{JsonBody, PathParam};
use crate::error::ServiceResult;
use crate::state::AppState;

const ERRORS: ResourceErrors = ResourceErrors {
    not_found: ErrorCode::EmployeeNotFound,
    duplicate: ErrorCode::EmployeeEmailExists,
    invalid: ErrorCode::InvalidStatusTransition,
};

/// GET /employees
pub async fn list(State(state): State<AppState>) -> ServiceResult<Json<Vec<Employee>>> {
    let employees = state.stores.employees.list().await?;
    Ok(Json(employees))
}

/// GET /employees/count
pub async fn count(State(state): State<AppState>) -> ServiceResult<Json<EmployeeCount>> {
    let count = state.stores.employees.count().await?;
    Ok(Json(count))
}

/// GET /employee/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> ServiceResult<Json<Employee>> {
    let employee = state
        .stores
        .employees
        .find(id)
        .await?
        .ok_or_else(|| ERRORS.missing())?;
    Ok(Json(employee))
}

/// POST /employees
pub async fn create(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<EmployeeCreate>,
) -> ServiceResult<(StatusCode, Json<Employee>)> {
    let payload = payload.normalized();
    payload.validate()?;

    let employee = state
        .stores
        .employees
        .create(payload)
        .await
        .map_err(|e| ERRORS.map(e))?;
    tracing::info!(id = employee.id, "Employee created");
    Ok((StatusCode::CREATED, Json(employee)))
}

/// PUT /employee/{id}
pub async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    JsonBody(payload): JsonBody<EmployeeUpdate>,
) -> ServiceResult<Json<Employee>> {
    let payload = payload.normalized();
    payload.validate()?;

    let employee = state
        .stores
        .employees
        .update(id, payload)
        .await
        .map_err(|e| ERRORS.map(e))?
        .ok_or_else(|| ERRORS.missing())?;
    Ok(Json(employee))
}

/// PATCH /employee/{id}/status
///
/// Flips active/inactive; onboarding and resigned employees are rejected
/// with `InvalidStatusTransition`.
pub async fn toggle_status(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> ServiceResult<Json<Employee>> {
    let employee = state
        .stores
        .employees
        .toggle_status(id)
        .await
        .map_err(|e| ERRORS.map(e))?
        .ok_or_else(|| ERRORS.missing())?;
    Ok(Json(employee))
}

/// DELETE /employee/{id}
pub async fn delete(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> ServiceResult<Json<DeleteResponse>> {
    if !state.stores.employees.delete(id).await? {
        return Err(ERRORS.missing());
    }
    tracing::info!(id, "Employee deleted");
    Ok(Json(DeleteResponse { deleted: true }))
}
