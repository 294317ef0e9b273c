//! Company API handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use shared::client::DeleteResponse;
use shared::error::ErrorCode;
use shared::models::{Company, CompanyCreate, CompanyUpdate};
use validator::Validate;

use crate::api::ResourceErrors;
use crate::api::extract::{JsonBody, PathParam};
use crate::auth::Identity;
use crate::error::ServiceResult;
use crate::state::AppState;

const ERRORS: ResourceErrors = ResourceErrors {
    not_found: ErrorCode::CompanyNotFound,
    duplicate: ErrorCode::CompanyCodeExists,
    invalid: ErrorCode::ValidationFailed,
};

/// GET /companies
pub async fn list(State(state): State<AppState>) -> ServiceResult<Json<Vec<Company>>> {
    let companies = state.stores.companies.list().await?;
    Ok(Json(companies))
}

/// GET /companies/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> ServiceResult<Json<Company>> {
    let company = state
        .stores
        .companies
        .find(id)
        .await?
        .ok_or_else(|| ERRORS.missing())?;
    Ok(Json(company))
}

/// POST /companies
pub async fn create(
    State(state): State<AppState>,
    identity: Identity,
    JsonBody(payload): JsonBody<CompanyCreate>,
) -> ServiceResult<(StatusCode, Json<Company>)> {
    let mut payload = payload.normalized();
    payload.validate()?;
    payload.created_by = Some(identity.account_id);

    let company = state
        .stores
        .companies
        .create(payload)
        .await
        .map_err(|e| ERRORS.map(e))?;
    tracing::info!(id = company.id, code = %company.company_code, "Company created");
    Ok((StatusCode::CREATED, Json(company)))
}

/// PUT /companies/{id}
pub async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    JsonBody(payload): JsonBody<CompanyUpdate>,
) -> ServiceResult<Json<Company>> {
    let payload = payload.normalized();
    payload.validate()?;

    let company = state
        .stores
        .companies
        .update(id, payload)
        .await
        .map_err(|e| ERRORS.map(e))?
        .ok_or_else(|| ERRORS.missing())?;
    Ok(Json(company))
}

/// PATCH /companies/{id}/status
pub async fn toggle_status(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> ServiceResult<Json<Company>> {
    let company = state
        .stores
        .companies
        .toggle_status(id)
        .await
        .map_err(|e| ERRORS.map(e))?
        .ok_or_else(|| ERRORS.missing())?;
    Ok(Json(company))
}

/// DELETE /companies/{id}
pub async fn delete(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> ServiceResult<Json<DeleteResponse>> {
    if !state.stores.companies.delete(id).await? {
        return Err(ERRORS.missing());
    }
    tracing::info!(id, "Company deleted");
    Ok(Json(DeleteResponse { deleted: true }))
}
