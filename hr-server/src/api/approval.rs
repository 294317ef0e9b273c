//! Pending accounts and the approve/reject decision

use axum::{
    Json, Router,
    extract::State,
    routing::{get, patch},
};
use shared::client::DecisionRequest;
use shared::models::Account;

use super::extract::{JsonBody, PathParam};
use crate::approval;
use crate::auth::Identity;
use crate::error::ServiceResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pending", get(list_pending))
        .route("/user/{id}/status", patch(decide))
}

/// GET /pending
pub async fn list_pending(State(state): State<AppState>) -> ServiceResult<Json<Vec<Account>>> {
    let accounts = approval::list_pending(state.stores.accounts.as_ref()).await?;
    Ok(Json(accounts))
}

/// PATCH /user/{id}/status
pub async fn decide(
    State(state): State<AppState>,
    identity: Identity,
    PathParam(id): PathParam<String>,
    JsonBody(payload): JsonBody<DecisionRequest>,
) -> ServiceResult<Json<Account>> {
    let account =
        approval::decide(state.stores.accounts.as_ref(), &identity, &id, &payload.status).await?;
    Ok(Json(account))
}
