//! Registration, login and the caller's own account

use axum::{Json, Router, extract::State, http::StatusCode, middleware, routing::{get, post}};
use shared::client::{LoginRequest, LoginResponse, RegisterResponse};
use shared::models::{Account, RegisterRequest};

use super::extract::JsonBody;
use crate::approval;
use crate::auth::Identity;
use crate::auth::rate_limit::{login_rate_limit, register_rate_limit};
use crate::error::ServiceResult;
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    let register_routes = Router::new()
        .route("/register", post(register))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            register_rate_limit,
        ));

    let login_routes = Router::new()
        .route("/login", post(login))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            login_rate_limit,
        ));

    Router::new()
        .route("/me", get(me))
        .merge(register_routes)
        .merge(login_routes)
}

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> ServiceResult<(StatusCode, Json<RegisterResponse>)> {
    let account = approval::register(state.stores.accounts.as_ref(), payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Registration submitted for HR approval".to_string(),
            id: account.id,
        }),
    ))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> ServiceResult<Json<LoginResponse>> {
    let token = approval::login(
        state.stores.accounts.as_ref(),
        &state.tokens,
        &payload.email,
        &payload.password,
        state.config.uniform_login_errors,
    )
    .await?;
    Ok(Json(LoginResponse { token }))
}

/// GET /me
pub async fn me(State(state): State<AppState>, identity: Identity) -> ServiceResult<Json<Account>> {
    let account = approval::me(state.stores.accounts.as_ref(), &identity).await?;
    Ok(Json(account))
}
