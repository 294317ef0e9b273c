//! Server-side gate
//!
//! Two route-level middlewares, applied to every endpoint:
//!
//! 1. [`require_auth`] verifies the bearer token (except on public
//!    endpoints) and injects [`Identity`] into the request extensions.
//! 2. [`enforce_policy`] looks the matched route up in
//!    [`crate::api::ENDPOINTS`] and checks the caller's role against the
//!    shared policy table.
//!
//! | condition | status |
//! |-----------|--------|
//! | no / unverifiable token | 401 |
//! | role not in the allowed set | 403 |
//! | route missing from the endpoint table | 403 |
//!
//! The role comes from the token on every request; no decision is cached.

use axum::{
    extract::{FromRequestParts, MatchedPath, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use http::Method;
use shared::error::AppError;
use shared::policy::{self, Action, Resource};

use super::token::Identity;
use crate::security_log;
use crate::state::AppState;

/// What an endpoint requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Any verified token
    Authenticated,
    /// Verified token whose role passes the policy table
    Policy(Resource, Action),
}

/// Access rule for the matched route, or `None` when the route is unlisted
fn endpoint_access(req: &Request) -> Option<Access> {
    let path = req.extensions().get::<MatchedPath>()?.as_str();
    let method = if req.method() == Method::HEAD {
        &Method::GET
    } else {
        req.method()
    };
    crate::api::access_for(method, path)
}

/// Authentication middleware
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if endpoint_access(&req) == Some(Access::Public) {
        return Ok(next.run(req).await);
    }

    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    match state.tokens.verify_header(header) {
        Ok(identity) => {
            req.extensions_mut().insert(identity);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = e.to_string(),
                uri = req.uri().path().to_string()
            );
            Err(e.into())
        }
    }
}

/// Role-policy middleware; runs after [`require_auth`]
pub async fn enforce_policy(req: Request, next: Next) -> Result<Response, AppError> {
    let access = endpoint_access(&req);
    if access == Some(Access::Public) {
        return Ok(next.run(req).await);
    }

    let identity = req
        .extensions()
        .get::<Identity>()
        .ok_or_else(AppError::not_authenticated)?;

    let allowed = match access {
        Some(Access::Authenticated) => true,
        Some(Access::Policy(resource, action)) => policy::allows(identity.role, resource, action),
        Some(Access::Public) | None => false,
    };

    if !allowed {
        security_log!(
            "WARN",
            "permission_denied",
            account_id = identity.account_id.clone(),
            role = identity.role.as_str(),
            method = req.method().to_string(),
            uri = req.uri().path().to_string()
        );
        return Err(AppError::permission_denied("Insufficient role for this resource"));
    }

    Ok(next.run(req).await)
}

/// Handlers behind the gate can take `Identity` directly.
impl<S: Send + Sync> FromRequestParts<S> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .ok_or_else(AppError::not_authenticated)
    }
}
