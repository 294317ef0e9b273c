//! HTTP API
//!
//! - [`health`]: liveness probe (public)
//! - [`auth`]: register / login (public), `/me`
//! - [`approval`]: pending accounts and decisions
//! - [`departments`], [`designations`], [`companies`], [`employees`]:
//!   uniform CRUD + status toggle
//!
//! Every route must appear in [`ENDPOINTS`]; the gate denies anything
//! that is routed but not listed.

pub mod approval;
pub mod auth;
pub mod companies;
pub mod departments;
pub mod designations;
pub mod employees;
pub mod extract;
pub mod health;

use axum::Router;
use axum::middleware;
use http::{HeaderName, HeaderValue, Method};
use shared::error::{AppError, ErrorCode};
use shared::policy::{Action, Resource};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::gate::{Access, enforce_policy, require_auth};
use crate::db::StoreError;
use crate::error::ServiceError;
use crate::state::AppState;

/// One routed endpoint and what it requires
#[derive(Debug, Clone, Copy)]
pub struct Endpoint {
    pub method: &'static str,
    /// Route template as registered with the router
    pub path: &'static str,
    pub access: Access,
}

const fn endpoint(method: &'static str, path: &'static str, access: Access) -> Endpoint {
    Endpoint {
        method,
        path,
        access,
    }
}

const fn read(resource: Resource) -> Access {
    Access::Policy(resource, Action::Read)
}

const fn mutate(resource: Resource) -> Access {
    Access::Policy(resource, Action::Mutate)
}

pub const ENDPOINTS: &[Endpoint] = &[
    endpoint("GET", "/health", Access::Public),
    endpoint("POST", "/register", Access::Public),
    endpoint("POST", "/login", Access::Public),
    endpoint("GET", "/me", Access::Authenticated),
    // Approval workflow
    endpoint("GET", "/pending", read(Resource::PendingAccounts)),
    endpoint("PATCH", "/user/{id}/status", mutate(Resource::PendingAccounts)),
    // Departments
    endpoint("GET", "/departments", read(Resource::Departments)),
    endpoint("POST", "/departments", mutate(Resource::Departments)),
    endpoint("GET", "/departments/{id}", read(Resource::Departments)),
    endpoint("PUT", "/departments/{id}", mutate(Resource::Departments)),
    endpoint("DELETE", "/departments/{id}", mutate(Resource::Departments)),
    endpoint("PATCH", "/departments/{id}/status", mutate(Resource::Departments)),
    // Designations
    endpoint("GET", "/designations", read(Resource::Designations)),
    endpoint("POST", "/designations", mutate(Resource::Designations)),
    endpoint("GET", "/designations/{id}", read(Resource::Designations)),
    endpoint("PUT", "/designations/{id}", mutate(Resource::Designations)),
    endpoint("DELETE", "/designations/{id}", mutate(Resource::Designations)),
    endpoint("PATCH", "/designations/{id}/status", mutate(Resource::Designations)),
    // Companies
    endpoint("GET", "/companies", read(Resource::Companies)),
    endpoint("POST", "/companies", mutate(Resource::Companies)),
    endpoint("GET", "/companies/{id}", read(Resource::Companies)),
    endpoint("PUT", "/companies/{id}", mutate(Resource::Companies)),
    endpoint("DELETE", "/companies/{id}", mutate(Resource::Companies)),
    endpoint("PATCH", "/companies/{id}/status", mutate(Resource::Companies)),
    // Employees
    endpoint("GET", "/employees", read(Resource::Employees)),
    endpoint("POST", "/employees", mutate(Resource::Employees)),
    endpoint("GET", "/employees/count", read(Resource::Employees)),
    endpoint("GET", "/employee/{id}", read(Resource::Employees)),
    endpoint("PUT", "/employee/{id}", mutate(Resource::Employees)),
    endpoint("DELETE", "/employee/{id}", mutate(Resource::Employees)),
    endpoint("PATCH", "/employee/{id}/status", mutate(Resource::Employees)),
];

/// Access rule for a route template, `None` when unlisted
pub fn access_for(method: &Method, path: &str) -> Option<Access> {
    ENDPOINTS
        .iter()
        .find(|e| e.method == method.as_str() && e.path == path)
        .map(|e| e.access)
}

/// Error codes a resource reports for missing rows, taken keys and
/// rejected state changes
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResourceErrors {
    pub not_found: ErrorCode,
    pub duplicate: ErrorCode,
    pub invalid: ErrorCode,
}

impl ResourceErrors {
    pub(crate) fn missing(&self) -> ServiceError {
        AppError::new(self.not_found).into()
    }

    pub(crate) fn map(&self, err: StoreError) -> ServiceError {
        match err {
            StoreError::NotFound(_) => self.missing(),
            StoreError::Duplicate(field) => {
                AppError::new(self.duplicate).with_detail("field", field).into()
            }
            StoreError::Validation(msg) => AppError::with_message(self.invalid, msg).into(),
            other => other.into(),
        }
    }
}

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// All routes, no middleware
pub fn build_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router(state))
        .merge(approval::router())
        .merge(departments::router())
        .merge(designations::router())
        .merge(companies::router())
        .merge(employees::router())
}

/// Fully configured application: routes, gate, tower-http layers, state.
/// Used by the binary and by the in-process tests.
pub fn build_app(state: AppState) -> Router {
    build_router(&state)
        // ========== Gate ==========
        // Runs only for matched routes; require_auth wraps enforce_policy
        .route_layer(middleware::from_fn(enforce_policy))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        // ========== Tower HTTP Middleware ==========
        .layer(cors_layer(&state.config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_table_has_no_duplicates() {
        for (i, a) in ENDPOINTS.iter().enumerate() {
            for b in &ENDPOINTS[i + 1..] {
                assert!(
                    !(a.method == b.method && a.path == b.path),
                    "duplicate endpoint {} {}",
                    a.method,
                    a.path
                );
            }
        }
    }

    #[test]
    fn test_only_entry_points_are_public() {
        let public: Vec<&str> = ENDPOINTS
            .iter()
            .filter(|e| e.access == Access::Public)
            .map(|e| e.path)
            .collect();
        assert_eq!(public, ["/health", "/register", "/login"]);
    }

    #[test]
    fn test_mutations_are_policy_gated() {
        for e in ENDPOINTS.iter().filter(|e| e.method != "GET" && e.access != Access::Public) {
            assert!(
                matches!(e.access, Access::Policy(_, Action::Mutate)),
                "{} {} must require mutate rights",
                e.method,
                e.path
            );
        }
    }

    #[test]
    fn test_unlisted_route_has_no_access() {
        assert_eq!(access_for(&Method::DELETE, "/me"), None);
        assert_eq!(access_for(&Method::GET, "/nowhere"), None);
        assert_eq!(
            access_for(&Method::PATCH, "/departments/{id}/status"),
            Some(Access::Policy(Resource::Departments, Action::Mutate))
        );
    }
}
