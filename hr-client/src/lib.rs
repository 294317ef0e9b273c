//! HR Client - typed client for the HR server
//!
//! - [`HrClient`]: one typed call per server endpoint
//! - [`SessionContext`]: the token and the identity derived from it
//! - [`RouteGuard`]: advisory screen check over the shared role policy
//! - [`dashboard`]: summary figures with a fallback for the count endpoint

pub mod config;
pub mod dashboard;
pub mod error;
pub mod guard;
pub mod http;
pub mod session;
pub mod storage;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use guard::{GuardDecision, RouteGuard};
pub use http::HrClient;
pub use session::{SessionContext, SessionIdentity};
pub use storage::TokenStorage;

// Re-export shared types for convenience
pub use shared::client::{EmployeeCount, LoginResponse, RegisterResponse};
pub use shared::policy::ClientRoute;
