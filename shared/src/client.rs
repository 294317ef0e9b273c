//! Request/response types shared between server and client
//!
//! These types are the JSON bodies of the HR API.

use serde::{Deserialize, Serialize};

use crate::models::Role;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Registration response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub id: String,
}

/// Approve/reject decision. Kept as a raw string so out-of-set values are
/// reported as `InvalidStatus` rather than a generic decode failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRequest {
    pub status: String,
}

// =============================================================================
// Token payload
// =============================================================================

/// Claims carried by the identity token.
///
/// Readable by anyone holding the token; never carries the password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Account id
    pub sub: String,
    pub email: String,
    pub role: Role,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Issued at (Unix timestamp seconds)
    pub iat: i64,
    /// Expiration (Unix timestamp seconds)
    pub exp: i64,
}

// =============================================================================
// Resource DTOs
// =============================================================================

/// Delete response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

/// Employee head-count, served by the convenience count endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeCount {
    pub total: u64,
    pub active: u64,
    pub onboarding: u64,
}

/// Optional filter for the designation list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DesignationFilter {
    pub department: Option<String>,
}
