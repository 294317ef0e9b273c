//! Unified error codes for the HR service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Account / approval errors
//! - 4xxx: Organization errors
//! - 5xxx: Employee errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values on the wire so the client
/// can branch on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Too many requests from this client
    TooManyRequests = 6,

    // ==================== 1xxx: Auth ====================
    /// No token presented
    NotAuthenticated = 1001,
    /// Email/password pair rejected
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is malformed or its signature does not verify
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Caller's role is not allowed to reach this resource
    PermissionDenied = 2001,

    // ==================== 3xxx: Account ====================
    /// No account matches
    AccountNotFound = 3001,
    /// Account exists but has not been approved
    AccountNotApproved = 3002,
    /// Email is already registered
    EmailAlreadyRegistered = 3003,
    /// Approval outcome outside {approved, rejected}
    InvalidStatus = 3004,

    // ==================== 4xxx: Organization ====================
    /// Department not found
    DepartmentNotFound = 4001,
    /// Department code already in use
    DepartmentCodeExists = 4002,
    /// Designation not found
    DesignationNotFound = 4101,
    /// Designation code already in use
    DesignationCodeExists = 4102,
    /// Company not found
    CompanyNotFound = 4201,
    /// Company code already in use
    CompanyCodeExists = 4202,

    // ==================== 5xxx: Employee ====================
    /// Employee not found
    EmployeeNotFound = 5001,
    /// Employee email already in use
    EmployeeEmailExists = 5002,
    /// Status cannot be toggled from its current value
    InvalidStatusTransition = 5003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default human-readable message for this code
    pub const fn message(&self) -> &'static str {
        match self {
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::TooManyRequests => "Too many requests, try again later",

            Self::NotAuthenticated => "Access denied. No token",
            Self::InvalidCredentials => "Invalid credentials",
            Self::TokenExpired => "Token has expired",
            Self::TokenInvalid => "Invalid token",

            Self::PermissionDenied => "Access denied",

            Self::AccountNotFound => "User not found",
            Self::AccountNotApproved => "Account not yet approved by HR",
            Self::EmailAlreadyRegistered => "User already exists",
            Self::InvalidStatus => "Invalid status",

            Self::DepartmentNotFound => "Department not found",
            Self::DepartmentCodeExists => "Department code already exists",
            Self::DesignationNotFound => "Designation not found",
            Self::DesignationCodeExists => "Designation code already exists",
            Self::CompanyNotFound => "Company not found",
            Self::CompanyCodeExists => "Company code already exists",

            Self::EmployeeNotFound => "Employee not found",
            Self::EmployeeEmailExists => "Employee email already exists",
            Self::InvalidStatusTransition => "Status cannot be toggled",

            Self::InternalError => "Server error",
            Self::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Self::ValidationFailed),
            3 => Ok(Self::NotFound),
            4 => Ok(Self::AlreadyExists),
            6 => Ok(Self::TooManyRequests),

            1001 => Ok(Self::NotAuthenticated),
            1002 => Ok(Self::InvalidCredentials),
            1003 => Ok(Self::TokenExpired),
            1004 => Ok(Self::TokenInvalid),

            2001 => Ok(Self::PermissionDenied),

            3001 => Ok(Self::AccountNotFound),
            3002 => Ok(Self::AccountNotApproved),
            3003 => Ok(Self::EmailAlreadyRegistered),
            3004 => Ok(Self::InvalidStatus),

            4001 => Ok(Self::DepartmentNotFound),
            4002 => Ok(Self::DepartmentCodeExists),
            4101 => Ok(Self::DesignationNotFound),
            4102 => Ok(Self::DesignationCodeExists),
            4201 => Ok(Self::CompanyNotFound),
            4202 => Ok(Self::CompanyCodeExists),

            5001 => Ok(Self::EmployeeNotFound),
            5002 => Ok(Self::EmployeeEmailExists),
            5003 => Ok(Self::InvalidStatusTransition),

            9001 => Ok(Self::InternalError),
            9002 => Ok(Self::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);
        assert_eq!(ErrorCode::AccountNotApproved.code(), 3002);
        assert_eq!(ErrorCode::DepartmentNotFound.code(), 4001);
        assert_eq!(ErrorCode::EmployeeNotFound.code(), 5001);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(3003), Ok(ErrorCode::EmailAlreadyRegistered));
        assert_eq!(ErrorCode::try_from(1003), Ok(ErrorCode::TokenExpired));
        assert_eq!(ErrorCode::try_from(4202), Ok(ErrorCode::CompanyCodeExists));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(7777), Err(InvalidErrorCode(7777)));
        assert_eq!(InvalidErrorCode(7777).to_string(), "invalid error code: 7777");
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::AccountNotFound).unwrap();
        assert_eq!(json, "3001");

        let code: ErrorCode = serde_json::from_str("1002").unwrap();
        assert_eq!(code, ErrorCode::InvalidCredentials);

        assert!(serde_json::from_str::<ErrorCode>("65000").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::ValidationFailed.to_string(), "E0002");
        assert_eq!(ErrorCode::InvalidStatus.to_string(), "E3004");
    }

    #[test]
    fn test_messages_match_user_facing_wording() {
        assert_eq!(ErrorCode::AccountNotFound.message(), "User not found");
        assert_eq!(
            ErrorCode::AccountNotApproved.message(),
            "Account not yet approved by HR"
        );
        assert_eq!(ErrorCode::InvalidCredentials.message(), "Invalid credentials");
        assert_eq!(ErrorCode::EmailAlreadyRegistered.message(), "User already exists");
        assert_eq!(ErrorCode::InternalError.message(), "Server error");
    }
}
