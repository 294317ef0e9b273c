//! Account Model
//!
//! A registered user: identity, role, approval status and optional
//! profile attributes. The password hash never appears here; it lives
//! only in the server's credential store.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Account role. Exactly one per account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Hr,
    #[default]
    Employee,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Hr, Role::Employee];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Hr => "hr",
            Self::Employee => "employee",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "hr" => Some(Self::Hr),
            "employee" => Some(Self::Employee),
            _ => None,
        }
    }
}

super::text_enum!(Role, "role");

/// Approval workflow state.
///
/// `Pending` is set at registration. `Approved` and `Rejected` are
/// decisions; nothing moves an account back to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Parse an HR decision. Only `approved` and `rejected` are valid outcomes.
    pub fn parse_decision(s: &str) -> Option<Self> {
        Self::parse_str(s).filter(|status| status.is_decision())
    }

    pub fn is_decision(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Can an account in this state receive a token?
    pub fn can_login(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

super::text_enum!(ApprovalStatus, "approval status");

/// Optional descriptive fields captured at registration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_joining: Option<String>,
    /// Department reference (free-form)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Designation reference (free-form)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pf_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub esi_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ifsc_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

/// Account as returned by the API (no secret)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Account {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub status: ApprovalStatus,
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(json))]
    pub profile: AccountProfile,
    pub created_at: i64,
}

/// Registration payload
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[serde(alias = "fullName")]
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    /// Requested role; defaults to `employee`
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(flatten)]
    pub profile: AccountProfile,
}

impl RegisterRequest {
    /// Trim surrounding whitespace from identity fields before validation.
    /// The password is left untouched.
    pub fn normalized(mut self) -> Self {
        self.email = self.email.trim().to_string();
        self.full_name = self.full_name.trim().to_string();
        self
    }
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("full_name", &self.full_name)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}
