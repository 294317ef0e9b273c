//! Designation Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{RecordStatus, non_empty, trimmed, trimmed_opt};

/// Designation entity
///
/// `department_code` is a reference by code, not ownership: deleting the
/// department leaves the designation in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Designation {
    pub id: i64,
    /// Human-assigned code, unique (e.g. `DES001`)
    pub designation_code: String,
    pub designation_name: String,
    pub department_code: String,
    /// Grade level (L1, L2, L3, Manager, ...)
    pub level: Option<String>,
    pub description: Option<String>,
    pub status: RecordStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create designation payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DesignationCreate {
    #[validate(length(min = 1, message = "Designation code is required"))]
    pub designation_code: String,
    #[validate(length(min = 1, message = "Designation name is required"))]
    pub designation_name: String,
    #[validate(length(min = 1, message = "Department is required"))]
    pub department_code: String,
    pub level: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub status: RecordStatus,
}

impl DesignationCreate {
    pub fn normalized(self) -> Self {
        Self {
            designation_code: trimmed(self.designation_code),
            designation_name: trimmed(self.designation_name),
            department_code: trimmed(self.department_code),
            level: non_empty(self.level),
            description: non_empty(self.description),
            status: self.status,
        }
    }
}

/// Update designation payload. The code is immutable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct DesignationUpdate {
    #[validate(length(min = 1, message = "Designation name cannot be empty"))]
    pub designation_name: Option<String>,
    #[validate(length(min = 1, message = "Department cannot be empty"))]
    pub department_code: Option<String>,
    pub level: Option<String>,
    pub description: Option<String>,
    pub status: Option<RecordStatus>,
}

impl DesignationUpdate {
    pub fn normalized(self) -> Self {
        Self {
            designation_name: trimmed_opt(self.designation_name),
            department_code: trimmed_opt(self.department_code),
            level: non_empty(self.level),
            description: non_empty(self.description),
            status: self.status,
        }
    }
}
