//! Department Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{RecordStatus, non_empty, trimmed, trimmed_opt};

/// Department entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Department {
    pub id: i64,
    /// Human-assigned code, unique (e.g. `DEPT001`)
    pub department_code: String,
    pub department_name: String,
    pub description: Option<String>,
    pub status: RecordStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create department payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DepartmentCreate {
    #[validate(length(min = 1, message = "Department code is required"))]
    pub department_code: String,
    #[validate(length(min = 1, message = "Department name is required"))]
    pub department_name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub status: RecordStatus,
}

impl DepartmentCreate {
    pub fn normalized(self) -> Self {
        Self {
            department_code: trimmed(self.department_code),
            department_name: trimmed(self.department_name),
            description: non_empty(self.description),
            status: self.status,
        }
    }
}

/// Update department payload. The code is immutable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct DepartmentUpdate {
    #[validate(length(min = 1, message = "Department name cannot be empty"))]
    pub department_name: Option<String>,
    pub description: Option<String>,
    pub status: Option<RecordStatus>,
}

impl DepartmentUpdate {
    pub fn normalized(self) -> Self {
        Self {
            department_name: trimmed_opt(self.department_name),
            description: non_empty(self.description),
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_update_description_is_absent() {
        let update = DepartmentUpdate {
            department_name: Some("  Ops ".into()),
            description: Some("   ".into()),
            status: None,
        }
        .normalized();
        assert_eq!(update.department_name.as_deref(), Some("Ops"));
        assert_eq!(update.description, None);

        let update = DepartmentUpdate {
            description: Some(" Runs things ".into()),
            ..Default::default()
        }
        .normalized();
        assert_eq!(update.description.as_deref(), Some("Runs things"));
    }
}
