//! Employee Model
//!
//! Employee master records. These are HR-managed records, separate from
//! login accounts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{non_empty, trimmed, trimmed_opt};

/// Employment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
    Onboarding,
    Resigned,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Onboarding => "onboarding",
            Self::Resigned => "resigned",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "onboarding" => Some(Self::Onboarding),
            "resigned" => Some(Self::Resigned),
            _ => None,
        }
    }

    /// Quick toggle between active and inactive. Onboarding and resigned
    /// records change status only through an explicit update.
    pub fn toggled(self) -> Option<Self> {
        match self {
            Self::Active => Some(Self::Inactive),
            Self::Inactive => Some(Self::Active),
            Self::Onboarding | Self::Resigned => None,
        }
    }
}

super::text_enum!(EmployeeStatus, "employee status");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "Male" => Some(Self::Male),
            "Female" => Some(Self::Female),
            "Other" => Some(Self::Other),
            _ => None,
        }
    }
}

super::text_enum!(Gender, "gender");

/// Employee entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    pub full_name: String,
    /// Unique across employees
    pub email: String,
    pub phone: String,
    pub gender: Option<Gender>,
    pub dob: Option<NaiveDate>,
    pub joining_date: NaiveDate,
    /// Department code
    pub department: String,
    /// Designation code
    pub designation: String,
    pub address: Option<String>,
    pub profile_pic_url: Option<String>,
    pub status: EmployeeStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create employee payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmployeeCreate {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    pub gender: Option<Gender>,
    pub dob: Option<NaiveDate>,
    pub joining_date: NaiveDate,
    #[validate(length(min = 1, message = "Department is required"))]
    pub department: String,
    #[validate(length(min = 1, message = "Designation is required"))]
    pub designation: String,
    pub address: Option<String>,
    #[validate(url(message = "Profile picture must be a URL"))]
    pub profile_pic_url: Option<String>,
    #[serde(default)]
    pub status: EmployeeStatus,
}

impl EmployeeCreate {
    pub fn normalized(self) -> Self {
        Self {
            full_name: trimmed(self.full_name),
            email: trimmed(self.email),
            phone: trimmed(self.phone),
            department: trimmed(self.department),
            designation: trimmed(self.designation),
            address: non_empty(self.address),
            profile_pic_url: non_empty(self.profile_pic_url),
            ..self
        }
    }
}

/// Update employee payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct EmployeeUpdate {
    #[validate(length(min = 1, message = "Full name cannot be empty"))]
    pub full_name: Option<String>,
    #[validate(email(message = "A valid email is required"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "Phone cannot be empty"))]
    pub phone: Option<String>,
    pub gender: Option<Gender>,
    pub dob: Option<NaiveDate>,
    pub joining_date: Option<NaiveDate>,
    #[validate(length(min = 1, message = "Department cannot be empty"))]
    pub department: Option<String>,
    #[validate(length(min = 1, message = "Designation cannot be empty"))]
    pub designation: Option<String>,
    pub address: Option<String>,
    #[validate(url(message = "Profile picture must be a URL"))]
    pub profile_pic_url: Option<String>,
    pub status: Option<EmployeeStatus>,
}

impl EmployeeUpdate {
    pub fn normalized(self) -> Self {
        Self {
            full_name: trimmed_opt(self.full_name),
            email: trimmed_opt(self.email),
            phone: trimmed_opt(self.phone),
            department: trimmed_opt(self.department),
            designation: trimmed_opt(self.designation),
            address: trimmed_opt(self.address),
            profile_pic_url: trimmed_opt(self.profile_pic_url),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_only_between_active_and_inactive() {
        assert_eq!(
            EmployeeStatus::Active.toggled(),
            Some(EmployeeStatus::Inactive)
        );
        assert_eq!(
            EmployeeStatus::Inactive.toggled(),
            Some(EmployeeStatus::Active)
        );
        assert_eq!(EmployeeStatus::Onboarding.toggled(), None);
        assert_eq!(EmployeeStatus::Resigned.toggled(), None);
    }

    #[test]
    fn test_gender_keeps_capitalized_wire_form() {
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"Female\"");
        assert_eq!("Other".parse::<Gender>(), Ok(Gender::Other));
        assert!("male".parse::<Gender>().is_err());
    }

    #[test]
    fn test_create_parses_iso_dates_and_defaults_status() {
        let create: EmployeeCreate = serde_json::from_str(
            r#"{
                "full_name": "  Asha Rao ",
                "email": "asha@x.com",
                "phone": "98450",
                "joining_date": "2024-04-01",
                "department": "DEPT001",
                "designation": "DES001",
                "address": ""
            }"#,
        )
        .unwrap();
        let create = create.normalized();
        assert_eq!(create.full_name, "Asha Rao");
        assert_eq!(create.status, EmployeeStatus::Active);
        assert_eq!(create.address, None);
        assert_eq!(
            create.joining_date,
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
        );
        assert!(create.validate().is_ok());
    }

    #[test]
    fn test_create_rejects_bad_email() {
        let create: EmployeeCreate = serde_json::from_str(
            r#"{
                "full_name": "Asha",
                "email": "asha",
                "phone": "98450",
                "joining_date": "2024-04-01",
                "department": "DEPT001",
                "designation": "DES001"
            }"#,
        )
        .unwrap();
        assert!(create.validate().is_err());
    }
}
