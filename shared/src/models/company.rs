//! Company Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{RecordStatus, non_empty, trimmed, trimmed_opt};

/// Company entity (admin-managed)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Company {
    pub id: i64,
    /// Human-assigned code, unique
    pub company_code: String,
    pub company_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub pincode: String,
    pub gst_number: Option<String>,
    pub pan_number: Option<String>,
    pub date_of_incorporation: NaiveDate,
    pub status: RecordStatus,
    /// Account id of the admin who created the record
    pub created_by: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create company payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompanyCreate {
    #[validate(length(min = 1, message = "Company code is required"))]
    pub company_code: String,
    #[validate(length(min = 1, message = "Company name is required"))]
    pub company_name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,
    #[validate(length(min = 1, message = "Country is required"))]
    pub country: String,
    #[validate(length(min = 1, message = "Pincode is required"))]
    pub pincode: String,
    pub gst_number: Option<String>,
    pub pan_number: Option<String>,
    pub date_of_incorporation: NaiveDate,
    #[serde(default)]
    pub status: RecordStatus,
    /// Account id of the creator; stamped by the server
    #[serde(skip)]
    pub created_by: Option<String>,
}

impl CompanyCreate {
    pub fn normalized(self) -> Self {
        Self {
            company_code: trimmed(self.company_code),
            company_name: trimmed(self.company_name),
            email: trimmed(self.email),
            phone: trimmed(self.phone),
            address: trimmed(self.address),
            city: trimmed(self.city),
            state: trimmed(self.state),
            country: trimmed(self.country),
            pincode: trimmed(self.pincode),
            gst_number: non_empty(self.gst_number),
            pan_number: non_empty(self.pan_number),
            ..self
        }
    }
}

/// Update company payload. The code is immutable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CompanyUpdate {
    #[validate(length(min = 1, message = "Company name cannot be empty"))]
    pub company_name: Option<String>,
    #[validate(email(message = "A valid email is required"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "Phone cannot be empty"))]
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "Address cannot be empty"))]
    pub address: Option<String>,
    #[validate(length(min = 1, message = "City cannot be empty"))]
    pub city: Option<String>,
    #[validate(length(min = 1, message = "State cannot be empty"))]
    pub state: Option<String>,
    #[validate(length(min = 1, message = "Country cannot be empty"))]
    pub country: Option<String>,
    #[validate(length(min = 1, message = "Pincode cannot be empty"))]
    pub pincode: Option<String>,
    pub gst_number: Option<String>,
    pub pan_number: Option<String>,
    pub date_of_incorporation: Option<NaiveDate>,
    pub status: Option<RecordStatus>,
}

impl CompanyUpdate {
    pub fn normalized(self) -> Self {
        Self {
            company_name: trimmed_opt(self.company_name),
            email: trimmed_opt(self.email),
            phone: trimmed_opt(self.phone),
            address: trimmed_opt(self.address),
            city: trimmed_opt(self.city),
            state: trimmed_opt(self.state),
            country: trimmed_opt(self.country),
            pincode: trimmed_opt(self.pincode),
            gst_number: non_empty(self.gst_number),
            pan_number: non_empty(self.pan_number),
            date_of_incorporation: self.date_of_incorporation,
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_update_tax_numbers_are_absent() {
        let update = CompanyUpdate {
            gst_number: Some(String::new()),
            pan_number: Some("  ".into()),
            ..Default::default()
        }
        .normalized();
        assert_eq!(update.gst_number, None);
        assert_eq!(update.pan_number, None);
    }
}
