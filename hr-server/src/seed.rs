//! Reference data seeding

use shared::models::{DepartmentCreate, DesignationCreate, RecordStatus};

use crate::db::{StoreError, Stores};
use crate::error::ServiceResult;

/// (code, name, description)
const DEPARTMENTS: &[(&str, &str, &str)] = &[
    ("DEPT001", "Engineering", "Software development and technical operations"),
    ("DEPT002", "Human Resources", "HR management and employee relations"),
    ("DEPT003", "Sales", "Sales and business development"),
    ("DEPT004", "Marketing", "Marketing and brand management"),
    ("DEPT005", "Finance", "Financial management and accounting"),
];

/// (code, name, department code, level, description)
const DESIGNATIONS: &[(&str, &str, &str, &str, &str)] = &[
    ("DES001", "Software Engineer", "DEPT001", "L1", "Develop and maintain software applications"),
    (
        "DES002",
        "Senior Software Engineer",
        "DEPT001",
        "L2",
        "Lead development projects and mentor junior developers",
    ),
    ("DES003", "Tech Lead", "DEPT001", "L3", "Lead technical architecture and team direction"),
    ("DES004", "HR Manager", "DEPT002", "Manager", "Manage HR operations and employee relations"),
    ("DES005", "HR Executive", "DEPT002", "L1", "Support HR operations and recruitment"),
    ("DES006", "Sales Executive", "DEPT003", "L1", "Generate sales and maintain client relationships"),
    ("DES007", "Sales Manager", "DEPT003", "Manager", "Lead sales team and strategy"),
    ("DES008", "Marketing Specialist", "DEPT004", "L1", "Execute marketing campaigns and strategies"),
    ("DES009", "Marketing Manager", "DEPT004", "Manager", "Lead marketing strategy and campaigns"),
    ("DES010", "Financial Analyst", "DEPT005", "L1", "Analyze financial data and prepare reports"),
];

/// Counts of rows actually inserted
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub departments: usize,
    pub designations: usize,
}

/// Insert the default departments and designations. Codes that already
/// exist are left untouched, so this is safe to run on every start.
pub async fn seed_reference_data(stores: &Stores) -> ServiceResult<SeedReport> {
    let mut report = SeedReport::default();

    for (code, name, description) in DEPARTMENTS {
        let created = stores
            .departments
            .create(DepartmentCreate {
                department_code: (*code).to_string(),
                department_name: (*name).to_string(),
                description: Some((*description).to_string()),
                status: RecordStatus::Active,
            })
            .await;
        match created {
            Ok(_) => report.departments += 1,
            Err(StoreError::Duplicate(_)) => {}
            Err(e) => return Err(e.into()),
        }
    }

    for (code, name, department_code, level, description) in DESIGNATIONS {
        let created = stores
            .designations
            .create(DesignationCreate {
                designation_code: (*code).to_string(),
                designation_name: (*name).to_string(),
                department_code: (*department_code).to_string(),
                level: Some((*level).to_string()),
                description: Some((*description).to_string()),
                status: RecordStatus::Active,
            })
            .await;
        match created {
            Ok(_) => report.designations += 1,
            Err(StoreError::Duplicate(_)) => {}
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!(
        departments = report.departments,
        designations = report.designations,
        "Reference data seeded"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_is_repeatable() {
        let stores = Stores::memory();
        let first = seed_reference_data(&stores).await.unwrap();
        assert_eq!(
            first,
            SeedReport {
                departments: 5,
                designations: 10
            }
        );

        let second = seed_reference_data(&stores).await.unwrap();
        assert_eq!(second, SeedReport::default());
        assert_eq!(stores.departments.list().await.unwrap().len(), 5);
        assert_eq!(stores.designations.list().await.unwrap().len(), 10);
    }

    #[test]
    fn test_designations_reference_seeded_departments() {
        for (_, _, department_code, _, _) in DESIGNATIONS {
            assert!(DEPARTMENTS.iter().any(|(code, _, _)| code == department_code));
        }
    }

    #[tokio::test]
    async fn test_seeded_rows_carry_descriptions() {
        let stores = Stores::memory();
        seed_reference_data(&stores).await.unwrap();

        let departments = stores.departments.list().await.unwrap();
        assert!(departments.iter().all(|d| d.description.is_some()));
        let engineering = departments
            .iter()
            .find(|d| d.department_code == "DEPT001")
            .unwrap();
        assert_eq!(
            engineering.description.as_deref(),
            Some("Software development and technical operations")
        );

        let designations = stores.designations.list().await.unwrap();
        assert!(designations.iter().all(|d| d.description.is_some()));
    }
}
