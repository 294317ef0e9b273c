//! Dashboard summary figures

use serde::{Deserialize, Serialize};
use shared::client::EmployeeCount;
use shared::models::{EmployeeStatus, RecordStatus};
use shared::policy::{self, Action, Resource};

use crate::error::ClientResult;
use crate::http::HrClient;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// `None` when the signed-in role cannot read employees
    pub employees: Option<EmployeeCount>,
    pub active_departments: u64,
    /// `None` when the signed-in role cannot read companies
    pub total_companies: Option<u64>,
}

/// Load the dashboard figures the signed-in role may see.
///
/// The employee totals come from the count endpoint. If that call fails
/// the full employee list is fetched once and counted locally; a failure
/// of the fallback is returned as is.
pub async fn load_stats(client: &HrClient) -> ClientResult<DashboardStats> {
    let role = client.session().role();
    let can_read = |resource| role.is_some_and(|role| policy::allows(role, resource, Action::Read));

    let employees = if can_read(Resource::Employees) {
        Some(employee_totals(client).await?)
    } else {
        None
    };

    let active_departments = client
        .departments()
        .await?
        .iter()
        .filter(|d| d.status == RecordStatus::Active)
        .count() as u64;

    let total_companies = if can_read(Resource::Companies) {
        Some(client.companies().await?.len() as u64)
    } else {
        None
    };

    Ok(DashboardStats {
        employees,
        active_departments,
        total_companies,
    })
}

async fn employee_totals(client: &HrClient) -> ClientResult<EmployeeCount> {
    match client.employee_count().await {
        Ok(count) => Ok(count),
        Err(e) => {
            tracing::warn!(error = %e, "Employee count unavailable, counting full list");
            let employees = client.employees().await?;
            Ok(count_statuses(employees.iter().map(|e| e.status)))
        }
    }
}

fn count_statuses(statuses: impl Iterator<Item = EmployeeStatus>) -> EmployeeCount {
    statuses.fold(EmployeeCount::default(), |mut count, status| {
        count.total += 1;
        match status {
            EmployeeStatus::Active => count.active += 1,
            EmployeeStatus::Onboarding => count.onboarding += 1,
            EmployeeStatus::Inactive | EmployeeStatus::Resigned => {}
        }
        count
    })
}
