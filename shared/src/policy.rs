//! Role policy
//!
//! The one declarative table mapping (resource, action) to the roles
//! allowed to reach it. The server gate and the client route guard are
//! thin adapters over [`allows`]; neither keeps its own copy of the rules.
//!
//! Anything not listed in [`POLICY`] is denied.

use serde::{Deserialize, Serialize};

use crate::models::Role;

/// Things a role can reach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    /// The caller's own account
    OwnProfile,
    Departments,
    Designations,
    Employees,
    /// Accounts awaiting approval, and the approve/reject decision
    PendingAccounts,
    Companies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Read,
    Mutate,
}

#[derive(Debug, Clone, Copy)]
pub struct PolicyRule {
    pub resource: Resource,
    pub action: Action,
    pub roles: &'static [Role],
}

const EVERYONE: &[Role] = &[Role::Admin, Role::Hr, Role::Employee];
const HR_AND_ADMIN: &[Role] = &[Role::Admin, Role::Hr];
const ADMIN_ONLY: &[Role] = &[Role::Admin];

pub const POLICY: &[PolicyRule] = &[
    PolicyRule { resource: Resource::OwnProfile, action: Action::Read, roles: EVERYONE },
    PolicyRule { resource: Resource::Departments, action: Action::Read, roles: EVERYONE },
    PolicyRule { resource: Resource::Designations, action: Action::Read, roles: EVERYONE },
    PolicyRule { resource: Resource::Employees, action: Action::Read, roles: HR_AND_ADMIN },
    PolicyRule { resource: Resource::PendingAccounts, action: Action::Read, roles: HR_AND_ADMIN },
    PolicyRule { resource: Resource::Departments, action: Action::Mutate, roles: HR_AND_ADMIN },
    PolicyRule { resource: Resource::Designations, action: Action::Mutate, roles: HR_AND_ADMIN },
    PolicyRule { resource: Resource::Employees, action: Action::Mutate, roles: HR_AND_ADMIN },
    PolicyRule { resource: Resource::PendingAccounts, action: Action::Mutate, roles: HR_AND_ADMIN },
    PolicyRule { resource: Resource::Companies, action: Action::Read, roles: ADMIN_ONLY },
    PolicyRule { resource: Resource::Companies, action: Action::Mutate, roles: ADMIN_ONLY },
];

/// Roles allowed to perform `action` on `resource`; empty when unlisted.
pub fn allowed_roles(resource: Resource, action: Action) -> &'static [Role] {
    POLICY
        .iter()
        .find(|rule| rule.resource == resource && rule.action == action)
        .map(|rule| rule.roles)
        .unwrap_or(&[])
}

/// Deny-by-default membership check
pub fn allows(role: Role, resource: Resource, action: Action) -> bool {
    allowed_roles(resource, action).contains(&role)
}

// =============================================================================
// Client routes
// =============================================================================

/// Screens of the client application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientRoute {
    Login,
    Dashboard,
    Profile,
    HrPanel,
    DepartmentMaster,
    DesignationMaster,
    EmployeeMaster,
    CompanyMaster,
}

/// What a client route requires before it renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Reachable without a session (login screen)
    Public,
    /// Any signed-in role
    Authenticated,
    /// Signed-in role must pass the policy table
    Requires(Resource, Action),
}

impl ClientRoute {
    pub const ALL: [ClientRoute; 8] = [
        ClientRoute::Login,
        ClientRoute::Dashboard,
        ClientRoute::Profile,
        ClientRoute::HrPanel,
        ClientRoute::DepartmentMaster,
        ClientRoute::DesignationMaster,
        ClientRoute::EmployeeMaster,
        ClientRoute::CompanyMaster,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
            Self::Profile => "/profile",
            Self::HrPanel => "/hr-panel",
            Self::DepartmentMaster => "/dept-master",
            Self::DesignationMaster => "/desig-master",
            Self::EmployeeMaster => "/emp-master",
            Self::CompanyMaster => "/company-master",
        }
    }

    /// Resolve a path; unknown paths fall back to the dashboard.
    pub fn from_path(path: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|route| route.path() == path)
            .unwrap_or(Self::Dashboard)
    }

    /// Master screens mutate their resource, so they require mutate rights.
    pub fn access(&self) -> RouteAccess {
        match self {
            Self::Login => RouteAccess::Public,
            Self::Dashboard | Self::Profile => RouteAccess::Authenticated,
            Self::HrPanel => RouteAccess::Requires(Resource::PendingAccounts, Action::Mutate),
            Self::DepartmentMaster => RouteAccess::Requires(Resource::Departments, Action::Mutate),
            Self::DesignationMaster => {
                RouteAccess::Requires(Resource::Designations, Action::Mutate)
            }
            Self::EmployeeMaster => RouteAccess::Requires(Resource::Employees, Action::Mutate),
            Self::CompanyMaster => RouteAccess::Requires(Resource::Companies, Action::Mutate),
        }
    }

    /// Landing screen after sign-in
    pub fn home_for(role: Role) -> Self {
        match role {
            Role::Admin => Self::CompanyMaster,
            Role::Hr => Self::HrPanel,
            Role::Employee => Self::Dashboard,
        }
    }

    /// Whether `role` may open this route (ignores the public login screen)
    pub fn permits(&self, role: Role) -> bool {
        match self.access() {
            RouteAccess::Public | RouteAccess::Authenticated => true,
            RouteAccess::Requires(resource, action) => allows(role, resource, action),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_reads_reference_lists_only() {
        assert!(allows(Role::Employee, Resource::OwnProfile, Action::Read));
        assert!(allows(Role::Employee, Resource::Departments, Action::Read));
        assert!(allows(Role::Employee, Resource::Designations, Action::Read));
        assert!(!allows(Role::Employee, Resource::Employees, Action::Read));
        assert!(!allows(Role::Employee, Resource::PendingAccounts, Action::Read));
        assert!(!allows(Role::Employee, Resource::Companies, Action::Read));
    }

    #[test]
    fn test_employee_mutates_nothing() {
        for rule in POLICY.iter().filter(|r| r.action == Action::Mutate) {
            assert!(
                !rule.roles.contains(&Role::Employee),
                "employee may not mutate {:?}",
                rule.resource
            );
        }
    }

    #[test]
    fn test_hr_rights() {
        for resource in [
            Resource::Departments,
            Resource::Designations,
            Resource::Employees,
            Resource::PendingAccounts,
        ] {
            assert!(allows(Role::Hr, resource, Action::Read));
            assert!(allows(Role::Hr, resource, Action::Mutate));
        }
        assert!(!allows(Role::Hr, Resource::Companies, Action::Read));
        assert!(!allows(Role::Hr, Resource::Companies, Action::Mutate));
    }

    #[test]
    fn test_admin_is_superset_of_hr() {
        for rule in POLICY {
            if rule.roles.contains(&Role::Hr) {
                assert!(rule.roles.contains(&Role::Admin), "{:?}", rule.resource);
            }
        }
        assert!(allows(Role::Admin, Resource::Companies, Action::Mutate));
    }

    #[test]
    fn test_no_duplicate_rules() {
        for (i, a) in POLICY.iter().enumerate() {
            for b in &POLICY[i + 1..] {
                assert!(
                    !(a.resource == b.resource && a.action == b.action),
                    "duplicate rule for {:?}/{:?}",
                    a.resource,
                    a.action
                );
            }
        }
    }

    #[test]
    fn test_unlisted_pair_is_denied() {
        assert!(allowed_roles(Resource::OwnProfile, Action::Mutate).is_empty());
        for role in Role::ALL {
            assert!(!allows(role, Resource::OwnProfile, Action::Mutate));
        }
    }

    #[test]
    fn test_route_access_matches_policy() {
        assert!(ClientRoute::CompanyMaster.permits(Role::Admin));
        assert!(!ClientRoute::CompanyMaster.permits(Role::Hr));
        assert!(ClientRoute::DepartmentMaster.permits(Role::Hr));
        assert!(!ClientRoute::DepartmentMaster.permits(Role::Employee));
        assert!(ClientRoute::EmployeeMaster.permits(Role::Admin));
        assert!(!ClientRoute::HrPanel.permits(Role::Employee));
        assert!(ClientRoute::Dashboard.permits(Role::Employee));
        assert!(ClientRoute::Profile.permits(Role::Employee));
    }

    #[test]
    fn test_home_route_is_always_permitted() {
        for role in Role::ALL {
            assert!(ClientRoute::home_for(role).permits(role));
        }
    }

    #[test]
    fn test_paths_round_trip_and_unknown_defaults_to_dashboard() {
        for route in ClientRoute::ALL {
            assert_eq!(ClientRoute::from_path(route.path()), route);
        }
        assert_eq!(ClientRoute::from_path("/nowhere"), ClientRoute::Dashboard);
    }
}
