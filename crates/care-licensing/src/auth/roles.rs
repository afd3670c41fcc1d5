use serde::{Deserialize, Serialize};

/// Subject categories controlling area access. The set is fixed; role
/// changes are an administrative concern outside this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    CompanyOwner,
    StaffMember,
    Admin,
    Expert,
}

/// Entry point for unauthenticated callers.
pub const LOGIN_PATH: &str = "/login";

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::CompanyOwner => "company_owner",
            Role::StaffMember => "staff_member",
            Role::Admin => "admin",
            Role::Expert => "expert",
        }
    }

    /// Parses the string-valued role column from the profile store.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "company_owner" => Some(Role::CompanyOwner),
            "staff_member" => Some(Role::StaffMember),
            "admin" => Some(Role::Admin),
            "expert" => Some(Role::Expert),
            _ => None,
        }
    }

    /// Central redirect policy: every entry point sends a wrong-role caller
    /// to the home area of the role they actually hold.
    pub const fn home_area(self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::Expert => "/expert",
            Role::CompanyOwner | Role::StaffMember => "/agency",
        }
    }
}

/// A named set of roles accepted by an entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSet(&'static [Role]);

impl RoleSet {
    pub const fn new(roles: &'static [Role]) -> Self {
        Self(roles)
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub fn roles(&self) -> &'static [Role] {
        self.0
    }
}

pub const ADMIN_ONLY: RoleSet = RoleSet::new(&[Role::Admin]);
pub const EXPERT_ONLY: RoleSet = RoleSet::new(&[Role::Expert]);
pub const AGENCY_ROLES: RoleSet = RoleSet::new(&[Role::CompanyOwner, Role::StaffMember]);
/// Roles allowed to drive the application lifecycle.
pub const LIFECYCLE_ROLES: RoleSet = RoleSet::new(&[Role::Expert, Role::Admin]);
pub const ANY_ROLE: RoleSet = RoleSet::new(&[
    Role::CompanyOwner,
    Role::StaffMember,
    Role::Admin,
    Role::Expert,
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_parse() {
        for role in [
            Role::CompanyOwner,
            Role::StaffMember,
            Role::Admin,
            Role::Expert,
        ] {
            assert_eq!(Role::parse(role.label()), Some(role));
        }
        assert_eq!(Role::parse("superuser"), None);
    }

    #[test]
    fn agency_roles_share_a_home_area() {
        assert_eq!(Role::CompanyOwner.home_area(), "/agency");
        assert_eq!(Role::StaffMember.home_area(), "/agency");
        assert_eq!(Role::Admin.home_area(), "/admin");
        assert_eq!(Role::Expert.home_area(), "/expert");
    }

    #[test]
    fn lifecycle_roles_cover_expert_and_admin_only() {
        assert!(LIFECYCLE_ROLES.contains(Role::Expert));
        assert!(LIFECYCLE_ROLES.contains(Role::Admin));
        assert!(!LIFECYCLE_ROLES.contains(Role::CompanyOwner));
        assert!(!LIFECYCLE_ROLES.contains(Role::StaffMember));
    }
}
