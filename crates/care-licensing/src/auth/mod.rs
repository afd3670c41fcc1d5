//! Session resolution and role-based access control.
//!
//! Every protected entry point composes [`RoleGuard::require_role`] instead
//! of re-deriving redirect targets; the policy table lives in one place on
//! [`Role`].

pub mod guard;
pub mod roles;
pub mod session;

pub use guard::{decide, AccessDecision, RoleGuard};
pub use roles::{Role, RoleSet, ADMIN_ONLY, AGENCY_ROLES, ANY_ROLE, EXPERT_ONLY, LIFECYCLE_ROLES, LOGIN_PATH};
pub use session::{AuthenticatedUser, IdentityProvider, Session, SessionResolver, UserProfile};
