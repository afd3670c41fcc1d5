use std::sync::Arc;

use axum::response::Redirect;

use super::roles::{RoleSet, LOGIN_PATH};
use super::session::{IdentityProvider, Session, SessionResolver};
use crate::store::ProfileStore;

/// Outcome of the access check for one entry point.
///
/// Access failures are resolved by redirecting, never by a 403 page: an
/// unauthenticated caller always lands on the login entry point, and an
/// authenticated caller with the wrong role lands on their own home area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Granted(Session),
    Redirect(&'static str),
}

impl AccessDecision {
    /// Redirect target, or `None` when access was granted.
    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            AccessDecision::Granted(_) => None,
            AccessDecision::Redirect(target) => Some(target),
        }
    }
}

/// Pure access decision. "No session" is checked before "wrong role" so the
/// outcome is deterministic for a given `(session, required)` pair.
pub fn decide(session: Option<Session>, required: RoleSet) -> AccessDecision {
    let Some(session) = session else {
        return AccessDecision::Redirect(LOGIN_PATH);
    };

    if required.contains(session.profile.role) {
        AccessDecision::Granted(session)
    } else {
        AccessDecision::Redirect(session.profile.role.home_area())
    }
}

/// Guard composed by every protected route. Resolves the session and applies
/// [`decide`]; the `Err` arm is a ready-to-return redirect response.
pub struct RoleGuard<I, P> {
    resolver: SessionResolver<I, P>,
}

impl<I, P> RoleGuard<I, P>
where
    I: IdentityProvider,
    P: ProfileStore,
{
    pub fn new(identities: Arc<I>, profiles: Arc<P>) -> Self {
        Self {
            resolver: SessionResolver::new(identities, profiles),
        }
    }

    pub fn require_role(
        &self,
        token: Option<&str>,
        required: RoleSet,
    ) -> Result<Session, Redirect> {
        match decide(self.resolver.resolve(token), required) {
            AccessDecision::Granted(session) => Ok(session),
            AccessDecision::Redirect(target) => Err(Redirect::to(target)),
        }
    }
}
