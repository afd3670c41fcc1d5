use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::roles::Role;
use crate::store::ProfileStore;

/// Identity returned by the external session provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: String,
    pub email: Option<String>,
}

/// One profile per identity; the role column drives all routing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub role: Role,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Resolved request identity: the authenticated user together with their
/// profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: AuthenticatedUser,
    pub profile: UserProfile,
}

/// External identity collaborator. Absence of a session is a normal `None`,
/// never an error.
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self, token: Option<&str>) -> Option<AuthenticatedUser>;
}

/// Resolves the caller's session fresh on every request; nothing is cached
/// across requests, so there is no invalidation to manage.
pub struct SessionResolver<I, P> {
    identities: Arc<I>,
    profiles: Arc<P>,
}

impl<I, P> SessionResolver<I, P>
where
    I: IdentityProvider,
    P: ProfileStore,
{
    pub fn new(identities: Arc<I>, profiles: Arc<P>) -> Self {
        Self {
            identities,
            profiles,
        }
    }

    /// Returns the session for the supplied credential, or `None` when the
    /// caller is unauthenticated. An identity without a readable profile row
    /// cannot be routed anywhere, so it also resolves to `None`.
    pub fn resolve(&self, token: Option<&str>) -> Option<Session> {
        let user = self.identities.current_user(token)?;

        let profile = match self.profiles.fetch_profile(&user.id) {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                warn!(user_id = %user.id, "authenticated identity has no profile row");
                return None;
            }
            Err(err) => {
                warn!(user_id = %user.id, error = %err, "profile lookup failed");
                return None;
            }
        };

        Some(Session { user, profile })
    }
}
