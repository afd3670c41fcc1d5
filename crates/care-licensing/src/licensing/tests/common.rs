use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::Utc;
use serde_json::Value;

use crate::auth::{AuthenticatedUser, IdentityProvider, Role, UserProfile};
use crate::licensing::domain::{ApplicationId, ApplicationStatus, LicenseApplication};
use crate::licensing::router::{licensing_router, LicensingState};
use crate::store::{ApplicationStore, NotificationStore, ProfileStore, StoreError};

pub(super) fn application(
    id: &str,
    status: ApplicationStatus,
    progress: Option<u8>,
) -> LicenseApplication {
    LicenseApplication {
        id: ApplicationId(id.to_string()),
        client_id: format!("client-{id}"),
        status,
        progress_percentage: progress,
    }
}

pub(super) fn profile(user_id: &str, role: Role) -> UserProfile {
    let now = Utc::now();
    UserProfile {
        user_id: user_id.to_string(),
        role,
        display_name: format!("{} {}", role.label(), user_id),
        created_at: now,
        updated_at: now,
    }
}

/// Application store over a mutex-guarded map, counting status writes so the
/// no-write invariants can be asserted.
#[derive(Default)]
pub(super) struct MemoryApplications {
    records: Mutex<HashMap<ApplicationId, LicenseApplication>>,
    update_calls: AtomicU64,
}

impl MemoryApplications {
    pub(super) fn with(applications: Vec<LicenseApplication>) -> Arc<Self> {
        let store = Self::default();
        {
            let mut guard = store.records.lock().expect("store mutex poisoned");
            for application in applications {
                guard.insert(application.id.clone(), application);
            }
        }
        Arc::new(store)
    }

    pub(super) fn update_count(&self) -> u64 {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub(super) fn status_of(&self, id: &str) -> Option<ApplicationStatus> {
        let guard = self.records.lock().expect("store mutex poisoned");
        guard
            .get(&ApplicationId(id.to_string()))
            .map(|application| application.status)
    }
}

impl ApplicationStore for MemoryApplications {
    fn fetch(&self, id: &ApplicationId) -> Result<Option<LicenseApplication>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn update_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<(), StoreError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let mut guard = self.records.lock().expect("store mutex poisoned");
        match guard.get_mut(id) {
            Some(application) => {
                application.status = status;
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }
}

/// Store double whose every call fails, for fault translation tests.
pub(super) struct UnavailableApplications;

impl ApplicationStore for UnavailableApplications {
    fn fetch(&self, _id: &ApplicationId) -> Result<Option<LicenseApplication>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn update_status(
        &self,
        _id: &ApplicationId,
        _status: ApplicationStatus,
    ) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

/// Reads succeed, writes are rejected; exercises the verbatim update-failure
/// message pass-through.
pub(super) struct ReadOnlyApplications {
    pub(super) inner: Arc<MemoryApplications>,
}

impl ApplicationStore for ReadOnlyApplications {
    fn fetch(&self, id: &ApplicationId) -> Result<Option<LicenseApplication>, StoreError> {
        self.inner.fetch(id)
    }

    fn update_status(
        &self,
        _id: &ApplicationId,
        _status: ApplicationStatus,
    ) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("row locked by migration".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemoryProfiles {
    profiles: Mutex<HashMap<String, UserProfile>>,
}

impl MemoryProfiles {
    pub(super) fn with(profiles: Vec<UserProfile>) -> Arc<Self> {
        let store = Self::default();
        {
            let mut guard = store.profiles.lock().expect("profile mutex poisoned");
            for profile in profiles {
                guard.insert(profile.user_id.clone(), profile);
            }
        }
        Arc::new(store)
    }
}

impl ProfileStore for MemoryProfiles {
    fn fetch_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        let guard = self.profiles.lock().expect("profile mutex poisoned");
        Ok(guard.get(user_id).cloned())
    }
}

/// Token-to-identity map standing in for the external session provider.
#[derive(Default)]
pub(super) struct StaticIdentities {
    sessions: HashMap<String, AuthenticatedUser>,
}

impl StaticIdentities {
    pub(super) fn with(sessions: Vec<(&str, &str)>) -> Arc<Self> {
        let sessions = sessions
            .into_iter()
            .map(|(token, user_id)| {
                (
                    token.to_string(),
                    AuthenticatedUser {
                        id: user_id.to_string(),
                        email: Some(format!("{user_id}@example.org")),
                    },
                )
            })
            .collect();
        Arc::new(Self { sessions })
    }
}

impl IdentityProvider for StaticIdentities {
    fn current_user(&self, token: Option<&str>) -> Option<AuthenticatedUser> {
        token.and_then(|token| self.sessions.get(token).cloned())
    }
}

#[derive(Default)]
pub(super) struct MemoryNotifications {
    counts: HashMap<String, u64>,
}

impl MemoryNotifications {
    pub(super) fn with(counts: Vec<(&str, u64)>) -> Arc<Self> {
        let counts = counts
            .into_iter()
            .map(|(user_id, count)| (user_id.to_string(), count))
            .collect();
        Arc::new(Self { counts })
    }
}

impl NotificationStore for MemoryNotifications {
    fn unread_count(&self, user_id: &str) -> Result<u64, StoreError> {
        Ok(self.counts.get(user_id).copied().unwrap_or(0))
    }
}

pub(super) type MemoryState =
    LicensingState<MemoryApplications, StaticIdentities, MemoryProfiles, MemoryNotifications>;

/// One role of each kind, a few applications in representative states, and a
/// router wired against the in-memory stores.
pub(super) fn seeded_state(
    applications: Vec<LicenseApplication>,
) -> (MemoryState, Arc<MemoryApplications>) {
    let store = MemoryApplications::with(applications);
    let identities = StaticIdentities::with(vec![
        ("admin-token", "user-admin"),
        ("expert-token", "user-expert"),
        ("owner-token", "user-owner"),
        ("staff-token", "user-staff"),
    ]);
    let profiles = MemoryProfiles::with(vec![
        profile("user-admin", Role::Admin),
        profile("user-expert", Role::Expert),
        profile("user-owner", Role::CompanyOwner),
        profile("user-staff", Role::StaffMember),
    ]);
    let notifications =
        MemoryNotifications::with(vec![("user-admin", 3), ("user-owner", 1)]);

    let state = LicensingState::new(store.clone(), identities, profiles, notifications);
    (state, store)
}

pub(super) fn seeded_router(
    applications: Vec<LicenseApplication>,
) -> (axum::Router, Arc<MemoryApplications>) {
    let (state, store) = seeded_state(applications);
    (licensing_router(state), store)
}

/// Router whose application store fails every call, for fault translation
/// checks at the HTTP boundary.
pub(super) fn faulty_store_router() -> axum::Router {
    let identities = StaticIdentities::with(vec![("staff-token", "user-staff")]);
    let profiles = MemoryProfiles::with(vec![profile("user-staff", Role::StaffMember)]);
    let state = LicensingState::new(
        Arc::new(UnavailableApplications),
        identities,
        profiles,
        MemoryNotifications::with(Vec::new()),
    );
    licensing_router(state)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn get_request(path: &str, token: Option<&str>) -> axum::http::Request<axum::body::Body> {
    let mut builder = axum::http::Request::get(path);
    if let Some(token) = token {
        builder = builder.header(axum::http::header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(axum::body::Body::empty()).expect("request")
}

pub(super) fn post_request(
    path: &str,
    token: Option<&str>,
) -> axum::http::Request<axum::body::Body> {
    let mut builder = axum::http::Request::post(path);
    if let Some(token) = token {
        builder = builder.header(axum::http::header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(axum::body::Body::empty()).expect("request")
}
