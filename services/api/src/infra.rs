use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, OnceLock};

use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;

use care_licensing::auth::{AuthenticatedUser, IdentityProvider, Role, UserProfile};
use care_licensing::licensing::{ApplicationId, ApplicationStatus, LicenseApplication};
use care_licensing::store::{ApplicationStore, NotificationStore, ProfileStore, StoreError};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
pub(crate) struct InMemoryApplications {
    records: Mutex<HashMap<ApplicationId, LicenseApplication>>,
}

impl ApplicationStore for InMemoryApplications {
    fn fetch(&self, id: &ApplicationId) -> Result<Option<LicenseApplication>, StoreError> {
        let guard = self.records.lock().expect("application mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn update_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<(), StoreError> {
        // The mutex is held across the write, making the status update the
        // atomic unit of the close transition.
        let mut guard = self.records.lock().expect("application mutex poisoned");
        match guard.get_mut(id) {
            Some(application) => {
                application.status = status;
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }
}

#[derive(Default)]
pub(crate) struct InMemoryProfiles {
    profiles: Mutex<HashMap<String, UserProfile>>,
}

impl ProfileStore for InMemoryProfiles {
    fn fetch_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        let guard = self.profiles.lock().expect("profile mutex poisoned");
        Ok(guard.get(user_id).cloned())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryNotifications {
    counts: Mutex<HashMap<String, u64>>,
}

impl NotificationStore for InMemoryNotifications {
    fn unread_count(&self, user_id: &str) -> Result<u64, StoreError> {
        let guard = self.counts.lock().expect("notification mutex poisoned");
        Ok(guard.get(user_id).copied().unwrap_or(0))
    }
}

/// Bearer-token session lookup standing in for the external identity
/// provider. Stateless per call; safe to share across requests.
#[derive(Default)]
pub(crate) struct TokenIdentities {
    sessions: Mutex<HashMap<String, AuthenticatedUser>>,
}

impl IdentityProvider for TokenIdentities {
    fn current_user(&self, token: Option<&str>) -> Option<AuthenticatedUser> {
        let token = token?;
        let guard = self.sessions.lock().expect("session mutex poisoned");
        guard.get(token).cloned()
    }
}

/// The store handles wired into the router.
pub(crate) struct DemoStores {
    pub(crate) applications: Arc<InMemoryApplications>,
    pub(crate) profiles: Arc<InMemoryProfiles>,
    pub(crate) notifications: Arc<InMemoryNotifications>,
    pub(crate) identities: Arc<TokenIdentities>,
}

/// One logical store client per process, initialized on first use. The
/// handles are stateless per call, so no teardown is needed.
pub(crate) fn demo_stores() -> &'static DemoStores {
    static STORES: OnceLock<DemoStores> = OnceLock::new();
    STORES.get_or_init(|| {
        let stores = DemoStores {
            applications: Arc::new(InMemoryApplications::default()),
            profiles: Arc::new(InMemoryProfiles::default()),
            notifications: Arc::new(InMemoryNotifications::default()),
            identities: Arc::new(TokenIdentities::default()),
        };
        seed(&stores);
        stores
    })
}

fn profile(user_id: &str, role: Role, display_name: &str) -> UserProfile {
    let now = Utc::now();
    UserProfile {
        user_id: user_id.to_string(),
        role,
        display_name: display_name.to_string(),
        created_at: now,
        updated_at: now,
    }
}

fn seed(stores: &DemoStores) {
    let applications = [
        ("A-1001", ApplicationStatus::Open, Some(100)),
        ("A-1002", ApplicationStatus::Open, Some(40)),
        ("A-1003", ApplicationStatus::Closed, Some(100)),
        ("A-1004", ApplicationStatus::Open, None),
    ];
    {
        let mut guard = stores
            .applications
            .records
            .lock()
            .expect("application mutex poisoned");
        for (id, status, progress) in applications {
            guard.insert(
                ApplicationId(id.to_string()),
                LicenseApplication {
                    id: ApplicationId(id.to_string()),
                    client_id: format!("client-{id}"),
                    status,
                    progress_percentage: progress,
                },
            );
        }
    }

    let users = [
        ("user-admin", Role::Admin, "Dana Admin", "demo-admin"),
        ("user-expert", Role::Expert, "Erik Expert", "demo-expert"),
        ("user-owner", Role::CompanyOwner, "Olivia Owner", "demo-owner"),
        ("user-staff", Role::StaffMember, "Sam Staff", "demo-staff"),
    ];
    {
        let mut profiles = stores
            .profiles
            .profiles
            .lock()
            .expect("profile mutex poisoned");
        let mut sessions = stores
            .identities
            .sessions
            .lock()
            .expect("session mutex poisoned");
        for (user_id, role, display_name, token) in users {
            profiles.insert(user_id.to_string(), profile(user_id, role, display_name));
            sessions.insert(
                token.to_string(),
                AuthenticatedUser {
                    id: user_id.to_string(),
                    email: Some(format!("{user_id}@example.org")),
                },
            );
        }
    }

    let mut counts = stores
        .notifications
        .counts
        .lock()
        .expect("notification mutex poisoned");
    counts.insert("user-admin".to_string(), 3);
    counts.insert("user-owner".to_string(), 1);
}
