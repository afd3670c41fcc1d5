//! Query layer: every persistence operation the core issues goes through one
//! of these traits. Adapters (in-memory for tests and the demo service, a
//! relational client in production) live outside the library.

use crate::auth::UserProfile;
use crate::licensing::domain::{ApplicationId, ApplicationStatus, LicenseApplication};

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Row access for license applications.
pub trait ApplicationStore: Send + Sync {
    fn fetch(&self, id: &ApplicationId) -> Result<Option<LicenseApplication>, StoreError>;

    /// Writes the status column and nothing else. The implementation is the
    /// atomic unit of the close transition; relational adapters should issue
    /// a conditional update (`... where progress_percentage = 100`).
    fn update_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<(), StoreError>;
}

/// Profile lookup keyed by the opaque identity id.
pub trait ProfileStore: Send + Sync {
    fn fetch_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError>;
}

/// Unread-count query used to decorate layouts; delivery mechanics are not
/// this core's concern.
pub trait NotificationStore: Send + Sync {
    fn unread_count(&self, user_id: &str) -> Result<u64, StoreError>;
}
