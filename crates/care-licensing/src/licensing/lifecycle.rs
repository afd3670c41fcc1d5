use std::sync::Arc;

use serde::Serialize;

use super::domain::{ApplicationId, ApplicationStatus};
use crate::store::ApplicationStore;

/// Enforces the close transition on license applications.
///
/// Authorization is the surrounding route guard's job; this manager only
/// validates application state. Status is the single field it ever writes.
pub struct ApplicationLifecycle<S> {
    store: Arc<S>,
}

/// Result of a successful close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed,
    /// The application was already closed; no write was performed.
    AlreadyClosed,
}

/// Domain-rule failures of the close transition. Messages are surfaced to the
/// calling UI as-is.
#[derive(Debug, thiserror::Error)]
pub enum CloseError {
    #[error("Application not found")]
    NotFound,
    #[error("Application can only be closed when progress is 100%")]
    Progress,
    #[error("{0}")]
    Update(String),
}

impl<S> ApplicationLifecycle<S>
where
    S: ApplicationStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Closes an application once its progress reaches 100%.
    ///
    /// Re-closing an already closed application succeeds without touching
    /// the store, so concurrent close requests need no locking. A fetch
    /// fault is indistinguishable from a missing row for the caller and maps
    /// to [`CloseError::NotFound`].
    pub fn close_application(&self, id: &ApplicationId) -> Result<CloseOutcome, CloseError> {
        let application = match self.store.fetch(id) {
            Ok(Some(application)) => application,
            Ok(None) | Err(_) => return Err(CloseError::NotFound),
        };

        if application.is_closed() {
            return Ok(CloseOutcome::AlreadyClosed);
        }

        if application.progress() < 100 {
            return Err(CloseError::Progress);
        }

        self.store
            .update_status(id, ApplicationStatus::Closed)
            .map_err(|err| CloseError::Update(err.to_string()))?;

        Ok(CloseOutcome::Closed)
    }
}

/// Wire shape exposed to page code: `error == null` signals success or an
/// already-closed application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CloseReceipt {
    pub error: Option<String>,
}

impl CloseReceipt {
    pub fn ok() -> Self {
        Self { error: None }
    }
}

impl From<&CloseError> for CloseReceipt {
    fn from(err: &CloseError) -> Self {
        Self {
            error: Some(err.to_string()),
        }
    }
}
