use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::domain::ApplicationId;
use super::lifecycle::{ApplicationLifecycle, CloseError, CloseReceipt};
use crate::auth::{
    IdentityProvider, RoleGuard, RoleSet, Session, ADMIN_ONLY, AGENCY_ROLES, ANY_ROLE,
    EXPERT_ONLY, LIFECYCLE_ROLES,
};
use crate::store::{ApplicationStore, NotificationStore, ProfileStore};

/// Shared state for the licensing routes: the role guard plus the stores the
/// handlers read from.
pub struct LicensingState<S, I, P, N> {
    guard: Arc<RoleGuard<I, P>>,
    lifecycle: Arc<ApplicationLifecycle<S>>,
    applications: Arc<S>,
    notifications: Arc<N>,
}

impl<S, I, P, N> Clone for LicensingState<S, I, P, N> {
    fn clone(&self) -> Self {
        Self {
            guard: self.guard.clone(),
            lifecycle: self.lifecycle.clone(),
            applications: self.applications.clone(),
            notifications: self.notifications.clone(),
        }
    }
}

impl<S, I, P, N> LicensingState<S, I, P, N>
where
    S: ApplicationStore,
    I: IdentityProvider,
    P: ProfileStore,
    N: NotificationStore,
{
    pub fn new(
        applications: Arc<S>,
        identities: Arc<I>,
        profiles: Arc<P>,
        notifications: Arc<N>,
    ) -> Self {
        Self {
            guard: Arc::new(RoleGuard::new(identities, profiles)),
            lifecycle: Arc::new(ApplicationLifecycle::new(applications.clone())),
            applications,
            notifications,
        }
    }
}

/// Router builder for every protected entry point. Each route composes the
/// guard exactly once; there is no other path to the handlers.
pub fn licensing_router<S, I, P, N>(state: LicensingState<S, I, P, N>) -> Router
where
    S: ApplicationStore + 'static,
    I: IdentityProvider + 'static,
    P: ProfileStore + 'static,
    N: NotificationStore + 'static,
{
    Router::new()
        .route("/admin", get(admin_area_handler::<S, I, P, N>))
        .route("/expert", get(expert_area_handler::<S, I, P, N>))
        .route("/agency", get(agency_area_handler::<S, I, P, N>))
        .route(
            "/api/v1/applications/:application_id/close",
            post(close_handler::<S, I, P, N>),
        )
        .route(
            "/api/v1/applications/:application_id",
            get(application_status_handler::<S, I, P, N>),
        )
        .route(
            "/api/v1/notifications/unread-count",
            get(unread_count_handler::<S, I, P, N>),
        )
        .with_state(state)
}

/// Session credential from `Authorization: Bearer ...` or the
/// `x-session-token` fallback used by non-browser callers.
fn session_token(headers: &HeaderMap) -> Option<&str> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        if let Ok(value) = value.to_str() {
            if let Some(token) = value.strip_prefix("Bearer ") {
                return Some(token);
            }
        }
    }
    headers
        .get("x-session-token")
        .and_then(|value| value.to_str().ok())
}

fn area_payload<N>(area: &'static str, session: &Session, notifications: &N) -> Response
where
    N: NotificationStore,
{
    // Count faults must not take down a landing page; the badge just reads 0.
    let unread = notifications
        .unread_count(&session.user.id)
        .unwrap_or_default();

    let payload = json!({
        "area": area,
        "role": session.profile.role.label(),
        "display_name": session.profile.display_name,
        "unread_notifications": unread,
    });
    (StatusCode::OK, Json(payload)).into_response()
}

async fn area_handler<S, I, P, N>(
    state: LicensingState<S, I, P, N>,
    headers: HeaderMap,
    area: &'static str,
    required: RoleSet,
) -> Response
where
    S: ApplicationStore,
    I: IdentityProvider,
    P: ProfileStore,
    N: NotificationStore,
{
    match state.guard.require_role(session_token(&headers), required) {
        Ok(session) => area_payload(area, &session, state.notifications.as_ref()),
        Err(redirect) => redirect.into_response(),
    }
}

pub(crate) async fn admin_area_handler<S, I, P, N>(
    State(state): State<LicensingState<S, I, P, N>>,
    headers: HeaderMap,
) -> Response
where
    S: ApplicationStore,
    I: IdentityProvider,
    P: ProfileStore,
    N: NotificationStore,
{
    area_handler(state, headers, "admin", ADMIN_ONLY).await
}

pub(crate) async fn expert_area_handler<S, I, P, N>(
    State(state): State<LicensingState<S, I, P, N>>,
    headers: HeaderMap,
) -> Response
where
    S: ApplicationStore,
    I: IdentityProvider,
    P: ProfileStore,
    N: NotificationStore,
{
    area_handler(state, headers, "expert", EXPERT_ONLY).await
}

pub(crate) async fn agency_area_handler<S, I, P, N>(
    State(state): State<LicensingState<S, I, P, N>>,
    headers: HeaderMap,
) -> Response
where
    S: ApplicationStore,
    I: IdentityProvider,
    P: ProfileStore,
    N: NotificationStore,
{
    area_handler(state, headers, "agency", AGENCY_ROLES).await
}

pub(crate) async fn close_handler<S, I, P, N>(
    State(state): State<LicensingState<S, I, P, N>>,
    headers: HeaderMap,
    Path(application_id): Path<String>,
) -> Response
where
    S: ApplicationStore,
    I: IdentityProvider,
    P: ProfileStore,
    N: NotificationStore,
{
    let session = match state
        .guard
        .require_role(session_token(&headers), LIFECYCLE_ROLES)
    {
        Ok(session) => session,
        Err(redirect) => return redirect.into_response(),
    };

    let id = ApplicationId(application_id);
    match state.lifecycle.close_application(&id) {
        Ok(outcome) => {
            tracing::info!(
                application_id = %id.0,
                closed_by = %session.user.id,
                ?outcome,
                "application close accepted"
            );
            (StatusCode::OK, Json(CloseReceipt::ok())).into_response()
        }
        Err(err) => {
            let status = match &err {
                CloseError::NotFound => StatusCode::NOT_FOUND,
                CloseError::Progress => StatusCode::PRECONDITION_FAILED,
                CloseError::Update(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, Json(CloseReceipt::from(&err))).into_response()
        }
    }
}

pub(crate) async fn application_status_handler<S, I, P, N>(
    State(state): State<LicensingState<S, I, P, N>>,
    headers: HeaderMap,
    Path(application_id): Path<String>,
) -> Response
where
    S: ApplicationStore,
    I: IdentityProvider,
    P: ProfileStore,
    N: NotificationStore,
{
    if let Err(redirect) = state.guard.require_role(session_token(&headers), ANY_ROLE) {
        return redirect.into_response();
    }

    let id = ApplicationId(application_id);
    match state.applications.fetch(&id) {
        Ok(Some(application)) => {
            let payload = json!({
                "application_id": application.id.0,
                "status": application.status.label(),
                "progress_percentage": application.progress(),
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        // An unreadable row is indistinguishable from a missing one for the
        // caller; the store detail stays in the log.
        Ok(None) => {
            let payload = json!({ "error": "Application not found" });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(err) => {
            tracing::warn!(application_id = %id.0, error = %err, "application fetch failed");
            let payload = json!({ "error": "Application not found" });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn unread_count_handler<S, I, P, N>(
    State(state): State<LicensingState<S, I, P, N>>,
    headers: HeaderMap,
) -> Response
where
    S: ApplicationStore,
    I: IdentityProvider,
    P: ProfileStore,
    N: NotificationStore,
{
    let session = match state.guard.require_role(session_token(&headers), ANY_ROLE) {
        Ok(session) => session,
        Err(redirect) => return redirect.into_response(),
    };

    match state.notifications.unread_count(&session.user.id) {
        Ok(count) => (StatusCode::OK, Json(json!({ "count": count }))).into_response(),
        Err(err) => {
            tracing::warn!(user_id = %session.user.id, error = %err, "unread count failed");
            let payload = json!({ "error": "Notification count unavailable" });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
