//! Authentication extractors for admin.
//!
//! The sign-in flow stores a [`CurrentStaff`] in the session. Every API route
//! requires one; the notification feed additionally excludes cashiers.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_sessions::Session;

use crate::error::set_sentry_user;
use crate::models::{CurrentStaff, session_keys};

/// Extractor that requires a signed-in staff member.
///
/// ```rust,ignore
/// async fn protected_handler(RequireStaff(staff): RequireStaff) -> impl IntoResponse {
///     format!("Hello, {}!", staff.name)
/// }
/// ```
pub struct RequireStaff(pub CurrentStaff);

/// Extractor that requires a staff member allowed to read notifications.
pub struct RequireNotificationAccess(pub CurrentStaff);

/// Rejection for the staff extractors.
#[derive(Debug)]
pub enum StaffAuthRejection {
    /// No session layer ran for this request.
    MissingSession,
    /// Nobody is signed in.
    Unauthorized,
    /// Signed in, but the role may not use this resource.
    Forbidden,
}

impl IntoResponse for StaffAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::MissingSession => {
                tracing::error!("Session layer missing for staff route");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "staff sign in required" })),
            )
                .into_response(),
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "your role cannot access this resource" })),
            )
                .into_response(),
        }
    }
}

async fn current_staff(parts: &Parts) -> Result<CurrentStaff, StaffAuthRejection> {
    let session = parts
        .extensions
        .get::<Session>()
        .ok_or(StaffAuthRejection::MissingSession)?;

    let staff: CurrentStaff = session
        .get(session_keys::CURRENT_STAFF)
        .await
        .ok()
        .flatten()
        .ok_or(StaffAuthRejection::Unauthorized)?;

    set_sentry_user(&staff.id.to_string(), &staff.name);
    Ok(staff)
}

impl<S> FromRequestParts<S> for RequireStaff
where
    S: Send + Sync,
{
    type Rejection = StaffAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        current_staff(parts).await.map(Self)
    }
}

impl<S> FromRequestParts<S> for RequireNotificationAccess
where
    S: Send + Sync,
{
    type Rejection = StaffAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let staff = current_staff(parts).await?;
        if !staff.role.can_view_notifications() {
            return Err(StaffAuthRejection::Forbidden);
        }
        Ok(Self(staff))
    }
}

/// Helper to set the current staff member in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_staff(
    session: &Session,
    staff: &CurrentStaff,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_STAFF, staff).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_status_codes() {
        assert_eq!(
            StaffAuthRejection::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            StaffAuthRejection::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            StaffAuthRejection::MissingSession.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
