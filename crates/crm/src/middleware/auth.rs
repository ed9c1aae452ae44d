//! Authentication extractors.
//!
//! Provides extractors for requiring a logged-in staff member in route handlers.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use monster_wash_core::Session as StaffSession;

use super::session::SESSION_STATE_KEY;
use crate::error::AppError;
use crate::services::SessionState;

/// Extractor that requires any logged-in staff member.
///
/// Rejects with 401 Unauthorized when logged out.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireStaff(staff): RequireStaff) -> String {
///     format!("Hello, {}!", staff.display_name)
/// }
/// ```
pub struct RequireStaff(pub StaffSession);

impl<S> FromRequestParts<S> for RequireStaff
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let state = load_session_state(&session_from_parts(parts)?).await?;
        Ok(Self(state.require()?.clone()))
    }
}

/// Extractor that requires an admin.
///
/// Rejects with 401 when logged out and 403 Forbidden for agents.
pub struct RequireAdmin(pub StaffSession);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let state = load_session_state(&session_from_parts(parts)?).await?;
        Ok(Self(state.require_admin()?.clone()))
    }
}

fn session_from_parts(parts: &Parts) -> Result<Session, AppError> {
    parts
        .extensions
        .get::<Session>()
        .cloned()
        .ok_or_else(|| AppError::Internal("session layer not installed".to_string()))
}

/// Read the client's login state; a fresh session is logged out.
///
/// # Errors
///
/// Returns `AppError::Internal` if the session store fails.
pub async fn load_session_state(session: &Session) -> Result<SessionState, AppError> {
    Ok(session
        .get::<SessionState>(SESSION_STATE_KEY)
        .await?
        .unwrap_or_default())
}

/// Persist the client's login state.
///
/// # Errors
///
/// Returns `AppError::Internal` if the session store fails.
pub async fn save_session_state(session: &Session, state: &SessionState) -> Result<(), AppError> {
    match state {
        SessionState::LoggedIn(_) => session.insert(SESSION_STATE_KEY, state).await?,
        SessionState::LoggedOut => session.flush().await?,
    }
    Ok(())
}
