//! Authentication route handlers.

use axum::{
    Form, Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use monster_wash_core::Session as StaffSession;

use crate::error::AppError;
use crate::middleware::{RequireStaff, load_session_state, save_session_state};
use crate::state::AppState;

/// Login form.
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/session", get(current))
}

/// Check credentials and start a session.
///
/// POST /auth/login
#[instrument(skip(state, session))]
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Json<StaffSession>, AppError> {
    let mut login_state = load_session_state(&session).await?;
    let staff = login_state.login(state.accounts(), &form.username, &form.password)?;
    save_session_state(&session, &login_state).await?;
    Ok(Json(staff))
}

/// Logout and clear session.
///
/// POST /auth/logout
async fn logout(session: Session) -> Result<StatusCode, AppError> {
    let mut login_state = load_session_state(&session).await?;
    login_state.logout();
    save_session_state(&session, &login_state).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The logged-in staff member.
///
/// GET /auth/session
async fn current(RequireStaff(staff): RequireStaff) -> Json<StaffSession> {
    Json(staff)
}
