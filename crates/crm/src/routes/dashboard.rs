//! Summary and admin dashboard handlers.

use axum::{Json, Router, extract::State, routing::get};
use tracing::instrument;

use super::blocking;
use crate::error::AppError;
use crate::middleware::{RequireAdmin, RequireStaff};
use crate::services::{Dashboard, LeadQuery, Summary, dashboard, summarize};
use crate::state::AppState;

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(summary))
        .route("/dashboard", get(admin_dashboard))
}

/// Totals over the leads the caller can see.
///
/// GET /summary
#[instrument(skip(staff, state), fields(username = %staff.username))]
async fn summary(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
) -> Result<Json<Summary>, AppError> {
    let store = state.store();
    let visible = blocking(move || Ok(store.query(&LeadQuery::default(), &staff)?)).await?;
    Ok(Json(summarize(&visible)))
}

/// Counts over every lead.
///
/// GET /dashboard
#[instrument(skip(admin, state), fields(username = %admin.username))]
async fn admin_dashboard(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Dashboard>, AppError> {
    let store = state.store();
    let records = blocking(move || Ok(store.scan()?)).await?;
    Ok(Json(dashboard(&records, &admin)?))
}
