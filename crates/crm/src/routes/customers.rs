//! Lead list and entry handlers.

use axum::{
    Form, Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Deserializer, de};
use tracing::instrument;

use monster_wash_core::{CustomerRecord, LeadStatus};

use super::blocking;
use crate::error::AppError;
use crate::middleware::RequireStaff;
use crate::services::{LeadForm, LeadQuery, RecordEditor};
use crate::state::AppState;

/// Lead list query parameters.
#[derive(Debug, Deserialize)]
pub struct CustomerQuery {
    /// Search term.
    pub q: Option<String>,
    /// Funnel stage filter; an empty value means any stage.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status: Option<LeadStatus>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<LeadStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().map_err(de::Error::custom))
        .transpose()
}

/// Build the customers router.
pub fn router() -> Router<AppState> {
    Router::new().route("/customers", get(index).post(create))
}

/// Leads visible to the caller, searched and filtered.
///
/// GET /customers
#[instrument(skip(staff, state), fields(username = %staff.username))]
async fn index(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<CustomerQuery>,
) -> Result<Json<Vec<CustomerRecord>>, AppError> {
    let query = LeadQuery {
        term: params.q,
        status: params.status,
        options: state.config().search,
    };
    let store = state.store();

    let records = blocking(move || Ok(store.query(&query, &staff)?)).await?;
    Ok(Json(records))
}

/// Add a lead owned by the caller.
///
/// POST /customers
#[instrument(skip(staff, state, form), fields(username = %staff.username))]
async fn create(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Form(form): Form<LeadForm>,
) -> Result<(StatusCode, Json<CustomerRecord>), AppError> {
    let store = state.store();
    let required = state.config().required;

    let record = blocking(move || {
        let editor = RecordEditor::new(store.as_ref(), required);
        Ok(editor.submit(&staff, form)?)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(record)))
}
