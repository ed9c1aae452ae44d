//! Session middleware configuration.
//!
//! Sessions live in process memory, so a restart logs everyone out.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::CrmConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "mw_crm_session";

/// Session key holding the client's `SessionState`.
pub const SESSION_STATE_KEY: &str = "session_state";

/// Session expiry time in seconds (12 hours, one shift).
const SESSION_EXPIRY_SECONDS: i64 = 12 * 60 * 60;

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(config: &CrmConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
}
