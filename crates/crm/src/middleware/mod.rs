//! HTTP middleware for the CRM.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors, binary only)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with in-memory store)
//! 4. Auth extractors (`RequireStaff`, `RequireAdmin`) on protected routes

pub mod auth;
pub mod session;

pub use auth::{RequireAdmin, RequireStaff, load_session_state, save_session_state};
pub use session::create_session_layer;
