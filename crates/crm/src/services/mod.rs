//! Business services.
//!
//! - [`editor`] - validates and appends new leads
//! - [`query`] - counts, search, and role-scoped views
//! - [`auth`] - credential checks and session state

pub mod auth;
pub mod editor;
pub mod query;

pub use auth::{
    AccessError, AccountDirectory, AccountsError, AuthError, SessionState, StaticAccounts,
    UserAccount, authenticate,
};
pub use editor::{LeadField, LeadForm, RecordEditor, RequiredFields, SubmitError, ValidationError};
pub use query::{
    Dashboard, LeadQuery, SearchOptions, SearchScope, StatusCount, Summary, dashboard, filter,
    summarize,
};
