//! Staff authentication error types.

use thiserror::Error;

/// Errors that can occur when logging in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Unknown username or wrong password. The two are deliberately not told apart.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A staff member is already logged in on this client; log out first.
    #[error("already logged in")]
    AlreadyLoggedIn,
}

/// Errors returned when a session may not perform an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    /// No one is logged in.
    #[error("not logged in")]
    Unauthenticated,

    /// The logged-in staff member lacks the required role.
    #[error("admin role required")]
    Forbidden,
}

/// Errors that can occur when loading an accounts file.
#[derive(Debug, Error)]
pub enum AccountsError {
    /// The file could not be read.
    #[error("failed to read accounts file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a valid accounts list.
    #[error("invalid accounts file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The same username appears more than once.
    #[error("duplicate username: {0}")]
    Duplicate(String),

    /// The file lists no accounts.
    #[error("accounts file lists no accounts")]
    Empty,
}
