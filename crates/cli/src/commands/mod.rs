//! CLI command implementations.

pub mod accounts;
pub mod leads;
pub mod seed;

use thiserror::Error;

use monster_wash_core::Session;
use monster_wash_crm::config::{ConfigError, CrmConfig};
use monster_wash_crm::services::{AccessError, AuthError, SubmitError, authenticate};
use monster_wash_crm::store::StoreError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Submit(#[from] SubmitError),

    /// Seeding would overwrite existing leads.
    #[error("data file already exists: {0} (use --force to overwrite)")]
    DataFileExists(String),
}

/// Login flags shared by the staff commands.
#[derive(Debug, Clone, Copy)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Check `credentials` against the configured accounts.
///
/// # Errors
///
/// Returns `CliError::Auth` for bad credentials, or `CliError::Config` if the
/// accounts file cannot be loaded.
pub fn login(config: &CrmConfig, credentials: Credentials<'_>) -> Result<Session, CliError> {
    let accounts = config.accounts()?;
    Ok(authenticate(
        &accounts,
        credentials.username,
        credentials.password,
    )?)
}
