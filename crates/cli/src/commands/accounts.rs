//! Staff account listing.

use tracing::info;

use monster_wash_crm::config::CrmConfig;

use super::CliError;

/// Log every configured username and role. Passwords are never shown.
///
/// # Errors
///
/// Returns `CliError::Config` if the accounts file cannot be loaded.
pub fn list(config: &CrmConfig) -> Result<(), CliError> {
    let accounts = config.accounts()?;
    let source = config
        .accounts_file
        .as_ref()
        .map_or_else(|| "built-in".to_string(), |p| p.display().to_string());

    info!(source = %source, count = accounts.accounts().len(), "Staff accounts");
    for account in accounts.accounts() {
        info!(
            username = %account.username,
            role = %account.role,
            display_name = %account.display_name,
            "  account"
        );
    }
    Ok(())
}
