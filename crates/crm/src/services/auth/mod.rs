//! Staff authentication and session state.
//!
//! Credentials are checked against an [`AccountDirectory`]. The default
//! directory is a fixed table defined at startup; a YAML file can replace
//! it. Passwords are plaintext compared for equality. There is no hashing,
//! lockout, or expiry.

mod error;

pub use error::{AccessError, AccountsError, AuthError};

use std::collections::HashSet;
use std::path::Path;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use monster_wash_core::{Session, StaffRole};

/// Source of truth for staff credentials.
pub trait AccountDirectory: Send + Sync {
    /// The session for `username` if `password` is correct.
    fn verify(&self, username: &str, password: &str) -> Option<Session>;
}

/// A staff login.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct UserAccount {
    pub username: String,
    pub password: SecretString,
    pub role: StaffRole,
    pub display_name: String,
}

impl std::fmt::Debug for UserAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserAccount")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("role", &self.role)
            .field("display_name", &self.display_name)
            .finish()
    }
}

impl UserAccount {
    #[must_use]
    pub fn new(username: &str, password: &str, role: StaffRole, display_name: &str) -> Self {
        Self {
            username: username.to_owned(),
            password: SecretString::from(password.to_owned()),
            role,
            display_name: display_name.to_owned(),
        }
    }

    fn session(&self) -> Session {
        Session {
            username: self.username.clone(),
            display_name: self.display_name.clone(),
            role: self.role,
        }
    }
}

/// Accounts file entry.
#[derive(Deserialize)]
struct AccountEntry {
    username: String,
    password: String,
    role: StaffRole,
    display_name: Option<String>,
}

/// A fixed set of accounts held in memory.
#[derive(Debug, Clone)]
pub struct StaticAccounts {
    accounts: Vec<UserAccount>,
}

impl StaticAccounts {
    #[must_use]
    pub const fn new(accounts: Vec<UserAccount>) -> Self {
        Self { accounts }
    }

    /// The built-in staff table: `boss` (admin), `staff1` and `staff2` (agents).
    #[must_use]
    pub fn default_staff() -> Self {
        Self::new(vec![
            UserAccount::new("boss", "888", StaffRole::Admin, "boss"),
            UserAccount::new("staff1", "111", StaffRole::Agent, "staff1"),
            UserAccount::new("staff2", "222", StaffRole::Agent, "staff2"),
        ])
    }

    /// Parse a YAML list of `{username, password, role, display_name}` entries.
    ///
    /// `display_name` defaults to the username.
    ///
    /// # Errors
    ///
    /// Returns `AccountsError` if the YAML is invalid, empty, or repeats a username.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, AccountsError> {
        let entries: Vec<AccountEntry> = serde_yaml::from_str(yaml)?;
        if entries.is_empty() {
            return Err(AccountsError::Empty);
        }

        let mut seen = HashSet::new();
        let mut accounts = Vec::with_capacity(entries.len());
        for entry in entries {
            if !seen.insert(entry.username.clone()) {
                return Err(AccountsError::Duplicate(entry.username));
            }
            let display_name = entry.display_name.unwrap_or_else(|| entry.username.clone());
            accounts.push(UserAccount {
                username: entry.username,
                password: SecretString::from(entry.password),
                role: entry.role,
                display_name,
            });
        }

        Ok(Self::new(accounts))
    }

    /// Load accounts from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `AccountsError` if the file cannot be read or parsed.
    pub fn from_yaml_file(path: &Path) -> Result<Self, AccountsError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// The configured accounts.
    #[must_use]
    pub fn accounts(&self) -> &[UserAccount] {
        &self.accounts
    }
}

impl AccountDirectory for StaticAccounts {
    fn verify(&self, username: &str, password: &str) -> Option<Session> {
        self.accounts
            .iter()
            .find(|a| a.username == username)
            .filter(|a| a.password.expose_secret() == password)
            .map(UserAccount::session)
    }
}

/// Check credentials and open a session.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` for an unknown user or a wrong password.
pub fn authenticate(
    directory: &dyn AccountDirectory,
    username: &str,
    password: &str,
) -> Result<Session, AuthError> {
    match directory.verify(username, password) {
        Some(session) => {
            tracing::info!(username, role = %session.role, "Staff logged in");
            Ok(session)
        }
        None => {
            tracing::warn!(username, "Login failed");
            Err(AuthError::InvalidCredentials)
        }
    }
}

/// Login state of one client.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "session", rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn(Session),
}

impl SessionState {
    /// Authenticate and move from `LoggedOut` to `LoggedIn`. On failure the
    /// state is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AlreadyLoggedIn` when a session is active, without
    /// checking the credentials, and `AuthError::InvalidCredentials` if the
    /// credentials are wrong.
    pub fn login(
        &mut self,
        directory: &dyn AccountDirectory,
        username: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        if let Self::LoggedIn(current) = self {
            tracing::warn!(
                username,
                current = %current.username,
                "Login rejected, already logged in"
            );
            return Err(AuthError::AlreadyLoggedIn);
        }
        let session = authenticate(directory, username, password)?;
        *self = Self::LoggedIn(session.clone());
        Ok(session)
    }

    /// Move to `LoggedOut`.
    pub fn logout(&mut self) {
        if let Self::LoggedIn(session) = self {
            tracing::info!(username = %session.username, "Staff logged out");
        }
        *self = Self::LoggedOut;
    }

    #[must_use]
    pub const fn current(&self) -> Option<&Session> {
        match self {
            Self::LoggedIn(session) => Some(session),
            Self::LoggedOut => None,
        }
    }

    /// The logged-in session.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::Unauthenticated` when logged out.
    pub const fn require(&self) -> Result<&Session, AccessError> {
        match self {
            Self::LoggedIn(session) => Ok(session),
            Self::LoggedOut => Err(AccessError::Unauthenticated),
        }
    }

    /// The logged-in session, if it belongs to an admin.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::Unauthenticated` when logged out and
    /// `AccessError::Forbidden` for agents.
    pub fn require_admin(&self) -> Result<&Session, AccessError> {
        let session = self.require()?;
        if session.is_admin() {
            Ok(session)
        } else {
            Err(AccessError::Forbidden)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_boss_is_admin() {
        let session = authenticate(&StaticAccounts::default_staff(), "boss", "888").unwrap();
        assert_eq!(session.role, StaffRole::Admin);
        assert_eq!(session.display_name, "boss");
    }

    #[test]
    fn test_failures_are_indistinguishable() {
        let accounts = StaticAccounts::default_staff();
        let wrong_password = authenticate(&accounts, "boss", "wrong").unwrap_err();
        let unknown_user = authenticate(&accounts, "nouser", "888").unwrap_err();
        assert_eq!(wrong_password, unknown_user);
        assert_eq!(wrong_password, AuthError::InvalidCredentials);
    }

    #[test]
    fn test_username_is_exact() {
        let accounts = StaticAccounts::default_staff();
        assert!(authenticate(&accounts, "Boss", "888").is_err());
        assert!(authenticate(&accounts, "boss ", "888").is_err());
    }

    #[test]
    fn test_state_machine() {
        let accounts = StaticAccounts::default_staff();
        let mut state = SessionState::default();
        assert_eq!(state, SessionState::LoggedOut);
        assert_eq!(state.require(), Err(AccessError::Unauthenticated));

        assert!(state.login(&accounts, "staff1", "nope").is_err());
        assert_eq!(state, SessionState::LoggedOut);

        let session = state.login(&accounts, "staff1", "111").unwrap();
        assert_eq!(session.role, StaffRole::Agent);
        assert_eq!(state.require_admin(), Err(AccessError::Forbidden));

        state.logout();
        assert_eq!(state, SessionState::LoggedOut);
        state.logout();
        assert!(state.current().is_none());
    }

    #[test]
    fn test_login_while_logged_in_is_rejected() {
        let accounts = StaticAccounts::default_staff();
        let mut state = SessionState::default();
        state.login(&accounts, "boss", "888").unwrap();

        assert_eq!(
            state.login(&accounts, "staff1", "111"),
            Err(AuthError::AlreadyLoggedIn)
        );
        assert_eq!(
            state.login(&accounts, "staff1", "bad"),
            Err(AuthError::AlreadyLoggedIn)
        );
        assert_eq!(state.current().unwrap().username, "boss");

        state.logout();
        assert_eq!(state.login(&accounts, "staff1", "111").unwrap().username, "staff1");
    }

    #[test]
    fn test_yaml_accounts() {
        let yaml = r"
- username: manager
  password: secret-pw
  role: admin
  display_name: 店长
- username: wash1
  password: '1234'
  role: agent
";
        let accounts = StaticAccounts::from_yaml_str(yaml).unwrap();
        assert_eq!(accounts.accounts().len(), 2);

        let session = accounts.verify("wash1", "1234").unwrap();
        assert_eq!(session.display_name, "wash1");
        assert_eq!(accounts.verify("manager", "secret-pw").unwrap().display_name, "店长");
        assert!(accounts.verify("boss", "888").is_none());
    }

    #[test]
    fn test_yaml_rejects_duplicates_and_empty() {
        let dup = "- {username: a, password: x, role: agent}\n- {username: a, password: y, role: admin}\n";
        assert!(matches!(
            StaticAccounts::from_yaml_str(dup),
            Err(AccountsError::Duplicate(name)) if name == "a"
        ));
        assert!(matches!(
            StaticAccounts::from_yaml_str("[]"),
            Err(AccountsError::Empty)
        ));
    }

    #[test]
    fn test_debug_redacts_password() {
        let account = UserAccount::new("boss", "888", StaffRole::Admin, "boss");
        let debug = format!("{account:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("888"));
    }

    #[test]
    fn test_session_state_serde_roundtrip() {
        let state = SessionState::LoggedIn(Session {
            username: "staff2".to_owned(),
            display_name: "staff2".to_owned(),
            role: StaffRole::Agent,
        });
        let json = serde_json::to_string(&state).unwrap();
        let back: SessionState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
