//! Logged-in staff identity.

use serde::{Deserialize, Serialize};

use super::StaffRole;

/// The identity of a logged-in staff member.
///
/// Minimal data kept for the lifetime of one interactive session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Login name.
    pub username: String,
    /// Name stamped on the leads this staff member creates.
    pub display_name: String,
    /// Visibility level.
    pub role: StaffRole,
}

impl Session {
    /// Whether this session may see every lead.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == StaffRole::Admin
    }
}
