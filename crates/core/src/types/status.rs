//! Status and role enums.
//!
//! Both enums are closed sets. [`LeadStatus`] also accepts the labels that
//! older lead files were written with, so a legacy file loads unchanged.

use serde::{Deserialize, Serialize};

/// Funnel stage of a customer lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    /// First contact, no expressed interest yet.
    #[default]
    #[serde(alias = "潜在")]
    Potential,
    /// The customer has shown interest.
    #[serde(alias = "意向")]
    Interested,
    /// The deal closed.
    #[serde(alias = "成交")]
    Won,
    /// The lead went away.
    #[serde(alias = "流失")]
    Lost,
}

impl LeadStatus {
    /// Every status, in funnel order.
    pub const ALL: [Self; 4] = [Self::Potential, Self::Interested, Self::Won, Self::Lost];

    /// Machine value used in files and query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Potential => "potential",
            Self::Interested => "interested",
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }

    /// Short label shown to staff at the counter.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Potential => "潜在",
            Self::Interested => "意向",
            Self::Won => "成交",
            Self::Lost => "流失",
        }
    }

    /// Whether the lead is still being worked (not yet won or lost).
    #[must_use]
    pub const fn is_in_pipeline(self) -> bool {
        matches!(self, Self::Potential | Self::Interested)
    }
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LeadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s || status.label() == s)
            .ok_or_else(|| format!("invalid lead status: {s}"))
    }
}

/// Staff role with different visibility levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    /// Sees every lead and the dashboard.
    Admin,
    /// Sees only the leads they created.
    Agent,
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Agent => write!(f, "agent"),
        }
    }
}

impl std::str::FromStr for StaffRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "agent" => Ok(Self::Agent),
            _ => Err(format!("invalid staff role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_stages() {
        assert!(LeadStatus::Potential.is_in_pipeline());
        assert!(LeadStatus::Interested.is_in_pipeline());
        assert!(!LeadStatus::Won.is_in_pipeline());
        assert!(!LeadStatus::Lost.is_in_pipeline());
    }

    #[test]
    fn test_status_from_str_accepts_value_and_label() {
        assert_eq!("won".parse::<LeadStatus>().unwrap(), LeadStatus::Won);
        assert_eq!("成交".parse::<LeadStatus>().unwrap(), LeadStatus::Won);
        assert!("closed".parse::<LeadStatus>().is_err());
    }

    #[test]
    fn test_status_serde_legacy_label() {
        let status: LeadStatus = serde_json::from_str("\"意向\"").unwrap();
        assert_eq!(status, LeadStatus::Interested);

        let json = serde_json::to_string(&LeadStatus::Interested).unwrap();
        assert_eq!(json, "\"interested\"");
    }

    #[test]
    fn test_role_display_roundtrip() {
        for role in [StaffRole::Admin, StaffRole::Agent] {
            assert_eq!(role.to_string().parse::<StaffRole>().unwrap(), role);
        }
        assert!("boss".parse::<StaffRole>().is_err());
    }
}
