//! Customer lead record.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, de};

use super::{CustomerName, LeadStatus};

/// A single customer lead.
///
/// Field order matches the column order of the lead file. Records are
/// immutable once stored: there is no update or delete.
///
/// Files written by the old single-page tool load too: their Chinese column
/// headers are accepted as aliases, and their `MM-DD` dates are placed in
/// the current year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    /// Customer name (required).
    #[serde(alias = "姓名")]
    pub name: CustomerName,
    /// Contact phone number.
    #[serde(default, alias = "电话")]
    pub phone: String,
    /// Company or vehicle model.
    #[serde(default, alias = "公司")]
    pub vehicle: String,
    /// Funnel stage.
    #[serde(alias = "跟进状态")]
    pub status: LeadStatus,
    /// Free-form notes.
    #[serde(default, alias = "备注")]
    pub notes: String,
    /// Display name of the staff member who created the lead.
    #[serde(default)]
    pub owner: String,
    /// Day the lead was entered, written as `YYYY-MM-DD`.
    #[serde(alias = "添加日期", deserialize_with = "deserialize_created_on")]
    pub created_on: NaiveDate,
}

fn deserialize_created_on<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_created_on(&raw, chrono::Local::now().year())
        .ok_or_else(|| de::Error::custom(format!("invalid date: {raw}")))
}

/// Parse `YYYY-MM-DD`, or `MM-DD` placed in `year`.
fn parse_created_on(raw: &str, year: i32) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{year}-{raw}"), "%Y-%m-%d"))
        .ok()
}

impl CustomerRecord {
    /// Whether `agent` created this lead.
    #[must_use]
    pub fn is_owned_by(&self, agent: &str) -> bool {
        self.owner == agent
    }

    /// Text fields in column order, borrowed.
    ///
    /// The status contributes both its value and its label. The date is not
    /// included; it displays as `YYYY-MM-DD`.
    #[must_use]
    pub fn text_fields(&self) -> [&str; 7] {
        [
            self.name.as_str(),
            &self.phone,
            &self.vehicle,
            self.status.as_str(),
            self.status.label(),
            &self.notes,
            &self.owner,
        ]
    }
}
