//! Query view: counts and the role-scoped, searched projection of the lead table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use monster_wash_core::{CustomerRecord, LeadStatus, Session};

use super::auth::AccessError;

/// Which fields a search term is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    /// Customer name only.
    NameOnly,
    /// Every field of the record.
    #[default]
    AllFields,
}

impl std::str::FromStr for SearchScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" | "name_only" => Ok(Self::NameOnly),
            "all" | "all_fields" => Ok(Self::AllFields),
            _ => Err(format!("invalid search scope: {s}")),
        }
    }
}

/// How search terms are matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchOptions {
    pub scope: SearchScope,
    pub case_sensitive: bool,
}

/// A request for a view of the lead table.
#[derive(Debug, Clone, Default)]
pub struct LeadQuery {
    /// Substring to search for, matched as given; empty means no search.
    pub term: Option<String>,
    /// Keep only leads in this stage.
    pub status: Option<LeadStatus>,
    pub options: SearchOptions,
}

impl LeadQuery {
    /// A query for `term` with default options.
    #[must_use]
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            term: Some(term.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_status(mut self, status: LeadStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub const fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    fn matcher(&self) -> Option<Matcher> {
        let term = self.term.as_deref().filter(|t| !t.is_empty())?;
        Some(Matcher::new(term, self.options))
    }
}

struct Matcher {
    needle: String,
    options: SearchOptions,
}

impl Matcher {
    fn new(term: &str, options: SearchOptions) -> Self {
        let needle = if options.case_sensitive {
            term.to_owned()
        } else {
            term.to_lowercase()
        };
        Self { needle, options }
    }

    fn contains(&self, haystack: &str) -> bool {
        if self.options.case_sensitive {
            haystack.contains(&self.needle)
        } else {
            haystack.to_lowercase().contains(&self.needle)
        }
    }

    fn matches(&self, record: &CustomerRecord) -> bool {
        match self.options.scope {
            SearchScope::NameOnly => self.contains(record.name.as_str()),
            SearchScope::AllFields => {
                record.text_fields().iter().any(|v| self.contains(v))
                    || self.contains(&record.created_on.to_string())
            }
        }
    }
}

/// The leads `session` may see that match `query`, in insertion order.
///
/// Agents only see leads they own; admins see everything.
#[must_use]
pub fn filter(
    records: &[CustomerRecord],
    query: &LeadQuery,
    session: &Session,
) -> Vec<CustomerRecord> {
    let matcher = query.matcher();

    records
        .iter()
        .filter(|r| session.is_admin() || r.is_owned_by(&session.display_name))
        .filter(|r| query.status.is_none_or(|status| r.status == status))
        .filter(|r| matcher.as_ref().is_none_or(|m| m.matches(r)))
        .cloned()
        .collect()
}

/// Headline numbers for a set of leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub won: usize,
    pub in_pipeline: usize,
    /// Whole percent of leads won, truncated. Zero when there are no leads.
    pub win_rate: usize,
}

/// Count totals and the win rate.
#[must_use]
pub fn summarize(records: &[CustomerRecord]) -> Summary {
    let total = records.len();
    let won = records
        .iter()
        .filter(|r| r.status == LeadStatus::Won)
        .count();
    let in_pipeline = records
        .iter()
        .filter(|r| r.status.is_in_pipeline())
        .count();
    let win_rate = if total > 0 { won * 100 / total } else { 0 };

    Summary {
        total,
        won,
        in_pipeline,
        win_rate,
    }
}

/// Count of leads in one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: LeadStatus,
    pub label: &'static str,
    pub count: usize,
}

/// Admin overview of the whole table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub summary: Summary,
    /// Every stage in funnel order, including empty ones.
    pub by_status: Vec<StatusCount>,
    /// Leads per owning agent, sorted by agent name.
    pub by_agent: BTreeMap<String, usize>,
}

/// Build the admin dashboard over every lead, ignoring role scoping.
///
/// # Errors
///
/// Returns `AccessError::Forbidden` if `session` is not an admin.
pub fn dashboard(records: &[CustomerRecord], session: &Session) -> Result<Dashboard, AccessError> {
    if !session.is_admin() {
        return Err(AccessError::Forbidden);
    }

    let by_status = LeadStatus::ALL
        .into_iter()
        .map(|status| StatusCount {
            status,
            label: status.label(),
            count: records.iter().filter(|r| r.status == status).count(),
        })
        .collect();

    let mut by_agent = BTreeMap::new();
    for record in records {
        *by_agent.entry(record.owner.clone()).or_insert(0) += 1;
    }

    Ok(Dashboard {
        summary: summarize(records),
        by_status,
        by_agent,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::NaiveDate;
    use monster_wash_core::{CustomerName, StaffRole};

    use super::*;

    fn record(name: &str, vehicle: &str, status: LeadStatus, owner: &str) -> CustomerRecord {
        CustomerRecord {
            name: CustomerName::parse(name).unwrap(),
            phone: String::new(),
            vehicle: vehicle.to_owned(),
            status,
            notes: String::new(),
            owner: owner.to_owned(),
            created_on: NaiveDate::from_ymd_opt(2026, 10, 14).unwrap(),
        }
    }

    fn records() -> Vec<CustomerRecord> {
        vec![
            record("Alice", "Audi A6", LeadStatus::Potential, "staff1"),
            record("bob", "BMW X5", LeadStatus::Won, "staff2"),
            record("张三", "Tesla", LeadStatus::Interested, "staff1"),
            record("ALICE Two", "Audi Q5", LeadStatus::Lost, "staff2"),
        ]
    }

    fn admin() -> Session {
        Session {
            username: "boss".to_owned(),
            display_name: "boss".to_owned(),
            role: StaffRole::Admin,
        }
    }

    fn agent(name: &str) -> Session {
        Session {
            username: name.to_owned(),
            display_name: name.to_owned(),
            role: StaffRole::Agent,
        }
    }

    fn names(records: &[CustomerRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_empty_term_is_noop() {
        let all = records();
        assert_eq!(filter(&all, &LeadQuery::default(), &admin()), all);
        assert_eq!(filter(&all, &LeadQuery::search(""), &admin()), all);
    }

    #[test]
    fn test_whitespace_in_term_is_literal() {
        let leads = vec![
            record("LiSi", "", LeadStatus::Potential, "staff1"),
            record("Li Si", "", LeadStatus::Potential, "staff1"),
        ];
        let found = filter(&leads, &LeadQuery::search(" Si"), &admin());
        assert_eq!(names(&found), ["Li Si"]);

        let found = filter(&leads, &LeadQuery::search(" "), &admin());
        assert_eq!(names(&found), ["Li Si"]);
    }

    #[test]
    fn test_search_matches_iso_date() {
        assert_eq!(filter(&records(), &LeadQuery::search("2026-10"), &admin()).len(), 4);
        assert!(filter(&records(), &LeadQuery::search("2025-"), &admin()).is_empty());
    }

    #[test]
    fn test_case_insensitive_search_keeps_order() {
        let found = filter(&records(), &LeadQuery::search("alice"), &admin());
        assert_eq!(names(&found), ["Alice", "ALICE Two"]);
    }

    #[test]
    fn test_case_sensitive_search() {
        let options = SearchOptions {
            scope: SearchScope::NameOnly,
            case_sensitive: true,
        };
        let query = LeadQuery::search("Alice").with_options(options);
        assert_eq!(names(&filter(&records(), &query, &admin())), ["Alice"]);
    }

    #[test]
    fn test_name_only_ignores_other_fields() {
        let options = SearchOptions {
            scope: SearchScope::NameOnly,
            case_sensitive: false,
        };
        let query = LeadQuery::search("audi").with_options(options);
        assert!(filter(&records(), &query, &admin()).is_empty());

        let all_fields = LeadQuery::search("audi");
        assert_eq!(filter(&records(), &all_fields, &admin()).len(), 2);
    }

    #[test]
    fn test_all_fields_matches_status_label_and_owner() {
        assert_eq!(names(&filter(&records(), &LeadQuery::search("成交"), &admin())), ["bob"]);
        assert_eq!(filter(&records(), &LeadQuery::search("staff2"), &admin()).len(), 2);
    }

    #[test]
    fn test_every_result_contains_term() {
        let term = "a";
        for r in filter(&records(), &LeadQuery::search(term), &admin()) {
            assert!(
                r.text_fields().iter().any(|v| v.to_lowercase().contains(term))
                    || r.created_on.to_string().contains(term)
            );
        }
    }

    #[test]
    fn test_agent_sees_only_own_leads() {
        let found = filter(&records(), &LeadQuery::default(), &agent("staff1"));
        assert_eq!(names(&found), ["Alice", "张三"]);
        assert!(found.iter().all(|r| r.owner == "staff1"));

        // Search never widens an agent's view
        assert!(filter(&records(), &LeadQuery::search("bob"), &agent("staff1")).is_empty());
    }

    #[test]
    fn test_admin_is_unscoped() {
        assert_eq!(filter(&records(), &LeadQuery::default(), &admin()).len(), 4);
    }

    #[test]
    fn test_status_filter() {
        let query = LeadQuery::default().with_status(LeadStatus::Won);
        assert_eq!(names(&filter(&records(), &query, &admin())), ["bob"]);
    }

    #[test]
    fn test_summary_win_rate() {
        let summary = summarize(&records());
        assert_eq!(summary.total, 4);
        assert_eq!(summary.won, 1);
        assert_eq!(summary.in_pipeline, 2);
        assert_eq!(summary.win_rate, 25);
    }

    #[test]
    fn test_summary_empty() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.win_rate, 0);
    }

    #[test]
    fn test_summary_truncates() {
        let three = &records()[..3];
        assert_eq!(summarize(three).win_rate, 33);
    }

    #[test]
    fn test_dashboard_counts() {
        let board = dashboard(&records(), &admin()).unwrap();
        assert_eq!(board.by_status.len(), 4);
        assert!(board.by_status.iter().all(|c| c.count == 1));
        assert_eq!(board.by_agent.get("staff1"), Some(&2));
        assert_eq!(board.by_agent.get("staff2"), Some(&2));
    }

    #[test]
    fn test_dashboard_includes_empty_stages() {
        let won_only = vec![record("bob", "", LeadStatus::Won, "staff2")];
        let board = dashboard(&won_only, &admin()).unwrap();
        let counts: Vec<usize> = board.by_status.iter().map(|c| c.count).collect();
        assert_eq!(counts, [0, 0, 1, 0]);
    }

    #[test]
    fn test_dashboard_rejects_agent() {
        assert!(matches!(
            dashboard(&records(), &agent("staff1")),
            Err(AccessError::Forbidden)
        ));
    }
}
