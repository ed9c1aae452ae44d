//! Lead entry and reports.

use tracing::info;

use monster_wash_core::LeadStatus;
use monster_wash_crm::config::CrmConfig;
use monster_wash_crm::services::{
    LeadForm, LeadQuery, RecordEditor, dashboard as build_dashboard, summarize,
};
use monster_wash_crm::store::{CsvRecordStore, RecordStore};

use super::{CliError, Credentials, login};

fn open_store(config: &CrmConfig) -> CsvRecordStore {
    CsvRecordStore::new(config.data_file.clone(), config.seed)
}

/// Add a lead owned by the logged-in staff member.
///
/// # Errors
///
/// Returns `CliError` for bad credentials, a rejected form, or a store failure.
pub fn add(
    config: &CrmConfig,
    credentials: Credentials<'_>,
    form: LeadForm,
) -> Result<(), CliError> {
    let session = login(config, credentials)?;
    let store = open_store(config);

    let record = RecordEditor::new(&store, config.required).submit(&session, form)?;
    info!(
        name = %record.name,
        status = record.status.label(),
        owner = %record.owner,
        "Lead added"
    );
    Ok(())
}

/// Log the leads visible to the logged-in staff member.
///
/// # Errors
///
/// Returns `CliError` for bad credentials or a store failure.
pub fn list(
    config: &CrmConfig,
    credentials: Credentials<'_>,
    term: Option<String>,
    status: Option<LeadStatus>,
) -> Result<(), CliError> {
    let session = login(config, credentials)?;
    let query = LeadQuery {
        term,
        status,
        options: config.search,
    };

    let records = open_store(config).query(&query, &session)?;
    info!(count = records.len(), "Leads");
    for record in &records {
        info!(
            name = %record.name,
            phone = %record.phone,
            vehicle = %record.vehicle,
            status = record.status.label(),
            owner = %record.owner,
            created_on = %record.created_on,
            notes = %record.notes,
            "  lead"
        );
    }
    Ok(())
}

/// Log totals over the leads visible to the logged-in staff member.
///
/// # Errors
///
/// Returns `CliError` for bad credentials or a store failure.
pub fn summary(config: &CrmConfig, credentials: Credentials<'_>) -> Result<(), CliError> {
    let session = login(config, credentials)?;
    let visible = open_store(config).query(&LeadQuery::default(), &session)?;
    let summary = summarize(&visible);

    info!(
        total = summary.total,
        won = summary.won,
        in_pipeline = summary.in_pipeline,
        win_rate = %format_args!("{}%", summary.win_rate),
        "Summary"
    );
    Ok(())
}

/// Log the admin dashboard.
///
/// # Errors
///
/// Returns `CliError::Access` for agents, or `CliError` for bad credentials
/// or a store failure.
pub fn dashboard(config: &CrmConfig, credentials: Credentials<'_>) -> Result<(), CliError> {
    let session = login(config, credentials)?;
    let records = open_store(config).scan()?;
    let board = build_dashboard(&records, &session)?;

    info!(
        total = board.summary.total,
        won = board.summary.won,
        in_pipeline = board.summary.in_pipeline,
        win_rate = %format_args!("{}%", board.summary.win_rate),
        "Dashboard"
    );
    for stage in &board.by_status {
        info!(status = stage.label, count = stage.count, "  by status");
    }
    for (agent, count) in &board.by_agent {
        info!(agent = %agent, count, "  by agent");
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::path::Path;

    use super::*;

    fn config_for(path: &Path) -> CrmConfig {
        let mut config = CrmConfig::from_lookup(|_| None).unwrap();
        config.data_file = path.to_path_buf();
        config
    }

    fn staff1() -> Credentials<'static> {
        Credentials {
            username: "staff1",
            password: "111",
        }
    }

    fn form(name: &str) -> LeadForm {
        LeadForm {
            name: name.to_owned(),
            ..LeadForm::default()
        }
    }

    #[test]
    fn test_add_then_list() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir.path().join("leads.csv"));

        add(&config, staff1(), form("张三")).unwrap();
        list(&config, staff1(), Some("张".to_owned()), None).unwrap();

        let records = open_store(&config).scan().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].owner, "staff1");
    }

    #[test]
    fn test_bad_password_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir.path().join("leads.csv"));
        let bad = Credentials {
            username: "staff1",
            password: "wrong",
        };

        assert!(matches!(add(&config, bad, form("张三")), Err(CliError::Auth(_))));
        assert!(!open_store(&config).exists());
    }

    #[test]
    fn test_dashboard_is_admin_only() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir.path().join("leads.csv"));

        assert!(matches!(
            dashboard(&config, staff1()),
            Err(CliError::Access(_))
        ));
        let boss = Credentials {
            username: "boss",
            password: "888",
        };
        dashboard(&config, boss).unwrap();
        summary(&config, boss).unwrap();
    }
}
