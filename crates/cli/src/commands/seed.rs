//! Write the example leads to the data file.

use tracing::info;

use monster_wash_crm::config::CrmConfig;
use monster_wash_crm::store::{CsvRecordStore, RecordStore, SeedPolicy, seed_records};

use super::CliError;

/// Replace the data file with the four example leads.
///
/// # Errors
///
/// Returns `CliError::DataFileExists` if the file exists and `force` is not
/// set, or `CliError::Store` if writing fails.
pub fn run(config: &CrmConfig, force: bool) -> Result<(), CliError> {
    let store = CsvRecordStore::new(config.data_file.clone(), SeedPolicy::Empty);
    if store.exists() && !force {
        return Err(CliError::DataFileExists(store.path().display().to_string()));
    }

    let records = seed_records(chrono::Local::now().date_naive());
    store.replace_all(&records)?;

    info!(
        path = %store.path().display(),
        count = records.len(),
        "Seeded example leads"
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config_for(path: &std::path::Path) -> CrmConfig {
        let mut config = CrmConfig::from_lookup(|_| None).unwrap();
        config.data_file = path.to_path_buf();
        config
    }

    #[test]
    fn test_seed_writes_examples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leads.csv");
        run(&config_for(&path), false).unwrap();

        let store = CsvRecordStore::new(&path, SeedPolicy::Empty);
        assert_eq!(store.scan().unwrap().len(), 4);
    }

    #[test]
    fn test_seed_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leads.csv");
        std::fs::write(&path, "name,phone,vehicle,status,notes,owner,created_on\n").unwrap();

        assert!(matches!(
            run(&config_for(&path), false),
            Err(CliError::DataFileExists(_))
        ));
        run(&config_for(&path), true).unwrap();
        let store = CsvRecordStore::new(&path, SeedPolicy::Empty);
        assert_eq!(store.scan().unwrap().len(), 4);
    }
}
