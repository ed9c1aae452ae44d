//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::{ConfigError, CrmConfig};
use crate::services::AccountDirectory;
use crate::store::{CsvRecordStore, RecordStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: CrmConfig,
    store: Arc<dyn RecordStore>,
    accounts: Arc<dyn AccountDirectory>,
}

impl AppState {
    #[must_use]
    pub fn new(
        config: CrmConfig,
        store: Arc<dyn RecordStore>,
        accounts: Arc<dyn AccountDirectory>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                accounts,
            }),
        }
    }

    /// Build state backed by the configured lead file and accounts.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the accounts file cannot be loaded.
    pub fn from_config(config: CrmConfig) -> Result<Self, ConfigError> {
        let accounts = Arc::new(config.accounts()?);
        let store = Arc::new(CsvRecordStore::new(config.data_file.clone(), config.seed));
        Ok(Self::new(config, store, accounts))
    }

    #[must_use]
    pub fn config(&self) -> &CrmConfig {
        &self.inner.config
    }

    /// A shared handle to the lead store, for moving into blocking tasks.
    #[must_use]
    pub fn store(&self) -> Arc<dyn RecordStore> {
        Arc::clone(&self.inner.store)
    }

    #[must_use]
    pub fn accounts(&self) -> &dyn AccountDirectory {
        self.inner.accounts.as_ref()
    }
}
