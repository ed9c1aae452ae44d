//! In-process record store.

use std::sync::Mutex;

use monster_wash_core::CustomerRecord;

use super::{RecordStore, StoreError};

/// A [`RecordStore`] that keeps records in memory only.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: Mutex<Vec<CustomerRecord>>,
}

impl MemoryRecordStore {
    /// Create a store holding `records`.
    #[must_use]
    pub const fn new(records: Vec<CustomerRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

impl RecordStore for MemoryRecordStore {
    fn scan(&self) -> Result<Vec<CustomerRecord>, StoreError> {
        let records = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(records.clone())
    }

    fn replace_all(&self, records: &[CustomerRecord]) -> Result<(), StoreError> {
        let mut guard = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        *guard = records.to_vec();
        Ok(())
    }

    fn append(&self, record: CustomerRecord) -> Result<usize, StoreError> {
        let mut guard = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        guard.push(record);
        Ok(guard.len())
    }
}
