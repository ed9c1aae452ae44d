//! Lead persistence.
//!
//! # Backends
//!
//! - [`CsvRecordStore`] - flat CSV file on local disk (production)
//! - [`MemoryRecordStore`] - in-process vector (tests, dry runs)
//!
//! Both implement [`RecordStore`], so the editor and query view never know
//! which backend they are talking to.
//!
//! # File Format
//!
//! ```text
//! name,phone,vehicle,status,notes,owner,created_on
//! 张三,13800000001,奥迪A6,potential,,staff1,2026-10-14
//! ```

pub mod file;
pub mod memory;
pub mod seed;

use thiserror::Error;

use monster_wash_core::{CustomerRecord, Session};

use crate::services::query::{LeadQuery, filter};

pub use file::CsvRecordStore;
pub use memory::MemoryRecordStore;
pub use seed::seed_records;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The lead file is malformed or a record could not be encoded.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The temporary file could not be renamed over the lead file.
    #[error("failed to replace lead file: {0}")]
    Persist(#[from] tempfile::PersistError),

    /// A writer panicked while holding the store lock.
    #[error("store lock poisoned")]
    Poisoned,
}

/// What an absent lead file loads as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedPolicy {
    /// No rows, header only.
    #[default]
    Empty,
    /// The example rows from [`seed_records`].
    Examples,
}

/// Ordered, append-only collection of customer records.
pub trait RecordStore: Send + Sync {
    /// Every record, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing storage cannot be read.
    fn scan(&self) -> Result<Vec<CustomerRecord>, StoreError>;

    /// Rewrite the whole collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing storage cannot be written.
    fn replace_all(&self, records: &[CustomerRecord]) -> Result<(), StoreError>;

    /// Append one record and persist, returning the new collection length.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing storage cannot be read or written.
    fn append(&self, record: CustomerRecord) -> Result<usize, StoreError>;

    /// The records `session` may see that match `query`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing storage cannot be read.
    fn query(
        &self,
        query: &LeadQuery,
        session: &Session,
    ) -> Result<Vec<CustomerRecord>, StoreError> {
        let records = self.scan()?;
        Ok(filter(&records, query, session))
    }
}
