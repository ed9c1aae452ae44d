//! CSV-backed record store.

use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;

use monster_wash_core::CustomerRecord;

use super::{RecordStore, SeedPolicy, StoreError, seed_records};

/// Column header of the lead file, in field order.
pub const HEADER: [&str; 7] = [
    "name",
    "phone",
    "vehicle",
    "status",
    "notes",
    "owner",
    "created_on",
];

/// A [`RecordStore`] persisted to a CSV file.
///
/// Every save rewrites the whole file: rows go to a temporary file in the
/// same directory, which is then renamed over the target. Writers sharing
/// this instance are serialized; separate processes are not.
#[derive(Debug)]
pub struct CsvRecordStore {
    path: PathBuf,
    seed: SeedPolicy,
    write_lock: Mutex<()>,
}

impl CsvRecordStore {
    /// Create a store for the file at `path`. The file need not exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, seed: SeedPolicy) -> Self {
        Self {
            path: path.into(),
            seed,
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn read_file(&self) -> Result<Vec<CustomerRecord>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), seed = ?self.seed, "lead file absent");
                return Ok(match self.seed {
                    SeedPolicy::Empty => Vec::new(),
                    SeedPolicy::Examples => seed_records(chrono::Local::now().date_naive()),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::Reader::from_reader(BufReader::new(file));
        let records = reader
            .deserialize()
            .collect::<Result<Vec<CustomerRecord>, _>>()?;
        Ok(records)
    }

    fn write_file(&self, records: &[CustomerRecord]) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;

        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(&mut tmp);
            writer.write_record(HEADER)?;
            for record in records {
                writer.serialize(record)?;
            }
            writer.flush()?;
        }

        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)?;

        tracing::debug!(path = %self.path.display(), rows = records.len(), "lead file written");
        Ok(())
    }
}

impl RecordStore for CsvRecordStore {
    fn scan(&self) -> Result<Vec<CustomerRecord>, StoreError> {
        self.read_file()
    }

    fn replace_all(&self, records: &[CustomerRecord]) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        self.write_file(records)
    }

    fn append(&self, record: CustomerRecord) -> Result<usize, StoreError> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut records = self.read_file()?;
        records.push(record);
        self.write_file(&records)?;
        Ok(records.len())
    }
}
