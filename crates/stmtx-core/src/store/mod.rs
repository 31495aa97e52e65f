//! CSV persistence of transaction records.
//!
//! The file is created once with a header row. Later runs only append the
//! records the merge strategy reports as new; existing rows are never
//! rewritten.

pub mod merge;

pub use merge::{merge, merge_fingerprint, merge_positional};

use std::fs::{self, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::models::config::MergeStrategy;
use crate::models::record::{COLUMNS, TransactionRecord};

/// What a sync did (or would do) to the persisted file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The file did not exist and was written with `rows` records.
    Created { rows: usize },
    /// `added` records were appended, giving `total`.
    Appended { added: usize, total: usize },
    /// Nothing new; the file holds `total` records.
    UpToDate { total: usize },
}

/// Record set persisted as delimited text.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read every persisted record. A missing file reads as empty.
    pub fn load(&self) -> Result<Vec<TransactionRecord>> {
        if !self.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(&self.path)?;

        let headers = reader.headers()?.clone();
        if headers.iter().ne(COLUMNS.iter().copied()) {
            return Err(StoreError::Header {
                path: self.path.display().to_string(),
                expected: COLUMNS.join(","),
                found: headers.iter().collect::<Vec<_>>().join(","),
            }
            .into());
        }

        let records = reader
            .deserialize()
            .collect::<std::result::Result<Vec<TransactionRecord>, _>>()?;

        debug!("Loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    /// Report what [`CsvStore::sync`] would do without touching the file.
    pub fn dry_run(&self, fresh: &[TransactionRecord], strategy: MergeStrategy) -> Result<SyncOutcome> {
        if !self.exists() {
            return Ok(SyncOutcome::Created { rows: fresh.len() });
        }

        let existing = self.load()?;
        let new_records = merge(&existing, fresh, strategy);
        Ok(outcome(existing.len(), new_records.len()))
    }

    /// Persist `fresh`: create the file, or append only the new records.
    pub fn sync(&self, fresh: &[TransactionRecord], strategy: MergeStrategy) -> Result<SyncOutcome> {
        if !self.exists() {
            self.create(fresh)?;
            info!("Created {} with {} rows", self.path.display(), fresh.len());
            return Ok(SyncOutcome::Created { rows: fresh.len() });
        }

        let existing = self.load()?;
        let new_records = merge(&existing, fresh, strategy);
        if !new_records.is_empty() {
            self.append(&new_records)?;
        }

        let result = outcome(existing.len(), new_records.len());
        info!("{}: {:?}", self.path.display(), result);
        Ok(result)
    }

    /// Write header and records to a temporary file next to the target, then
    /// move it into place.
    fn create(&self, records: &[TransactionRecord]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(tmp.as_file_mut());
            writer.write_record(COLUMNS)?;
            for record in records {
                writer.write_record(record.fields())?;
            }
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;

        tmp.persist(&self.path).map_err(|e| StoreError::Persist {
            path: self.path.display().to_string(),
            reason: e.error.to_string(),
        })?;
        Ok(())
    }

    /// Append records as a single write.
    fn append(&self, records: &[TransactionRecord]) -> Result<()> {
        let mut buffer = Vec::new();
        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(&mut buffer);
            for record in records {
                writer.write_record(record.fields())?;
            }
            writer.flush()?;
        }

        let mut file = OpenOptions::new().read(true).append(true).open(&self.path)?;
        if !ends_with_newline(&mut file)? {
            buffer.insert(0, b'\n');
        }
        file.write_all(&buffer)?;
        file.sync_all()?;

        debug!("Appended {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}

fn ends_with_newline(file: &mut fs::File) -> std::io::Result<bool> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

fn outcome(existing: usize, added: usize) -> SyncOutcome {
    if added == 0 {
        SyncOutcome::UpToDate { total: existing }
    } else {
        SyncOutcome::Appended {
            added,
            total: existing + added,
        }
    }
}
