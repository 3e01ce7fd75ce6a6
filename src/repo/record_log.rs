use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use crate::model::StoredSurveyRecord;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write record: {0}")]
    Io(#[from] std::io::Error),
}

/// Append-only sink for stored records, one record per call.
/// NOTE: Trait object so tests can substitute an in-memory log.
/// TODO: Swap async-trait for std async traits when those become stable
#[async_trait::async_trait]
pub trait RecordLog: Send + Sync {
    /// Append a single record as one discrete unit; the write is flushed
    /// before this returns. Failures propagate, nothing is dropped silently.
    async fn append(&self, record: &StoredSurveyRecord) -> StorageResult<()>;
}

/// Record log backed by a newline-delimited JSON file.
///
/// The file is opened once at startup and only ever appended to. The mutex
/// serializes writers so two records never interleave within a line.
#[derive(Debug)]
pub struct FileRecordLog {
    file: Mutex<File>,
}

impl FileRecordLog {
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

#[async_trait::async_trait]
impl RecordLog for FileRecordLog {
    #[tracing::instrument(name = "Append record to file log", skip(self, record))]
    async fn append(&self, record: &StoredSurveyRecord) -> StorageResult<()> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        let mut file = self.file.lock().expect("Record log mutex poisoned");
        file.write_all(&line)?;
        file.flush()?;

        Ok(())
    }
}

/// In-memory log for tests; keeps the lines it would have written
#[derive(Debug, Default)]
pub struct InMemoryRecordLog {
    lines: Mutex<Vec<String>>,
}

impl InMemoryRecordLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("Record log mutex poisoned").clone()
    }
}

#[async_trait::async_trait]
impl RecordLog for InMemoryRecordLog {
    async fn append(&self, record: &StoredSurveyRecord) -> StorageResult<()> {
        let line = serde_json::to_string(record)?;

        self.lines
            .lock()
            .expect("Record log mutex poisoned")
            .push(line);

        Ok(())
    }
}
