mod record_log;

pub use record_log::{FileRecordLog, InMemoryRecordLog, RecordLog, StorageError, StorageResult};
