//! Local persistence for the upload coordinator.
//!
//! Defines the key-value `StateStore` seam plus the backends the coordinator
//! runs on, and the `UploadCache` that keeps the best-effort "my uploads"
//! record. Cache reads degrade to an empty sequence on absent or corrupt
//! data; they never fail the caller.

pub mod json_file;
pub mod memory;

use docdrop_core::models::CachedUploadRecord;
use thiserror::Error;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Key-value persistence seam, one string value per key. Synchronous
/// semantics: values are small serialized sequences, read and rewritten
/// whole.
pub trait StateStore: Send + Sync {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}

/// Best-effort record of previously submitted files, persisted as one
/// ordered JSON array under a single store key.
pub struct UploadCache<S: StateStore> {
    store: S,
    key: String,
}

impl<S: StateStore> UploadCache<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Load the whole persisted sequence. Absent or corrupt data is an empty
    /// sequence, never an error.
    pub fn load_all(&self) -> Vec<CachedUploadRecord> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "upload cache read failed, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "upload cache corrupt, treating as empty");
                Vec::new()
            }
        }
    }

    /// Append records read-modify-write: load the current sequence, push the
    /// new entries, persist the whole sequence back. Not safe under
    /// concurrent writers; the coordinator is single-writer by construction.
    pub fn append(&self, records: &[CachedUploadRecord]) -> StoreResult<()> {
        let mut all = self.load_all();
        all.extend_from_slice(records);
        let raw = serde_json::to_string(&all)?;
        self.store.set(&self.key, &raw)
    }
}
