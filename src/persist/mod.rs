//! Autosave persistence for the single document slot.
//!
//! Storage is a small key/value capability ([`Storage`]). The editor keeps
//! exactly one entry, under [`DOCUMENT_KEY`], restored on startup and
//! rewritten in the background after every change by the [`Autosaver`].
//! Persistence is best effort: failures are logged and never interrupt
//! editing.

mod autosave;
mod file;
mod memory;

pub use autosave::Autosaver;
pub use file::{FileStorage, default_storage_path};
pub use memory::MemoryStorage;

use thiserror::Error;

/// Storage key of the editor's single document slot.
pub const DOCUMENT_KEY: &str = "markdown-editor-content";

#[derive(Debug, Error)]
pub enum StorageError {
    /// The storage location could not be read or written.
    #[error("storage unavailable: {0}")]
    Unavailable(#[from] std::io::Error),
    /// The storage file exists but is not a valid key/value map.
    #[error("storage file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// A key/value text store.
pub trait Storage: Send {
    /// Read the value for `key`. `Ok(None)` when it was never saved.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns an error if the backing store rejects the write.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Load the document slot for startup.
///
/// An absent entry is an empty document. A storage failure also yields an
/// empty document, together with the error so the caller can tell the user.
pub fn restore(storage: &dyn Storage) -> (String, Option<StorageError>) {
    match storage.load(DOCUMENT_KEY) {
        Ok(Some(text)) => {
            tracing::debug!(bytes = text.len(), "restored autosaved document");
            (text, None)
        }
        Ok(None) => (String::new(), None),
        Err(err) => {
            tracing::warn!(error = %err, "could not restore autosaved document");
            (String::new(), Some(err))
        }
    }
}
