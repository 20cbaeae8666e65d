use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::error::{StoreError, StoreResult};
use crate::traits::DocumentBackend;

/// In-memory document holder.
///
/// Intended for tests and embedding. Clones share the same document, so a
/// test can keep a handle after moving a clone into a [`Storage`].
///
/// [`Storage`]: crate::Storage
#[derive(Clone, Default)]
pub struct MemoryBackend {
    document: Arc<RwLock<Option<String>>>,
    read_only: Arc<AtomicBool>,
}

impl MemoryBackend {
    /// Create a backend with no document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend already holding `document`.
    pub fn with_document(document: impl Into<String>) -> Self {
        let backend = Self::new();
        *backend.document.write().expect("lock poisoned") = Some(document.into());
        backend
    }

    /// The current document, if one has been written.
    pub fn document(&self) -> Option<String> {
        self.document.read().expect("lock poisoned").clone()
    }

    /// Make subsequent writes fail with [`StoreError::ReadOnly`].
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }
}

impl DocumentBackend for MemoryBackend {
    fn read(&self) -> StoreResult<Option<String>> {
        Ok(self.document())
    }

    fn write(&self, document: &str) -> StoreResult<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(StoreError::ReadOnly);
        }
        *self.document.write().expect("lock poisoned") = Some(document.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}

impl std::fmt::Debug for MemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bytes = self.document().map_or(0, |d| d.len());
        f.debug_struct("MemoryBackend")
            .field("document_bytes", &bytes)
            .field("read_only", &self.read_only.load(Ordering::SeqCst))
            .finish()
    }
}
