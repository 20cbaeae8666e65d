use hbnb_types::{ModelResult, Record, RecordKind};
use tracing::{debug, info, warn};

use crate::codec;
use crate::config::{ReloadPolicy, StoreConfig};
use crate::error::StoreResult;
use crate::file::FileBackend;
use crate::registry::Registry;
use crate::traits::DocumentBackend;

/// The object store: a registry mirrored to a document backend.
///
/// Every mutating operation persists the whole registry before returning.
/// If the persist fails, the registry is restored to its state before the
/// call and the error is returned, so memory never runs ahead of the
/// document.
pub struct Storage {
    registry: Registry,
    backend: Box<dyn DocumentBackend>,
    policy: ReloadPolicy,
}

impl Storage {
    /// Open the file-backed store described by `config` and load its document.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        let backend = FileBackend::new(config.file_path.clone());
        let mut storage = Self::with_backend(Box::new(backend), config.reload_policy);
        storage.reload()?;
        Ok(storage)
    }

    /// Create an empty store over `backend` without reading it.
    pub fn with_backend(backend: Box<dyn DocumentBackend>, policy: ReloadPolicy) -> Self {
        Self {
            registry: Registry::new(),
            backend,
            policy,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn policy(&self) -> ReloadPolicy {
        self.policy
    }

    // ---- Persistence ----

    /// Replace the registry with the backend's document.
    ///
    /// A missing document leaves the registry untouched. Otherwise the
    /// document is decoded completely before the registry changes, so a
    /// rejected document leaves it exactly as it was. Returns the number of
    /// records loaded.
    pub fn reload(&mut self) -> StoreResult<usize> {
        let Some(text) = self.backend.read()? else {
            debug!(location = %self.backend.describe(), "no document; starting empty");
            return Ok(0);
        };
        let entries = codec::decode_document(&text, self.policy)?;

        let mut registry = Registry::new();
        for (key, record) in entries {
            if registry.contains(record.kind(), record.id()) {
                warn!(%key, "duplicate entry in document; keeping the later one");
            }
            registry.insert(record);
        }
        let loaded = registry.len();
        self.registry = registry;
        info!(location = %self.backend.describe(), records = loaded, "reloaded store");
        Ok(loaded)
    }

    /// Write the whole registry to the backend.
    pub fn save(&self) -> StoreResult<()> {
        let document = codec::encode_document(&self.registry)?;
        self.backend.write(&document)?;
        debug!(
            location = %self.backend.describe(),
            records = self.registry.len(),
            bytes = document.len(),
            "persisted store"
        );
        Ok(())
    }

    // ---- Reads ----

    pub fn get(&self, kind: RecordKind, id: &str) -> Option<&Record> {
        self.registry.get(kind, id)
    }

    /// Records of `kind` (subtype-inclusive), or every record, in insertion order.
    pub fn all(&self, kind: Option<RecordKind>) -> impl Iterator<Item = &Record> + '_ {
        self.registry.all(kind).map(|(_, record)| record)
    }

    pub fn count(&self, kind: Option<RecordKind>) -> usize {
        self.registry.count(kind)
    }

    // ---- Mutations ----

    /// Create, register, and persist a new record of `kind`.
    pub fn create(&mut self, kind: RecordKind) -> StoreResult<Record> {
        let record = Record::new(kind);
        let key = self.registry.insert(record.clone());
        if let Err(e) = self.save() {
            self.registry.remove(kind, record.id());
            return Err(e);
        }
        info!(%key, "created record");
        Ok(record)
    }

    /// Remove and persist. Returns `Ok(None)` if no such record exists.
    pub fn destroy(&mut self, kind: RecordKind, id: &str) -> StoreResult<Option<Record>> {
        let Some(removed) = self.registry.remove(kind, id) else {
            return Ok(None);
        };
        if let Err(e) = self.save() {
            self.registry.reinstate(removed);
            return Err(e);
        }
        info!(key = %removed.key, "destroyed record");
        Ok(Some(removed.record))
    }

    /// Apply `change` to a record, advance its `updated_at`, and persist.
    ///
    /// Returns `Ok(None)` if no such record exists. If `change` fails the
    /// record is left as it was.
    pub fn update<F>(&mut self, kind: RecordKind, id: &str, change: F) -> StoreResult<Option<&Record>>
    where
        F: FnOnce(&mut Record) -> ModelResult<()>,
    {
        let Some(record) = self.registry.get_mut(kind, id) else {
            return Ok(None);
        };
        let snapshot = record.clone();
        if let Err(e) = change(&mut *record) {
            *record = snapshot;
            return Err(e.into());
        }
        record.touch();

        if let Err(e) = self.save() {
            if let Some(record) = self.registry.get_mut(kind, id) {
                *record = snapshot;
            }
            return Err(e);
        }
        debug!(kind = %kind, id, "updated record");
        Ok(self.registry.get(kind, id))
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("location", &self.backend.describe())
            .field("object_count", &self.registry.len())
            .field("policy", &self.policy)
            .finish()
    }
}
