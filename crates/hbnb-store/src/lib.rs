//! Object registry and JSON persistence for the HBnB console.
//!
//! This crate holds every record in an insertion-ordered registry keyed by
//! `"<Kind>.<id>"` and mirrors it to a single JSON document. Every mutation
//! rewrites the whole document; there is no log, journal, or index.
//!
//! # Components
//!
//! - [`Registry`] -- the in-memory mapping from composite key to [`Record`]
//! - [`codec`] -- encodes the registry to a JSON document and decodes it back
//! - [`DocumentBackend`] -- where the document lives:
//!   - [`FileBackend`] -- a file on disk, replaced atomically on write
//!   - [`MemoryBackend`] -- an in-memory document for tests and embedding
//! - [`Storage`] -- the store facade owning a registry and a backend
//!
//! # Design Rules
//!
//! 1. The registry is owned by a [`Storage`] value; there is no global store.
//! 2. Every mutating operation persists before it returns.
//! 3. A failed persist rolls the registry back to its state before the call.
//! 4. Reload is all-or-nothing: the registry is replaced only after the whole
//!    document has decoded under the configured [`ReloadPolicy`].
//! 5. Composite keys are recomputed from each record on reload.
//!
//! [`Record`]: hbnb_types::Record

pub mod codec;
pub mod config;
pub mod error;
pub mod file;
pub mod memory;
pub mod registry;
pub mod storage;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use config::{ReloadPolicy, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use registry::{object_key, Registry, Removed};
pub use storage::Storage;
pub use traits::DocumentBackend;
