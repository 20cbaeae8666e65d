use crate::error::StoreResult;

/// Holder of the single JSON document that mirrors the registry.
///
/// All implementations must satisfy these invariants:
/// - `write` replaces the whole document; there is no append or patch.
/// - A failed `write` leaves the previously written document intact.
/// - `read` after a successful `write` returns exactly the written text.
/// - All I/O errors are propagated, never silently ignored.
pub trait DocumentBackend: Send + Sync {
    /// Read the whole document.
    ///
    /// Returns `Ok(None)` if no document has been written yet.
    fn read(&self) -> StoreResult<Option<String>>;

    /// Replace the whole document.
    fn write(&self, document: &str) -> StoreResult<()>;

    /// Short human-readable location, used in log lines.
    fn describe(&self) -> String;
}
