use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::DocumentBackend;

/// Document stored as a single UTF-8 file.
///
/// Writes go to a temporary file in the same directory, which is flushed,
/// synced, and then renamed over the target. An interrupted write leaves
/// either the old document or the new one, never a truncated mix.
#[derive(Clone, Debug)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A temporary file next to the target, carrying the target's
    /// permissions. When there is no target yet, it gets the permissions a
    /// newly created file would get under the current umask.
    fn staging_file(&self) -> io::Result<NamedTempFile> {
        let existing = match fs::metadata(&self.path) {
            Ok(metadata) => Some(metadata.permissions()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(e),
        };

        let mut builder = Builder::new();
        #[cfg(unix)]
        if existing.is_none() {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        let staged = builder.tempfile_in(self.staging_dir())?;
        if let Some(permissions) = existing {
            staged.as_file().set_permissions(permissions)?;
        }
        Ok(staged)
    }

    /// Directory that receives the temporary file; `.` for bare file names.
    fn staging_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl DocumentBackend for FileBackend {
    fn read(&self) -> StoreResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                debug!(path = %self.path.display(), bytes = text.len(), "read document");
                Ok(Some(text))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, document: &str) -> StoreResult<()> {
        let mut staged = self.staging_file()?;
        staged.write_all(document.as_bytes())?;
        staged.flush()?;
        staged.as_file().sync_all()?;
        staged
            .persist(&self.path)
            .map_err(|e| StoreError::Io(e.error))?;
        debug!(path = %self.path.display(), bytes = document.len(), "wrote document");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
