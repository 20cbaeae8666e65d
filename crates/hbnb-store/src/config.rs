use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default location of the backing document, relative to the working directory.
pub const DEFAULT_FILE_PATH: &str = "file.json";

/// What reload does with an entry it cannot rebuild into a record
/// (unknown `__class__`, missing id or timestamps, ill-typed field).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReloadPolicy {
    /// Reject the whole document; the registry is left untouched.
    #[default]
    Fail,
    /// Drop the offending entry with a warning and keep the rest.
    Skip,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub file_path: PathBuf,
    pub reload_policy: ReloadPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            file_path: PathBuf::from(DEFAULT_FILE_PATH),
            reload_policy: ReloadPolicy::default(),
        }
    }
}
