use std::path::{Path, PathBuf};

use hbnb_store::StoreConfig;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::interpreter::DEFAULT_PROMPT;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Console settings, read from a TOML file and overridden by flags.
///
/// ```toml
/// prompt = "(hbnb) "
///
/// [store]
/// file_path = "file.json"
/// reload_policy = "fail"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub prompt: String,
    pub store: StoreConfig,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            store: StoreConfig::default(),
        }
    }
}

impl ConsoleConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Settings for this run: the config file named by `--config` (or the
    /// defaults) with command-line flags applied on top.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(file) = &cli.file {
            config.store.file_path = file.clone();
        }
        if let Some(policy) = cli.on_corrupt {
            config.store.reload_policy = policy.into();
        }
        Ok(config)
    }
}
