//! Persisted API key and provider.
//!
//! The record lives in a single JSON file (by default `~/.easycommit.json`):
//!
//! ```json
//! {
//!   "apiKey": "sk-...",
//!   "provider": "openai"
//! }
//! ```
//!
//! Read failures never abort the run: a missing, unreadable or malformed file
//! is logged and treated as "no stored key".

use std::env;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::llm::Provider;

/// File name of the config record inside the home directory.
pub const CONFIG_FILE_NAME: &str = ".easycommit.json";

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV_VAR: &str = "EASYCOMMIT_CONFIG";

/// The stored credential record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigRecord {
    pub api_key: String,
    #[serde(default, deserialize_with = "provider_or_default")]
    pub provider: Provider,
}

/// A null or blank `provider` falls back to the default; unknown tags are rejected.
fn provider_or_default<'de, D>(deserializer: D) -> Result<Provider, D::Error>
where
    D: Deserializer<'de>,
{
    let tag: Option<String> = Option::deserialize(deserializer)?;
    match tag.as_deref().map(str::trim) {
        None | Some("") => Ok(Provider::default()),
        Some(tag) => Provider::from_tag(tag).ok_or_else(|| {
            serde::de::Error::unknown_variant(tag, &["openai", "deepseek"])
        }),
    }
}

/// Reads and writes the config record at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at [`default_path`](Self::default_path).
    pub fn from_env() -> Self {
        Self::new(Self::default_path())
    }

    /// Resolve the config location.
    ///
    /// `EASYCOMMIT_CONFIG` wins when set and non-empty, then the home
    /// directory, then the current directory.
    pub fn default_path() -> PathBuf {
        match env::var(CONFIG_PATH_ENV_VAR) {
            Ok(v) if !v.is_empty() => PathBuf::from(v),
            _ => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(CONFIG_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the record, logging and swallowing any failure.
    pub fn load(&self) -> Option<ConfigRecord> {
        match self.try_load() {
            Ok(record) => record,
            Err(e) => {
                warn!("Ignoring stored configuration: {}", e);
                None
            }
        }
    }

    /// Load the record, returning `Ok(None)` only when the file does not exist.
    pub fn try_load(&self) -> Result<Option<ConfigRecord>, ConfigError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config file at {}", self.path.display());
                return Ok(None);
            }
            Err(source) => {
                return Err(ConfigError::ReadFailed {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let record: ConfigRecord =
            serde_json::from_str(&contents).map_err(|e| ConfigError::Malformed {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        if record.api_key.is_empty() {
            return Err(ConfigError::Malformed {
                path: self.path.clone(),
                reason: "apiKey is empty".to_string(),
            });
        }

        Ok(Some(record))
    }

    /// Overwrite the record with a new key and provider.
    ///
    /// The JSON is written to a temporary file in the same directory and
    /// renamed over the destination, so readers see either the old record or
    /// the new one.
    pub fn save(&self, api_key: &str, provider: Provider) -> Result<(), ConfigError> {
        let record = ConfigRecord {
            api_key: api_key.to_string(),
            provider,
        };
        let json = serde_json::to_string_pretty(&record).map_err(ConfigError::SerializationFailed)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let write_failed = |source| ConfigError::WriteFailed {
            path: self.path.clone(),
            source,
        };

        fs::create_dir_all(&dir).map_err(write_failed)?;
        let mut tmp = NamedTempFile::new_in(&dir).map_err(write_failed)?;
        tmp.write_all(json.as_bytes()).map_err(write_failed)?;
        tmp.flush().map_err(write_failed)?;
        tmp.persist(&self.path).map_err(|e| write_failed(e.error))?;

        debug!("Saved {} config to {}", provider, self.path.display());
        Ok(())
    }

    /// Delete the record. Returns whether a file was removed.
    pub fn clear(&self) -> bool {
        match fs::remove_file(&self.path) {
            Ok(()) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(source) => {
                let err = ConfigError::RemoveFailed {
                    path: self.path.clone(),
                    source,
                };
                warn!("{}", err);
                false
            }
        }
    }

    /// The stored API key, if any.
    pub fn api_key(&self) -> Option<String> {
        self.load().map(|record| record.api_key)
    }

    /// The stored provider, defaulting to OpenAI.
    pub fn provider(&self) -> Provider {
        self.load().map(|record| record.provider).unwrap_or_default()
    }
}
