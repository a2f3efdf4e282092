//! # Storage Configuration
//!
//! The backend choice and the locations of both stores, read from a single
//! YAML file:
//!
//! ```yaml
//! dbtype: csv                         # or "mysql"; anything else falls back to csv
//! data_directory: ./data              # holds Product.csv and User.csv
//! database_url: sqlite://products.db  # relational store
//! ```
//!
//! The loaded value is handed to the backend selector explicitly; nothing here
//! is cached process-wide.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{StorageError, StorageResult};

const DEFAULT_DATA_DIRECTORY: &str = "./data";
const DEFAULT_DATABASE_URL: &str = "sqlite://products.db";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Name of the backend to use; `None` selects the flat-file backend
    #[serde(default)]
    pub dbtype: Option<String>,
    #[serde(default = "default_data_directory")]
    pub data_directory: PathBuf,
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

fn default_data_directory() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIRECTORY)
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dbtype: None,
            data_directory: default_data_directory(),
            database_url: default_database_url(),
        }
    }
}

impl StorageConfig {
    /// Read the configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let path = path.as_ref();

        let yaml_content = fs::read_to_string(path).map_err(|e| StorageError::ConfigurationLoad {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

        let config: StorageConfig =
            serde_yaml::from_str(&yaml_content).map_err(|e| StorageError::ConfigurationLoad {
                path: path.to_path_buf(),
                source: e.into(),
            })?;

        debug!("Loaded storage config from {:?}: {:?}", path, config);
        Ok(config)
    }

    /// Override the backend name, e.g. from a command line flag
    pub fn with_dbtype(mut self, dbtype: impl Into<String>) -> Self {
        self.dbtype = Some(dbtype.into());
        self
    }

    pub fn with_data_directory<P: AsRef<Path>>(mut self, data_directory: P) -> Self {
        self.data_directory = data_directory.as_ref().to_path_buf();
        self
    }

    pub fn with_database_url(mut self, database_url: impl Into<String>) -> Self {
        self.database_url = database_url.into();
        self
    }
}
