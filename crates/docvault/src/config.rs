//! Vault configuration.

use std::path::PathBuf;

use docvault_store::SqliteStore;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Where a [`Vault`](crate::Vault) opened from configuration keeps its state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StorageConfig {
    /// In-memory SQLite; state is lost on drop.
    #[default]
    Memory,
    /// SQLite database file, created and migrated on open.
    Sqlite { path: PathBuf },
}

impl StorageConfig {
    /// Open the configured SQLite store.
    pub fn open(&self) -> Result<SqliteStore> {
        let store = match self {
            StorageConfig::Memory => SqliteStore::open_memory()?,
            StorageConfig::Sqlite { path } => SqliteStore::open(path)?,
        };
        Ok(store)
    }
}

/// Configuration for the Vault.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// Storage backend.
    pub storage: StorageConfig,
    /// Re-run field validation on every record read back from storage.
    pub validate_on_read: bool,
}

impl VaultConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Configuration for a SQLite file at `path`.
    pub fn sqlite(path: impl Into<PathBuf>) -> Self {
        Self {
            storage: StorageConfig::Sqlite { path: path.into() },
            ..Self::default()
        }
    }
}
