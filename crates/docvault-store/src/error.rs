//! Error types for the store module.

use docvault_core::{ValidationError, VaultKey};
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Taxonomy label serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Invalid data in storage.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// An imported record targets a key that already holds a record.
    #[error("vault key {0} is already occupied")]
    Occupied(VaultKey),

    /// An imported record fails field validation.
    #[error("imported record rejected: {0}")]
    Rejected(#[from] ValidationError),

    /// Every key has been allocated.
    #[error("vault key space exhausted after {0} registrations")]
    KeysExhausted(u64),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// A lock guarding in-process state was poisoned.
    #[error("store lock poisoned: {0}")]
    Poisoned(String),

    /// A blocking storage task failed to complete.
    #[error("storage task failed: {0}")]
    Task(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
