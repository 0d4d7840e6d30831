//! Error types for the permissions module.

use docvault_core::{Principal, VaultKey};
use thiserror::Error;

/// Errors that can occur during permission operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermsError {
    /// No entry exists for the queried pair.
    #[error("permission denied: no entry for {accessor} on vault key {vault_key}")]
    PermissionDenied {
        vault_key: VaultKey,
        accessor: Principal,
    },

    /// An entry already exists for the pair.
    #[error("permission entry already recorded for {accessor} on vault key {vault_key}")]
    AlreadyRecorded {
        vault_key: VaultKey,
        accessor: Principal,
    },
}

/// Result type for permission operations.
pub type Result<T> = std::result::Result<T, PermsError>;
