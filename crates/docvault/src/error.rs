//! Error types for the Vault.

use docvault_core::{Principal, TaxonomyViolation, TextField, ValidationError, VaultKey};
use docvault_perms::PermsError;
use docvault_store::StoreError;
use thiserror::Error;

/// Errors that can occur during Vault operations.
///
/// Every failure is terminal for the call that raised it and leaves stored
/// state untouched.
#[derive(Debug, Error)]
pub enum VaultError {
    /// No document exists at the key.
    #[error("record not found: vault key {0}")]
    RecordNotFound(VaultKey),

    /// The allocated key was already occupied.
    #[error("record collision at vault key {0}")]
    RecordCollision(VaultKey),

    /// The caller is not the record's custodian.
    #[error("authority mismatch on vault key {vault_key}: {caller} is not the custodian")]
    AuthorityMismatch { vault_key: VaultKey, caller: Principal },

    /// Entity metadata or professional notation out of bounds.
    #[error("{field} out of bounds: length {len}")]
    MetadataInvalid { field: TextField, len: usize },

    /// Payload magnitude out of bounds.
    #[error("payload magnitude out of bounds: {value}")]
    MagnitudeInvalid { value: u64 },

    /// Taxonomy label set out of bounds.
    #[error("invalid taxonomy: {0}")]
    TaxonomyInvalid(TaxonomyViolation),

    /// No permission entry for the queried pair.
    #[error("permission denied: no entry for {accessor} on vault key {vault_key}")]
    PermissionDenied {
        vault_key: VaultKey,
        accessor: Principal,
    },

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Discriminant of a [`VaultError`], for callers that only branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    RecordNotFound,
    RecordCollision,
    AuthorityMismatch,
    MetadataInvalid,
    MagnitudeInvalid,
    TaxonomyInvalid,
    PermissionDenied,
    Storage,
    Configuration,
}

impl VaultError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VaultError::RecordNotFound(_) => ErrorKind::RecordNotFound,
            VaultError::RecordCollision(_) => ErrorKind::RecordCollision,
            VaultError::AuthorityMismatch { .. } => ErrorKind::AuthorityMismatch,
            VaultError::MetadataInvalid { .. } => ErrorKind::MetadataInvalid,
            VaultError::MagnitudeInvalid { .. } => ErrorKind::MagnitudeInvalid,
            VaultError::TaxonomyInvalid(_) => ErrorKind::TaxonomyInvalid,
            VaultError::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            VaultError::Store(_) => ErrorKind::Storage,
            VaultError::Config(_) => ErrorKind::Configuration,
        }
    }
}

impl From<ValidationError> for VaultError {
    fn from(e: ValidationError) -> Self {
        match e {
            ValidationError::MetadataInvalid { field, len } => {
                VaultError::MetadataInvalid { field, len }
            }
            ValidationError::MagnitudeInvalid { value } => VaultError::MagnitudeInvalid { value },
            ValidationError::TaxonomyInvalid(v) => VaultError::TaxonomyInvalid(v),
        }
    }
}

impl From<PermsError> for VaultError {
    fn from(e: PermsError) -> Self {
        match e {
            PermsError::PermissionDenied {
                vault_key,
                accessor,
            } => VaultError::PermissionDenied {
                vault_key,
                accessor,
            },
            other @ PermsError::AlreadyRecorded { .. } => {
                VaultError::Store(StoreError::InvalidData(other.to_string()))
            }
        }
    }
}

/// Result type for Vault operations.
pub type Result<T> = std::result::Result<T, VaultError>;
