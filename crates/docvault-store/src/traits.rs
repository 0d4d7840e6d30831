//! Store trait: the abstract interface for vault persistence.
//!
//! This trait allows the vault to be storage-agnostic. Implementations
//! include SQLite (primary) and in-memory (for tests).

use async_trait::async_trait;
use docvault_core::{DocumentFields, DocumentRecord, NewDocument, Principal, VaultKey};
use docvault_perms::{PermissionEntry, PermissionKey};

use crate::error::Result;

/// Result of committing a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterResult {
    /// The document was stored under the newly allocated key.
    Registered(VaultKey),
    /// A record already occupies the key the counter allocated.
    /// Nothing was written.
    Collision(VaultKey),
}

/// The Store trait: async interface for vault persistence.
///
/// Each method is one all-or-nothing unit of work. Callers are expected to
/// serialize writes (the vault holds a write gate); the store only has to
/// make each individual call atomic.
///
/// # Design Notes
///
/// - **Key allocation** happens inside [`Store::insert_registration`], in
///   the same transaction that advances the counter.
/// - **Permissions** are only ever written by registration.
/// - **No deletion**: records live forever once registered.
#[async_trait]
pub trait Store: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────
    // Document Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Get a document by key.
    async fn get_document(&self, key: VaultKey) -> Result<Option<DocumentRecord>>;

    /// Number of successful registrations so far.
    async fn entry_count(&self) -> Result<u64>;

    /// Allocate the next key and store a new document under it.
    ///
    /// In one transaction: compute `key = entry_count + 1`; if a record
    /// already exists there, return `Collision(key)`; otherwise insert the
    /// record, insert an active permission entry for the custodian, and set
    /// the counter to `key`.
    async fn insert_registration(&self, doc: &NewDocument) -> Result<RegisterResult>;

    /// Replace the four mutable fields of an existing document.
    ///
    /// Returns `false` if there is no document at `key`.
    async fn replace_fields(&self, key: VaultKey, fields: &DocumentFields) -> Result<bool>;

    /// Replace the custodian of an existing document.
    ///
    /// Returns `false` if there is no document at `key`.
    async fn replace_custodian(&self, key: VaultKey, successor: &Principal) -> Result<bool>;

    // ─────────────────────────────────────────────────────────────────────────
    // Permission Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Get the permission entry for an exact `(vault key, accessor)` pair.
    async fn get_permission(&self, key: &PermissionKey) -> Result<Option<PermissionEntry>>;
}
