//! In-memory implementation of the Store trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use docvault_core::{
    validate_fields, DocumentFields, DocumentRecord, NewDocument, Principal, VaultKey,
};
use docvault_perms::{PermissionEntry, PermissionKey, PermissionState};

use crate::error::{Result, StoreError};
use crate::traits::{RegisterResult, Store};

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock; a
/// registration holds the write lock for its whole check-and-insert, which
/// makes it atomic.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

#[derive(Default)]
struct MemoryStoreInner {
    /// Documents indexed by key.
    documents: BTreeMap<VaultKey, DocumentRecord>,

    /// Permission table.
    permissions: PermissionState,

    /// Global registration counter.
    total_vault_entries: u64,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner::default()),
        }
    }

    /// Place a record at its own key without touching the counter or the
    /// permission table.
    ///
    /// Meant for seeding and imports. The fields must pass validation and the
    /// key must be free; an existing record is never replaced. A record
    /// imported above the counter will be hit by a later registration as a
    /// collision.
    pub fn import_document(&self, record: DocumentRecord) -> Result<()> {
        validate_fields(&record.fields)?;

        let mut inner = self.write()?;
        if inner.documents.contains_key(&record.vault_key) {
            return Err(StoreError::Occupied(record.vault_key));
        }
        inner.documents.insert(record.vault_key, record);
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryStoreInner>> {
        self.inner
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryStoreInner>> {
        self.inner
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_document(&self, key: VaultKey) -> Result<Option<DocumentRecord>> {
        let inner = self.read()?;
        Ok(inner.documents.get(&key).cloned())
    }

    async fn entry_count(&self) -> Result<u64> {
        Ok(self.read()?.total_vault_entries)
    }

    async fn insert_registration(&self, doc: &NewDocument) -> Result<RegisterResult> {
        let mut inner = self.write()?;

        let total = inner.total_vault_entries;
        let key = VaultKey::after(total).ok_or(StoreError::KeysExhausted(total))?;
        let permission = PermissionKey::new(key, doc.custodian);

        // Check everything before writing anything
        if inner.documents.contains_key(&key) || inner.permissions.get(&permission).is_some() {
            return Ok(RegisterResult::Collision(key));
        }

        inner
            .permissions
            .record_custodian(key, doc.custodian)
            .map_err(|e| StoreError::InvalidData(e.to_string()))?;
        inner.documents.insert(key, doc.clone().into_record(key));
        inner.total_vault_entries = key.get();

        Ok(RegisterResult::Registered(key))
    }

    async fn replace_fields(&self, key: VaultKey, fields: &DocumentFields) -> Result<bool> {
        let mut inner = self.write()?;
        match inner.documents.get_mut(&key) {
            Some(record) => {
                record.fields = fields.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn replace_custodian(&self, key: VaultKey, successor: &Principal) -> Result<bool> {
        let mut inner = self.write()?;
        match inner.documents.get_mut(&key) {
            Some(record) => {
                record.custodian = *successor;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_permission(&self, key: &PermissionKey) -> Result<Option<PermissionEntry>> {
        Ok(self.read()?.permissions.get(key))
    }
}
