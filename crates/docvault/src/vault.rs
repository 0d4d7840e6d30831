//! The Vault: document registry plus permission table.
//!
//! Every write resolves the current record, runs validation against the
//! caller and the proposed values, and only then commits. Reads project a
//! single field and never mutate anything.

use std::sync::Arc;

use docvault_core::{
    is_custodian, validate_fields, CallContext, DocumentFields, DocumentRecord, NewDocument,
    Principal, VaultKey,
};
use docvault_store::{RegisterResult, SqliteStore, Store, StoreError};
use tokio::sync::Mutex;

use crate::config::VaultConfig;
use crate::error::{Result, VaultError};
use crate::permissions::PermissionTable;

/// The main Vault struct.
///
/// Provides a unified API for:
/// - Registering documents under sequential keys
/// - Custodian-gated update and transfer
/// - Field read projections
/// - Permission checks
pub struct Vault<S: Store> {
    /// The storage backend.
    store: Arc<S>,
    /// Permission table view over the same store.
    permissions: PermissionTable<S>,
    /// Configuration.
    config: VaultConfig,
    /// Serializes writes so each one reads, checks, and commits as a unit.
    write_gate: Mutex<()>,
}

impl Vault<SqliteStore> {
    /// Open a SQLite-backed vault from configuration.
    pub fn open(config: VaultConfig) -> Result<Self> {
        let store = config.storage.open()?;
        Ok(Self::new(store, config))
    }
}

impl<S: Store> Vault<S> {
    /// Create a new vault instance.
    pub fn new(store: S, config: VaultConfig) -> Self {
        let store = Arc::new(store);
        Self {
            permissions: PermissionTable::new(Arc::clone(&store)),
            store,
            config,
            write_gate: Mutex::new(()),
        }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the configuration.
    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    /// Get the permission table.
    pub fn permissions(&self) -> &PermissionTable<S> {
        &self.permissions
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Write Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Register a new document with the caller as custodian.
    ///
    /// Returns the newly allocated key. The record, the custodian's
    /// permission entry, and the counter advance commit together.
    pub async fn register(&self, ctx: &CallContext, fields: DocumentFields) -> Result<VaultKey> {
        let _gate = self.write_gate.lock().await;

        if let Err(e) = validate_fields(&fields) {
            tracing::warn!(caller = %ctx.caller, error = %e, "registration rejected");
            return Err(e.into());
        }

        let doc = NewDocument::from_call(ctx, fields);
        match self.store.insert_registration(&doc).await? {
            RegisterResult::Registered(key) => {
                tracing::info!(
                    vault_key = %key,
                    custodian = %ctx.caller,
                    genesis_block = ctx.sequence,
                    "document registered"
                );
                Ok(key)
            }
            RegisterResult::Collision(key) => {
                tracing::warn!(vault_key = %key, "registration collided with existing record");
                Err(VaultError::RecordCollision(key))
            }
        }
    }

    /// Replace the four mutable fields of a record.
    ///
    /// Checks run in order: existence, authority, then the field checks of
    /// [`validate_fields`]. Custodian and genesis block are untouched.
    pub async fn update(
        &self,
        ctx: &CallContext,
        key: VaultKey,
        fields: DocumentFields,
    ) -> Result<()> {
        let _gate = self.write_gate.lock().await;

        let record = self.fetch(key).await?;
        authorize(&record, ctx)?;

        if let Err(e) = validate_fields(&fields) {
            tracing::warn!(vault_key = %key, error = %e, "update rejected");
            return Err(e.into());
        }

        if !self.store.replace_fields(key, &fields).await? {
            return Err(VaultError::RecordNotFound(key));
        }

        tracing::debug!(vault_key = %key, "document updated");
        Ok(())
    }

    /// Hand custody of a record to `successor`.
    ///
    /// No permission entry is created for the successor.
    pub async fn transfer(
        &self,
        ctx: &CallContext,
        key: VaultKey,
        successor: Principal,
    ) -> Result<()> {
        let _gate = self.write_gate.lock().await;

        let record = self.fetch(key).await?;
        authorize(&record, ctx)?;

        if !self.store.replace_custodian(key, &successor).await? {
            return Err(VaultError::RecordNotFound(key));
        }

        tracing::info!(
            vault_key = %key,
            from = %ctx.caller,
            to = %successor,
            "custody transferred"
        );
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Read Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Number of successful registrations.
    pub async fn count(&self) -> Result<u64> {
        Ok(self.store.entry_count().await?)
    }

    /// The full record at `key`.
    pub async fn document(&self, key: VaultKey) -> Result<DocumentRecord> {
        self.fetch(key).await
    }

    pub async fn entity_metadata(&self, key: VaultKey) -> Result<String> {
        Ok(self.fetch(key).await?.fields.entity_metadata)
    }

    /// Taxonomy labels in registration order.
    pub async fn taxonomy(&self, key: VaultKey) -> Result<Vec<String>> {
        Ok(self.fetch(key).await?.fields.taxonomy_labels)
    }

    pub async fn custodian(&self, key: VaultKey) -> Result<Principal> {
        Ok(self.fetch(key).await?.custodian)
    }

    pub async fn genesis_block(&self, key: VaultKey) -> Result<u64> {
        Ok(self.fetch(key).await?.genesis_block)
    }

    pub async fn payload_magnitude(&self, key: VaultKey) -> Result<u64> {
        Ok(self.fetch(key).await?.fields.payload_magnitude)
    }

    pub async fn professional_notation(&self, key: VaultKey) -> Result<String> {
        Ok(self.fetch(key).await?.fields.professional_notation)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Permission Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Check the permission flag for `(key, accessor)`.
    pub async fn check_permission(&self, key: VaultKey, accessor: &Principal) -> Result<bool> {
        self.permissions.check(key, accessor).await
    }

    /// Look up a record or fail with `RecordNotFound`.
    async fn fetch(&self, key: VaultKey) -> Result<DocumentRecord> {
        let record = match self.store.get_document(key).await? {
            Some(record) => record,
            None => {
                tracing::debug!(vault_key = %key, "record not found");
                return Err(VaultError::RecordNotFound(key));
            }
        };

        if self.config.validate_on_read {
            validate_fields(&record.fields).map_err(|e| {
                StoreError::InvalidData(format!("stored record {} is out of bounds: {}", key, e))
            })?;
        }

        Ok(record)
    }
}

fn authorize(record: &DocumentRecord, ctx: &CallContext) -> Result<()> {
    if is_custodian(record, &ctx.caller) {
        return Ok(());
    }
    tracing::warn!(
        vault_key = %record.vault_key,
        caller = %ctx.caller,
        "caller is not the custodian"
    );
    Err(VaultError::AuthorityMismatch {
        vault_key: record.vault_key,
        caller: ctx.caller,
    })
}
