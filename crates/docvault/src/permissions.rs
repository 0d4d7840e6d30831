//! The permission table, as seen by callers of the vault.

use std::sync::Arc;

use docvault_core::{Principal, VaultKey};
use docvault_perms::{PermissionKey, PermissionLookup};
use docvault_store::Store;

use crate::error::Result;

/// Read access to the permission table.
///
/// Entries are written by registration only; this view never writes.
pub struct PermissionTable<S: Store> {
    store: Arc<S>,
}

impl<S: Store> PermissionTable<S> {
    pub(crate) fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Look up a pair without turning absence into an error.
    pub async fn lookup(&self, vault_key: VaultKey, accessor: &Principal) -> Result<PermissionLookup> {
        let key = PermissionKey::new(vault_key, *accessor);
        Ok(self.store.get_permission(&key).await?.into())
    }

    /// The stored flag for the pair, or `PermissionDenied` if there is none.
    ///
    /// Custodianship is not consulted: a successor that received a record by
    /// transfer has no entry unless one was recorded for it.
    pub async fn check(&self, vault_key: VaultKey, accessor: &Principal) -> Result<bool> {
        let key = PermissionKey::new(vault_key, *accessor);
        let lookup = self.lookup(vault_key, accessor).await?;
        if lookup == PermissionLookup::Absent {
            tracing::debug!(vault_key = %vault_key, accessor = %accessor, "no permission entry");
        }
        Ok(lookup.into_result(&key)?)
    }
}
