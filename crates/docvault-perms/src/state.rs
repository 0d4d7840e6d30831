//! Permission state: the in-memory form of the permission table.
//!
//! Backends that keep the table in memory hold a [`PermissionState`];
//! persistent backends return the same [`PermissionEntry`] values and share
//! the lookup semantics through [`PermissionLookup`].

use std::collections::HashMap;

use docvault_core::{Principal, VaultKey};
use serde::{Deserialize, Serialize};

use crate::error::{PermsError, Result};

/// Composite key of the permission table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionKey {
    pub vault_key: VaultKey,
    pub accessor: Principal,
}

impl PermissionKey {
    pub const fn new(vault_key: VaultKey, accessor: Principal) -> Self {
        Self {
            vault_key,
            accessor,
        }
    }
}

/// The stored flag for one `(vault key, accessor)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionEntry {
    pub permission_active: bool,
}

impl PermissionEntry {
    /// The entry written for a custodian at registration.
    pub const ACTIVE: Self = Self {
        permission_active: true,
    };
}

/// Outcome of looking up a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionLookup {
    /// No entry has ever been recorded for the pair.
    Absent,
    /// An entry exists; the flag may be true or false.
    Present(bool),
}

impl PermissionLookup {
    /// Resolve the lookup for `key` into the checked result.
    ///
    /// `Absent` becomes `PermissionDenied`; a present entry yields its flag.
    pub fn into_result(self, key: &PermissionKey) -> Result<bool> {
        match self {
            PermissionLookup::Present(active) => Ok(active),
            PermissionLookup::Absent => Err(PermsError::PermissionDenied {
                vault_key: key.vault_key,
                accessor: key.accessor,
            }),
        }
    }
}

impl From<Option<PermissionEntry>> for PermissionLookup {
    fn from(entry: Option<PermissionEntry>) -> Self {
        match entry {
            Some(e) => PermissionLookup::Present(e.permission_active),
            None => PermissionLookup::Absent,
        }
    }
}

/// The permission table held in memory.
///
/// Entries are write-once: recording a pair that already exists fails and
/// leaves the original entry in place.
#[derive(Debug, Default, Clone)]
pub struct PermissionState {
    entries: HashMap<PermissionKey, PermissionEntry>,
}

impl PermissionState {
    /// Create a new empty permission state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an entry for a pair that has none yet.
    pub fn record(&mut self, key: PermissionKey, entry: PermissionEntry) -> Result<()> {
        if self.entries.contains_key(&key) {
            return Err(PermsError::AlreadyRecorded {
                vault_key: key.vault_key,
                accessor: key.accessor,
            });
        }
        self.entries.insert(key, entry);
        Ok(())
    }

    /// Record the active entry a custodian receives at registration.
    pub fn record_custodian(&mut self, vault_key: VaultKey, custodian: Principal) -> Result<()> {
        self.record(PermissionKey::new(vault_key, custodian), PermissionEntry::ACTIVE)
    }

    /// Get the raw entry for a pair.
    pub fn get(&self, key: &PermissionKey) -> Option<PermissionEntry> {
        self.entries.get(key).copied()
    }

    /// Look up a pair.
    pub fn lookup(&self, key: &PermissionKey) -> PermissionLookup {
        self.get(key).into()
    }
}
