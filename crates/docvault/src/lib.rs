//! # Docvault
//!
//! An authenticated record store. Callers register document records
//! (metadata describing an externally stored payload) under sequential keys;
//! only the recorded custodian may update or transfer a record, and a
//! permission table records which principals may access which record.
//!
//! ## Overview
//!
//! - **Registry**: allocates keys from 1, stores records, enforces custodianship
//! - **Validation**: field bounds checked before any write commits
//! - **Permissions**: a write-once flag per `(vault key, principal)` pair,
//!   recorded for the registering custodian
//!
//! The host platform supplies a [`CallContext`] with every write: who is
//! calling, and a non-decreasing sequence counter that becomes the record's
//! genesis block.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use docvault::{CallContext, DocumentFields, Principal, Vault, VaultConfig, VaultKey};
//!
//! async fn example() {
//!     let vault = Vault::open(VaultConfig::sqlite("vault.db")).unwrap();
//!
//!     let alice = Principal::derive("alice");
//!     let key = vault
//!         .register(
//!             &CallContext::new(alice, 1),
//!             DocumentFields::new("Doc", 100, "Note", ["a"]),
//!         )
//!         .await
//!         .unwrap();
//!     assert_eq!(key, VaultKey::FIRST);
//!
//!     assert_eq!(vault.custodian(key).await.unwrap(), alice);
//!     assert!(vault.check_permission(key, &alice).await.unwrap());
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `docvault::core` - Records, principals, validation
//! - `docvault::store` - Storage abstraction and SQLite
//! - `docvault::perms` - Permission table types

pub mod config;
pub mod error;
pub mod permissions;
pub mod vault;

// Re-export component crates
pub use docvault_core as core;
pub use docvault_perms as perms;
pub use docvault_store as store;

// Re-export main types for convenience
pub use config::{StorageConfig, VaultConfig};
pub use error::{ErrorKind, Result, VaultError};
pub use permissions::PermissionTable;
pub use vault::Vault;

// Re-export commonly used core types
pub use docvault_core::{
    CallContext, DocumentFields, DocumentRecord, Principal, TaxonomyViolation, TextField, VaultKey,
};
pub use docvault_perms::PermissionLookup;
