//! # Docvault Permissions
//!
//! The permission table: a boolean access flag per `(vault key, accessor)`
//! pair, queried independently of custodianship.
//!
//! ## Key Concepts
//!
//! - **PermissionKey**: the composite key, a vault key plus an accessor principal
//! - **PermissionEntry**: the stored flag for one pair
//! - **PermissionLookup**: the result of a lookup, distinguishing an absent
//!   entry from one that is present but inactive
//!
//! ## Lifecycle
//!
//! An entry is written once, for the registering custodian, in the same
//! transaction that creates the record. Nothing revokes it afterwards, and a
//! transfer of custody does not create an entry for the successor.

pub mod error;
pub mod state;

pub use error::{PermsError, Result};
pub use state::{PermissionEntry, PermissionKey, PermissionLookup, PermissionState};
