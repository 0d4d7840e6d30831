//! # Docvault Core
//!
//! Pure primitives for docvault: document records, principals, vault keys,
//! and the validation layer that every write runs before committing.
//!
//! This crate contains no I/O, no storage, no async. It is pure computation
//! over the record data model.
//!
//! ## Key Types
//!
//! - [`VaultKey`] - Sequential identifier of a document record
//! - [`Principal`] - Opaque caller identity supplied by the host
//! - [`DocumentFields`] - The four custodian-mutable fields
//! - [`DocumentRecord`] - A stored record: fields plus custodian and genesis block
//! - [`CallContext`] - Per-call host context (caller identity, sequence counter)
//!
//! ## Validation
//!
//! Field bounds are enforced by the predicates in [`validation`]. See
//! [`validate_fields`] for the fixed check order used by register and update.

pub mod context;
pub mod error;
pub mod record;
pub mod types;
pub mod validation;

pub use context::CallContext;
pub use error::{TaxonomyViolation, TextField, ValidationError};
pub use record::{DocumentFields, DocumentRecord, NewDocument};
pub use types::{Principal, VaultKey};
pub use validation::{
    is_custodian, label_valid, magnitude_in_bounds, taxonomy_set_valid, text_in_bounds,
    validate_fields, MAGNITUDE_CEILING, MAX_LABELS, MAX_LABEL_LEN, MAX_METADATA_LEN,
    MAX_NOTATION_LEN,
};
