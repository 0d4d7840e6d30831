//! # Docvault Testkit
//!
//! Testing utilities for docvault.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: a vault wired to a host clock, plus named principals
//! - **Generators**: Proptest strategies for valid and out-of-bounds field values
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use docvault_testkit::generators::valid_fields;
//!
//! proptest! {
//!     #[test]
//!     fn generated_fields_validate(fields in valid_fields()) {
//!         prop_assert!(docvault_core::validate_fields(&fields).is_ok());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use docvault_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let ctx = fixture.ctx(&fixture.alice);
//! assert_eq!(ctx.caller, fixture.alice);
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{multi_party_principals, random_principal, sample_fields, TestFixture};
pub use generators::valid_fields;
