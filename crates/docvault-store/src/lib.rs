//! # Docvault Store
//!
//! Storage abstraction for docvault. Provides a trait-based interface for
//! document, permission, and counter persistence with SQLite and in-memory
//! implementations.
//!
//! ## Overview
//!
//! The vault is storage-agnostic: it talks to the [`Store`] trait. The
//! primary implementation is [`SqliteStore`], with [`MemoryStore`] for
//! testing.
//!
//! ## Key Types
//!
//! - [`Store`] - The async trait for all storage operations
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage for tests
//! - [`RegisterResult`] - Result of committing a registration
//!
//! ## Usage
//!
//! ```rust,no_run
//! use docvault_store::{SqliteStore, Store};
//!
//! async fn example() {
//!     // Open a SQLite database
//!     let store = SqliteStore::open("vault.db").unwrap();
//!
//!     // Or use an in-memory database for testing
//!     let store = SqliteStore::open_memory().unwrap();
//!
//!     let total = store.entry_count().await.unwrap();
//!     assert_eq!(total, 0);
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Atomic registration**: key allocation, record insert, custodian
//!   permission insert, and counter advance commit together or not at all
//! - **Collision detection**: an occupied key at allocation time returns
//!   `Collision` instead of overwriting
//! - **Order-preserving labels**: taxonomy labels are stored as a CBOR array

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{RegisterResult, Store};
