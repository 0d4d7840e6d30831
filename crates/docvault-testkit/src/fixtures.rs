//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::atomic::{AtomicU64, Ordering};

use docvault::{Vault, VaultConfig};
use docvault_core::{CallContext, DocumentFields, Principal};
use docvault_store::{MemoryStore, Store};

/// A vault plus a host clock and three named principals.
pub struct TestFixture<S: Store = MemoryStore> {
    pub vault: Vault<S>,
    pub alice: Principal,
    pub bob: Principal,
    pub carol: Principal,
    sequence: AtomicU64,
}

impl TestFixture<MemoryStore> {
    /// Create a fixture over a fresh memory store.
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }
}

impl Default for TestFixture<MemoryStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Store> TestFixture<S> {
    /// Create a fixture over the given store with default configuration.
    pub fn with_store(store: S) -> Self {
        Self::with_config(store, VaultConfig::default())
    }

    pub fn with_config(store: S, config: VaultConfig) -> Self {
        Self {
            vault: Vault::new(store, config),
            alice: Principal::derive("alice"),
            bob: Principal::derive("bob"),
            carol: Principal::derive("carol"),
            sequence: AtomicU64::new(100),
        }
    }

    /// Context for a call by `caller`. Each call advances the host sequence.
    pub fn ctx(&self, caller: &Principal) -> CallContext {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst);
        CallContext::new(*caller, sequence)
    }

    /// The sequence value the next call will observe.
    pub fn next_sequence(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }
}

/// The fields used throughout the examples: `("Doc", 100, "Note", ["a"])`.
pub fn sample_fields() -> DocumentFields {
    DocumentFields::new("Doc", 100, "Note", ["a"])
}

/// A fresh principal nobody else knows.
pub fn random_principal() -> Principal {
    Principal::from_bytes(rand::random())
}

/// Deterministic principals for multi-party tests.
pub fn multi_party_principals(count: usize) -> Vec<Principal> {
    (0..count)
        .map(|i| Principal::derive(&format!("party-{}", i)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use docvault::VaultKey;

    #[tokio::test]
    async fn test_fixture_register_and_read() {
        let fixture = TestFixture::new();
        let seq = fixture.next_sequence();

        let key = fixture
            .vault
            .register(&fixture.ctx(&fixture.alice), sample_fields())
            .await
            .unwrap();

        assert_eq!(key, VaultKey::FIRST);
        assert_eq!(fixture.vault.genesis_block(key).await.unwrap(), seq);
    }

    #[test]
    fn test_ctx_advances_sequence() {
        let fixture = TestFixture::new();
        let a = fixture.ctx(&fixture.alice);
        let b = fixture.ctx(&fixture.bob);

        assert_eq!(b.sequence, a.sequence + 1);
        assert_eq!(b.caller, fixture.bob);
    }

    #[test]
    fn test_multi_party() {
        let parties = multi_party_principals(3);
        assert_ne!(parties[0], parties[1]);
        assert_ne!(parties[1], parties[2]);
        assert_ne!(parties[0], parties[2]);
        assert_ne!(random_principal(), random_principal());
    }
}
