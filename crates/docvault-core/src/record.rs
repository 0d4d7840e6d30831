//! Document records: metadata describing an externally stored payload.

use serde::{Deserialize, Serialize};

use crate::context::CallContext;
use crate::types::{Principal, VaultKey};

/// The four fields a custodian may set at registration and replace on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFields {
    /// ASCII, 1..=64 bytes.
    pub entity_metadata: String,
    /// External size/weight descriptor, 1..1_000_000_000.
    pub payload_magnitude: u64,
    /// ASCII annotation (attestation, certification text), 1..=128 bytes.
    pub professional_notation: String,
    /// Ordered classification tags, 1..=10 labels of 1..=32 ASCII bytes.
    pub taxonomy_labels: Vec<String>,
}

impl DocumentFields {
    pub fn new<L, S>(
        entity_metadata: impl Into<String>,
        payload_magnitude: u64,
        professional_notation: impl Into<String>,
        taxonomy_labels: L,
    ) -> Self
    where
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entity_metadata: entity_metadata.into(),
            payload_magnitude,
            professional_notation: professional_notation.into(),
            taxonomy_labels: taxonomy_labels.into_iter().map(Into::into).collect(),
        }
    }
}

/// A document awaiting key allocation.
///
/// Built from validated fields and the registering call's context; the
/// store assigns the key inside its registration transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocument {
    pub fields: DocumentFields,
    pub custodian: Principal,
    pub genesis_block: u64,
}

impl NewDocument {
    /// Capture the caller as custodian and the host sequence as genesis block.
    pub fn from_call(ctx: &CallContext, fields: DocumentFields) -> Self {
        Self {
            fields,
            custodian: ctx.caller,
            genesis_block: ctx.sequence,
        }
    }

    /// Attach the allocated key.
    pub fn into_record(self, vault_key: VaultKey) -> DocumentRecord {
        DocumentRecord {
            vault_key,
            fields: self.fields,
            custodian: self.custodian,
            genesis_block: self.genesis_block,
        }
    }
}

/// A stored document record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub vault_key: VaultKey,
    pub fields: DocumentFields,
    /// Only this principal may update or transfer the record.
    pub custodian: Principal,
    /// Host sequence counter at creation. Never changes.
    pub genesis_block: u64,
}

impl DocumentRecord {
    pub fn entity_metadata(&self) -> &str {
        &self.fields.entity_metadata
    }

    pub fn payload_magnitude(&self) -> u64 {
        self.fields.payload_magnitude
    }

    pub fn professional_notation(&self) -> &str {
        &self.fields.professional_notation
    }

    pub fn taxonomy_labels(&self) -> &[String] {
        &self.fields.taxonomy_labels
    }
}
