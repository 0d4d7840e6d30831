//! SQLite implementation of the Store trait.
//!
//! This is the primary storage backend for docvault. It uses rusqlite with
//! bundled SQLite, wrapped in async via tokio::spawn_blocking.
//!
//! Keys, counters, magnitudes and genesis blocks are `u64` stored in SQLite's
//! signed 64-bit INTEGER column by bit cast. Values above `i64::MAX` read back
//! unchanged but sort as negative numbers inside SQL.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};

use docvault_core::{
    validate_fields, DocumentFields, DocumentRecord, NewDocument, Principal, VaultKey,
};
use docvault_perms::{PermissionEntry, PermissionKey};

use crate::error::{Result, StoreError};
use crate::migration::{self, now_millis};
use crate::traits::{RegisterResult, Store};

const SELECT_DOCUMENT: &str = "SELECT vault_key, entity_metadata, custodian, payload_magnitude,
        genesis_block, professional_notation, taxonomy_labels
 FROM documents WHERE vault_key = ?1";

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex. All operations use spawn_blocking
/// to avoid blocking the async runtime.
pub struct SqliteStore {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file (and missing parent directories) and runs migrations
    /// if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        tracing::debug!(path = %path.display(), "opened sqlite vault store");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Place a record at its own key without touching the counter or the
    /// permission table. Meant for seeding and imports.
    ///
    /// The fields must pass validation and the key must be free; an existing
    /// record is never replaced.
    pub async fn import_document(&self, record: DocumentRecord) -> Result<()> {
        validate_fields(&record.fields)?;

        self.run(move |conn| {
            let labels = encode_labels(&record.fields.taxonomy_labels)?;
            let tx = conn.transaction()?;

            let occupied: bool = tx.query_row(
                "SELECT EXISTS(SELECT 1 FROM documents WHERE vault_key = ?1)",
                params![record.vault_key.get() as i64],
                |row| row.get(0),
            )?;
            if occupied {
                return Err(StoreError::Occupied(record.vault_key));
            }

            let now = now_millis();
            tx.execute(
                "INSERT INTO documents (
                    vault_key, entity_metadata, custodian, payload_magnitude, genesis_block,
                    professional_notation, taxonomy_labels, created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
                params![
                    record.vault_key.get() as i64,
                    record.fields.entity_metadata,
                    record.custodian.as_bytes().as_slice(),
                    record.fields.payload_magnitude as i64,
                    record.genesis_block as i64,
                    record.fields.professional_notation,
                    labels,
                    now,
                ],
            )?;
            tx.commit()?;
            Ok(())
        })
        .await
    }

    /// Run a blocking operation on the connection off the async runtime.
    async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || {
            let mut conn = conn
                .lock()
                .map_err(|e| StoreError::Poisoned(format!("sqlite connection: {}", e)))?;
            f(&mut conn)
        })
        .await
        .map_err(|e| StoreError::Task(format!("spawn_blocking failed: {}", e)))?
    }
}

// Helper to convert a row to DocumentRecord
fn row_to_document(row: &rusqlite::Row<'_>) -> rusqlite::Result<DocumentRecord> {
    let custodian_bytes: Vec<u8> = row.get("custodian")?;
    let labels_cbor: Vec<u8> = row.get("taxonomy_labels")?;

    let custodian = Principal::try_from(custodian_bytes.as_slice())
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Blob, Box::new(e)))?;

    let taxonomy_labels: Vec<String> = ciborium::from_reader(labels_cbor.as_slice())
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Blob, Box::new(e)))?;

    Ok(DocumentRecord {
        vault_key: VaultKey::new(row.get::<_, i64>("vault_key")? as u64),
        fields: DocumentFields {
            entity_metadata: row.get("entity_metadata")?,
            payload_magnitude: row.get::<_, i64>("payload_magnitude")? as u64,
            professional_notation: row.get("professional_notation")?,
            taxonomy_labels,
        },
        custodian,
        genesis_block: row.get::<_, i64>("genesis_block")? as u64,
    })
}

// Helper to encode labels to CBOR
fn encode_labels(labels: &[String]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    ciborium::into_writer(labels, &mut buf).map_err(|e| StoreError::Serialization(e.to_string()))?;
    Ok(buf)
}

fn read_counter(conn: &Connection) -> Result<u64> {
    let total: i64 = conn.query_row(
        "SELECT total_vault_entries FROM vault_counter WHERE id = 0",
        [],
        |row| row.get(0),
    )?;
    Ok(total as u64)
}

#[async_trait]
impl Store for SqliteStore {
    async fn get_document(&self, key: VaultKey) -> Result<Option<DocumentRecord>> {
        self.run(move |conn| {
            conn.query_row(SELECT_DOCUMENT, params![key.get() as i64], row_to_document)
                .optional()
                .map_err(StoreError::from)
        })
        .await
    }

    async fn entry_count(&self) -> Result<u64> {
        self.run(|conn| read_counter(conn)).await
    }

    async fn insert_registration(&self, doc: &NewDocument) -> Result<RegisterResult> {
        let doc = doc.clone();

        self.run(move |conn| {
            let labels = encode_labels(&doc.fields.taxonomy_labels)?;
            let tx = conn.transaction()?;

            let total = read_counter(&tx)?;
            let key = VaultKey::after(total).ok_or(StoreError::KeysExhausted(total))?;

            let occupied: bool = tx.query_row(
                "SELECT EXISTS(SELECT 1 FROM documents WHERE vault_key = ?1)
                     OR EXISTS(SELECT 1 FROM permissions WHERE vault_key = ?1 AND accessor = ?2)",
                params![key.get() as i64, doc.custodian.as_bytes().as_slice()],
                |row| row.get(0),
            )?;

            if occupied {
                // Dropping the transaction rolls it back
                return Ok(RegisterResult::Collision(key));
            }

            let now = now_millis();

            tx.execute(
                "INSERT INTO documents (
                    vault_key, entity_metadata, custodian, payload_magnitude, genesis_block,
                    professional_notation, taxonomy_labels, created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
                params![
                    key.get() as i64,
                    doc.fields.entity_metadata,
                    doc.custodian.as_bytes().as_slice(),
                    doc.fields.payload_magnitude as i64,
                    doc.genesis_block as i64,
                    doc.fields.professional_notation,
                    labels,
                    now,
                ],
            )?;

            tx.execute(
                "INSERT INTO permissions (vault_key, accessor, permission_active, recorded_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    key.get() as i64,
                    doc.custodian.as_bytes().as_slice(),
                    PermissionEntry::ACTIVE.permission_active,
                    now,
                ],
            )?;

            tx.execute(
                "UPDATE vault_counter SET total_vault_entries = ?1 WHERE id = 0",
                params![key.get() as i64],
            )?;

            tx.commit()?;
            Ok(RegisterResult::Registered(key))
        })
        .await
    }

    async fn replace_fields(&self, key: VaultKey, fields: &DocumentFields) -> Result<bool> {
        let fields = fields.clone();

        self.run(move |conn| {
            let labels = encode_labels(&fields.taxonomy_labels)?;
            let changed = conn.execute(
                "UPDATE documents
                 SET entity_metadata = ?2, payload_magnitude = ?3,
                     professional_notation = ?4, taxonomy_labels = ?5, updated_at = ?6
                 WHERE vault_key = ?1",
                params![
                    key.get() as i64,
                    fields.entity_metadata,
                    fields.payload_magnitude as i64,
                    fields.professional_notation,
                    labels,
                    now_millis(),
                ],
            )?;
            Ok(changed == 1)
        })
        .await
    }

    async fn replace_custodian(&self, key: VaultKey, successor: &Principal) -> Result<bool> {
        let successor = *successor;

        self.run(move |conn| {
            let changed = conn.execute(
                "UPDATE documents SET custodian = ?2, updated_at = ?3 WHERE vault_key = ?1",
                params![
                    key.get() as i64,
                    successor.as_bytes().as_slice(),
                    now_millis()
                ],
            )?;
            Ok(changed == 1)
        })
        .await
    }

    async fn get_permission(&self, key: &PermissionKey) -> Result<Option<PermissionEntry>> {
        let key = *key;

        self.run(move |conn| {
            conn.query_row(
                "SELECT permission_active FROM permissions WHERE vault_key = ?1 AND accessor = ?2",
                params![key.vault_key.get() as i64, key.accessor.as_bytes().as_slice()],
                |row| {
                    Ok(PermissionEntry {
                        permission_active: row.get(0)?,
                    })
                },
            )
            .optional()
            .map_err(StoreError::from)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docvault_core::CallContext;

    fn make_doc(caller: &str, sequence: u64, labels: &[&str]) -> NewDocument {
        NewDocument::from_call(
            &CallContext::new(Principal::derive(caller), sequence),
            DocumentFields::new("Doc", 100, "Note", labels.iter().copied()),
        )
    }

    #[tokio::test]
    async fn test_insert_and_get_document() {
        let store = SqliteStore::open_memory().unwrap();
        let doc = make_doc("alice", 42, &["z", "a", "m"]);

        let result = store.insert_registration(&doc).await.unwrap();
        assert_eq!(result, RegisterResult::Registered(VaultKey::FIRST));

        let record = store.get_document(VaultKey::FIRST).await.unwrap().unwrap();
        assert_eq!(record, doc.clone().into_record(VaultKey::FIRST));
        assert_eq!(record.taxonomy_labels(), ["z", "a", "m"]);
        assert_eq!(store.entry_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_registration_records_custodian_permission() {
        let store = SqliteStore::open_memory().unwrap();
        let doc = make_doc("alice", 1, &["a"]);
        store.insert_registration(&doc).await.unwrap();

        let own = PermissionKey::new(VaultKey::FIRST, doc.custodian);
        let other = PermissionKey::new(VaultKey::FIRST, Principal::derive("carol"));
        assert_eq!(
            store.get_permission(&own).await.unwrap(),
            Some(PermissionEntry::ACTIVE)
        );
        assert_eq!(store.get_permission(&other).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_collision_rolls_back() {
        let store = SqliteStore::open_memory().unwrap();
        let squatter = make_doc("mallory", 1, &["x"]).into_record(VaultKey::FIRST);
        store.import_document(squatter.clone()).await.unwrap();

        let doc = make_doc("alice", 2, &["a"]);
        let result = store.insert_registration(&doc).await.unwrap();

        assert_eq!(result, RegisterResult::Collision(VaultKey::FIRST));
        assert_eq!(store.entry_count().await.unwrap(), 0);
        assert_eq!(
            store.get_document(VaultKey::FIRST).await.unwrap(),
            Some(squatter)
        );
        let perm = PermissionKey::new(VaultKey::FIRST, doc.custodian);
        assert_eq!(store.get_permission(&perm).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_import_never_replaces_a_record() {
        let store = SqliteStore::open_memory().unwrap();
        let doc = make_doc("alice", 100, &["a"]);
        store.insert_registration(&doc).await.unwrap();

        let takeover = make_doc("carol", 101, &["c"]).into_record(VaultKey::FIRST);
        let err = store.import_document(takeover).await.unwrap_err();
        assert!(matches!(err, StoreError::Occupied(k) if k == VaultKey::FIRST));

        let record = store.get_document(VaultKey::FIRST).await.unwrap().unwrap();
        assert_eq!(record, doc.into_record(VaultKey::FIRST));
    }

    #[tokio::test]
    async fn test_import_rejects_out_of_bounds_fields() {
        let store = SqliteStore::open_memory().unwrap();
        let mut record = make_doc("carol", 1, &["c"]).into_record(VaultKey::new(3));
        record.fields = DocumentFields::new("", 0, "", Vec::<String>::new());

        let err = store.import_document(record).await.unwrap_err();
        assert!(matches!(err, StoreError::Rejected(_)));
        assert_eq!(store.get_document(VaultKey::new(3)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_exhausted_key_space_registers_nothing() {
        let store = SqliteStore::open_memory().unwrap();
        store
            .conn
            .lock()
            .unwrap()
            .execute(
                "UPDATE vault_counter SET total_vault_entries = ?1 WHERE id = 0",
                params![u64::MAX as i64],
            )
            .unwrap();

        let err = store
            .insert_registration(&make_doc("alice", 1, &["a"]))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::KeysExhausted(u64::MAX)));
        assert_eq!(store.entry_count().await.unwrap(), u64::MAX);
    }

    #[tokio::test]
    async fn test_replace_fields_and_custodian() {
        let store = SqliteStore::open_memory().unwrap();
        store
            .insert_registration(&make_doc("alice", 5, &["a"]))
            .await
            .unwrap();

        let fields = DocumentFields::new("Doc v2", 200, "Note v2", ["b", "c"]);
        assert!(store.replace_fields(VaultKey::FIRST, &fields).await.unwrap());

        let bob = Principal::derive("bob");
        assert!(store.replace_custodian(VaultKey::FIRST, &bob).await.unwrap());

        let record = store.get_document(VaultKey::FIRST).await.unwrap().unwrap();
        assert_eq!(record.fields, fields);
        assert_eq!(record.custodian, bob);
        assert_eq!(record.genesis_block, 5);

        assert!(!store.replace_fields(VaultKey::new(2), &fields).await.unwrap());
        assert!(!store.replace_custodian(VaultKey::new(2), &bob).await.unwrap());
    }

    #[tokio::test]
    async fn test_state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("vault.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store
                .insert_registration(&make_doc("alice", 1, &["a"]))
                .await
                .unwrap();
            store
                .insert_registration(&make_doc("bob", 2, &["b"]))
                .await
                .unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.entry_count().await.unwrap(), 2);
        let result = store
            .insert_registration(&make_doc("carol", 3, &["c"]))
            .await
            .unwrap();
        assert_eq!(result, RegisterResult::Registered(VaultKey::new(3)));
    }

    #[tokio::test]
    async fn test_large_genesis_block_roundtrips() {
        let store = SqliteStore::open_memory().unwrap();
        store
            .insert_registration(&make_doc("alice", u64::MAX, &["a"]))
            .await
            .unwrap();

        let record = store.get_document(VaultKey::FIRST).await.unwrap().unwrap();
        assert_eq!(record.genesis_block, u64::MAX);
    }
}
