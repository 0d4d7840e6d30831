//! Database schema migrations for SQLite.
//!
//! We use a simple versioned migration system. Each migration is a SQL string
//! that transforms the schema from version N to N+1.

use rusqlite::Connection;

use crate::error::{Result, StoreError};

/// Current schema version.
pub const CURRENT_VERSION: u32 = 1;

/// Initialize or migrate the database schema.
///
/// This function is idempotent - it can be called multiple times safely.
pub fn migrate(conn: &mut Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at INTEGER NOT NULL
        )",
        [],
    )?;

    let current: u32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;

    if current > CURRENT_VERSION {
        return Err(StoreError::Migration(format!(
            "database schema version {} is newer than supported version {}",
            current, CURRENT_VERSION
        )));
    }

    if current < CURRENT_VERSION {
        let tx = conn.transaction()?;

        for version in (current + 1)..=CURRENT_VERSION {
            tracing::info!(version, "applying schema migration");
            apply_migration(&tx, version)?;

            tx.execute(
                "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)",
                rusqlite::params![version, now_millis()],
            )?;
        }

        tx.commit()?;
    }

    Ok(())
}

/// Apply a specific migration version.
fn apply_migration(conn: &Connection, version: u32) -> Result<()> {
    match version {
        1 => apply_v1(conn),
        _ => Err(StoreError::Migration(format!(
            "unknown migration version: {}",
            version
        ))),
    }
}

/// Migration v1: Initial schema.
fn apply_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Document records: one row per registered vault key
        CREATE TABLE documents (
            vault_key INTEGER PRIMARY KEY,       -- allocated sequentially from 1
            entity_metadata TEXT NOT NULL,       -- ASCII, 1..=64 bytes
            custodian BLOB NOT NULL,             -- 32 bytes, current custodian
            payload_magnitude INTEGER NOT NULL,  -- 1..1e9
            genesis_block INTEGER NOT NULL,      -- host sequence at creation (u64 bits)
            professional_notation TEXT NOT NULL, -- ASCII, 1..=128 bytes
            taxonomy_labels BLOB NOT NULL,       -- CBOR array of 1..=10 labels
            created_at INTEGER NOT NULL,         -- local wall clock (Unix ms)
            updated_at INTEGER NOT NULL
        );

        -- Permission table keyed by (vault_key, accessor)
        CREATE TABLE permissions (
            vault_key INTEGER NOT NULL,
            accessor BLOB NOT NULL,              -- 32 bytes
            permission_active INTEGER NOT NULL,  -- 0 or 1
            recorded_at INTEGER NOT NULL,
            PRIMARY KEY (vault_key, accessor)
        );

        -- Global registration counter (single row)
        CREATE TABLE vault_counter (
            id INTEGER PRIMARY KEY CHECK (id = 0),
            total_vault_entries INTEGER NOT NULL
        );
        INSERT INTO vault_counter (id, total_vault_entries) VALUES (0, 0);

        CREATE INDEX idx_documents_custodian ON documents(custodian);
        "#,
    )?;

    Ok(())
}

/// Get current time in milliseconds.
pub(crate) fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}
