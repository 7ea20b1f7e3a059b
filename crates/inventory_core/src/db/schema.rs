//! Products schema creation.
//!
//! # Responsibility
//! - Create the `products` table on first open.
//! - Track the pinned schema version in `PRAGMA user_version`.
//!
//! # Invariants
//! - Schema version is fixed at `SCHEMA_VERSION`; there is no upgrade path.
//! - A database stamped with a newer version is refused, never modified.
//! - Creation runs in one transaction together with the version stamp.
//! - An unversioned file that already holds a `products` table is refused
//!   and left unstamped.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::{Connection, TransactionBehavior};

/// Pinned schema version of the products database.
pub const SCHEMA_VERSION: u32 = 1;

const CREATE_PRODUCTS_SQL: &str = include_str!("0001_products.sql");

/// Creates the schema when missing; no-op when already at `SCHEMA_VERSION`.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file was written by a newer build.
/// - `Sqlite` when creation or the version read fails, including when an
///   unversioned file already has a `products` table.
pub fn ensure_schema(conn: &mut Connection) -> DbResult<()> {
    let current = current_user_version(conn)?;

    if current > SCHEMA_VERSION {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: SCHEMA_VERSION,
        });
    }

    if current == SCHEMA_VERSION {
        return Ok(());
    }

    // Another connection may have created the schema since the read above.
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    if current_user_version(&tx)? == SCHEMA_VERSION {
        return Ok(());
    }
    tx.execute_batch(CREATE_PRODUCTS_SQL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    tx.commit()?;

    info!(
        "event=schema_create module=db status=ok from_version={} to_version={}",
        current, SCHEMA_VERSION
    );
    Ok(())
}

/// Reads `PRAGMA user_version`.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
