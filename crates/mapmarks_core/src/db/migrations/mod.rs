//! Schema registry and executor for the places database.
//!
//! # Responsibility
//! - Create the `places` table on first open.
//! - Rebuild the schema on version changes.
//!
//! # Invariants
//! - The applied schema version is mirrored to `PRAGMA user_version`.
//! - Upgrades are destructive: no row migration across versions is
//!   supported, the table is dropped and recreated.

use crate::db::DbResult;
use log::warn;
use rusqlite::Connection;

const SCHEMA_SQL: &str = include_str!("0001_places.sql");

/// The schema version written by this build.
pub const SCHEMA_VERSION: u32 = 1;

/// Returns the latest schema version known by this binary.
pub fn latest_version() -> u32 {
    SCHEMA_VERSION
}

/// Brings the connection's schema to the latest version.
///
/// A fresh database (version 0) gets the schema created in place. Any
/// other version mismatch drops the `places` table and recreates it,
/// discarding existing rows.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    if current_version != 0 {
        warn!(
            "event=db_migrate module=db status=rebuild from_version={current_version} to_version={latest}"
        );
        tx.execute_batch("DROP TABLE IF EXISTS places;")?;
    }
    tx.execute_batch(SCHEMA_SQL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {latest};"))?;
    tx.commit()?;

    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
