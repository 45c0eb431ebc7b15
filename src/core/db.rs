use crate::core::error::TallerError;
use crate::core::schemas;
use rusqlite::Connection;
use std::fs;
use std::path::Path;

/// Opens the workshop database with the pragmas every connection needs.
pub fn db_connect(db_path: &Path) -> Result<Connection, TallerError> {
    let conn = Connection::open(db_path)?;
    conn.busy_timeout(std::time::Duration::from_secs(5))?;
    conn.query_row("PRAGMA journal_mode=WAL;", [], |_| Ok(()))?;
    conn.execute("PRAGMA foreign_keys=ON;", [])?;
    Ok(conn)
}

/// Creates the database file and applies the full schema. Idempotent.
pub fn initialize_db(db_path: &Path) -> Result<(), TallerError> {
    if let Some(parent) = db_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let conn = db_connect(db_path)?;
    conn.execute_batch(schemas::TALLER_DB_SCHEMA)?;
    Ok(())
}

/// Unix-epoch seconds with `Z` suffix, used for audit timestamps.
pub fn now_epoch_z() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("{}Z", secs)
}
