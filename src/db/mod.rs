// Database module

pub mod migrations;
pub mod schema;

use std::path::PathBuf;

use anyhow::Result;
use rusqlite::Connection;

use crate::constants::{BOOKSHELF_FOLDER, DB_FILENAME};

/// Get the Bookshelf data folder: ~/.bookshelf
pub fn get_data_dir() -> Result<PathBuf> {
    let dirs = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
    Ok(dirs.home_dir().join(BOOKSHELF_FOLDER))
}

/// Get the database path: ~/.bookshelf/books.db
pub fn get_db_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join(DB_FILENAME))
}

/// Open the database, set pragmas, and run migrations.
/// This is the schema bootstrap: idempotent, and fatal to startup on failure.
pub fn open_db(db_path: &std::path::Path) -> Result<Connection> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Cannot create data directory {}: {}. Check directory permissions.",
                parent.display(),
                e
            )
        })?;
    }

    let conn = Connection::open(db_path)?;

    conn.execute_batch("PRAGMA journal_mode = WAL;")?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.execute_batch("PRAGMA busy_timeout = 5000;")?;

    migrations::run_migrations(&conn)?;

    Ok(conn)
}
