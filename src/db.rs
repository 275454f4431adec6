//! SQLite connection management.
//!
//! Career Bot keeps no connection pool: every store operation opens its own
//! connection from shared [`SqliteConnectOptions`] and closes it before
//! returning, so no mutable connection state outlives a single call.
//!
//! The database file and its parent directories are created automatically
//! if they don't exist. WAL mode is enabled so concurrent readers do not
//! block the writer.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteJournalMode};
use sqlx::ConnectOptions;
use std::str::FromStr;

use crate::config::Config;

/// Build connection options for the configured database.
///
/// Creates the parent directory of the database file if needed.
pub fn connect_options(config: &Config) -> Result<SqliteConnectOptions> {
    let db_path = &config.db.path;

    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }
    }

    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path.display()))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);

    Ok(options)
}

/// Open a single connection to the configured database.
pub async fn connect(config: &Config) -> Result<SqliteConnection> {
    let options = connect_options(config)?;
    let conn = options
        .connect()
        .await
        .with_context(|| format!("Failed to open database: {}", config.db.path.display()))?;
    Ok(conn)
}
