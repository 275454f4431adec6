//! Schema migrations.
//!
//! Creates the `sessions` and `careers` tables. Safe to run repeatedly.
//!
//! Tag columns hold JSON arrays of strings (see [`careerbot_core::tags`]).

use anyhow::Result;
use sqlx::Connection;

use crate::config::Config;
use crate::db;

pub async fn run_migrations(config: &Config) -> Result<()> {
    let mut conn = db::connect(config).await?;

    // One row per user with an in-progress quiz
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            user_id INTEGER PRIMARY KEY,
            tags TEXT NOT NULL DEFAULT '[]',
            current INTEGER NOT NULL DEFAULT 0 CHECK (current >= 0)
        )
        "#,
    )
    .execute(&mut conn)
    .await?;

    // Career catalog; the autoincrement id records catalog order
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS careers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            age_bracket TEXT NOT NULL DEFAULT 'all',
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            tags TEXT NOT NULL DEFAULT '[]',
            UNIQUE(name, age_bracket)
        )
        "#,
    )
    .execute(&mut conn)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_careers_age_bracket ON careers(age_bracket)")
        .execute(&mut conn)
        .await?;

    conn.close().await?;
    tracing::debug!(db = %config.db.path.display(), "migrations applied");
    Ok(())
}
