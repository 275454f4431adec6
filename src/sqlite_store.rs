//! SQLite-backed [`Store`] implementation.
//!
//! Maps each [`Store`] operation to SQL against the `sessions` and
//! `careers` tables created by [`crate::migrate`]. Each call opens a fresh
//! connection and closes it before returning.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{ConnectOptions, Connection, Row};

use careerbot_core::error::{StoreError, StoreResult};
use careerbot_core::models::{AgeBracket, Career, CareerRecord, Session, UserId};
use careerbot_core::store::Store;
use careerbot_core::tags::{decode_tags, encode_tags};

/// SQLite implementation of the [`Store`] trait.
#[derive(Clone)]
pub struct SqliteStore {
    options: SqliteConnectOptions,
}

impl SqliteStore {
    pub fn new(options: SqliteConnectOptions) -> Self {
        Self { options }
    }

    async fn open(&self) -> StoreResult<SqliteConnection> {
        self.options.connect().await.map_err(StoreError::backend)
    }
}

async fn close(conn: SqliteConnection) -> StoreResult<()> {
    conn.close().await.map_err(StoreError::backend)
}

fn session_from_row(user_id: UserId, row: &SqliteRow) -> StoreResult<Session> {
    let tags: Option<String> = row.try_get("tags").map_err(StoreError::backend)?;
    let current: Option<i64> = row.try_get("current").map_err(StoreError::backend)?;
    let current = u32::try_from(current.unwrap_or(0)).map_err(|_| {
        StoreError::corrupt(format!(
            "session {} has out-of-range question index {:?}",
            user_id, current
        ))
    })?;

    Ok(Session {
        user_id,
        tags: decode_tags(tags.as_deref())?,
        current,
    })
}

fn career_from_row(row: &SqliteRow) -> StoreResult<Career> {
    let bracket: String = row.try_get("age_bracket").map_err(StoreError::backend)?;
    let tags: Option<String> = row.try_get("tags").map_err(StoreError::backend)?;

    Ok(Career {
        id: row.try_get("id").map_err(StoreError::backend)?,
        age_bracket: bracket.parse()?,
        name: row.try_get("name").map_err(StoreError::backend)?,
        description: row.try_get("description").map_err(StoreError::backend)?,
        tags: decode_tags(tags.as_deref())?,
    })
}

#[async_trait]
impl Store for SqliteStore {
    async fn get_session(&self, user_id: UserId) -> StoreResult<Option<Session>> {
        let mut conn = self.open().await?;
        let row = sqlx::query("SELECT tags, current FROM sessions WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&mut conn)
            .await
            .map_err(StoreError::backend)?;
        close(conn).await?;

        row.map(|r| session_from_row(user_id, &r)).transpose()
    }

    async fn save_session(
        &self,
        user_id: UserId,
        tags: &[String],
        current: u32,
    ) -> StoreResult<()> {
        let mut conn = self.open().await?;
        sqlx::query(
            r#"
            INSERT INTO sessions (user_id, tags, current)
            VALUES (?, ?, ?)
            ON CONFLICT(user_id) DO UPDATE SET
                tags = excluded.tags,
                current = excluded.current
            "#,
        )
        .bind(user_id)
        .bind(encode_tags(tags))
        .bind(i64::from(current))
        .execute(&mut conn)
        .await
        .map_err(StoreError::backend)?;
        close(conn).await?;

        tracing::debug!(user_id, current, tag_count = tags.len(), "session saved");
        Ok(())
    }

    async fn clear_session(&self, user_id: UserId) -> StoreResult<()> {
        let mut conn = self.open().await?;
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut conn)
            .await
            .map_err(StoreError::backend)?;
        close(conn).await?;

        tracing::debug!(user_id, removed = result.rows_affected(), "session cleared");
        Ok(())
    }

    async fn insert_career_if_absent(&self, record: &CareerRecord) -> StoreResult<bool> {
        let mut conn = self.open().await?;
        let result = sqlx::query(
            r#"
            INSERT INTO careers (age_bracket, name, description, tags)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(name, age_bracket) DO NOTHING
            "#,
        )
        .bind(record.age_bracket.as_str())
        .bind(&record.name)
        .bind(&record.description)
        .bind(encode_tags(&record.tags))
        .execute(&mut conn)
        .await
        .map_err(StoreError::backend)?;
        close(conn).await?;

        Ok(result.rows_affected() == 1)
    }

    async fn careers_in_brackets(&self, brackets: &[AgeBracket]) -> StoreResult<Vec<Career>> {
        if brackets.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; brackets.len()].join(", ");
        let sql = format!(
            "SELECT id, age_bracket, name, description, tags FROM careers \
             WHERE age_bracket IN ({}) ORDER BY id ASC",
            placeholders
        );

        let mut query = sqlx::query(&sql);
        for bracket in brackets {
            query = query.bind(bracket.as_str());
        }

        let mut conn = self.open().await?;
        let rows = query
            .fetch_all(&mut conn)
            .await
            .map_err(StoreError::backend)?;
        close(conn).await?;

        rows.iter().map(career_from_row).collect()
    }

    async fn career_count(&self) -> StoreResult<u64> {
        let mut conn = self.open().await?;
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM careers")
            .fetch_one(&mut conn)
            .await
            .map_err(StoreError::backend)?;
        close(conn).await?;

        Ok(count as u64)
    }
}
