//! Storage abstraction for Career Bot.
//!
//! The [`Store`] trait defines every storage operation needed by the quiz
//! flow and the matcher, enabling pluggable backends (SQLite in the app
//! crate, in-memory here for tests).
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::models::{AgeBracket, Career, CareerRecord, Session, UserId};

/// Abstract storage backend for sessions and the career catalog.
///
/// Every call is a complete round trip to the backend: implementations
/// must not cache sessions, so the store stays the single source of truth
/// across process restarts.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`create_or_reset_session`](Store::create_or_reset_session) | Start over with an empty session |
/// | [`get_session`](Store::get_session) | Read a session without creating one |
/// | [`save_session`](Store::save_session) | Upsert tags and index together |
/// | [`clear_session`](Store::clear_session) | Delete a session (no-op if absent) |
/// | [`insert_career_if_absent`](Store::insert_career_if_absent) | Idempotent catalog insert |
/// | [`careers_in_brackets`](Store::careers_in_brackets) | Catalog slice in insertion order |
/// | [`career_count`](Store::career_count) | Catalog size |
#[async_trait]
pub trait Store: Send + Sync {
    /// Replace any existing session for `user_id` with an empty one at index 0.
    async fn create_or_reset_session(&self, user_id: UserId) -> StoreResult<Session> {
        self.save_session(user_id, &[], 0).await?;
        Ok(Session::fresh(user_id))
    }

    /// Returns `None` when no session exists. Never creates a row.
    async fn get_session(&self, user_id: UserId) -> StoreResult<Option<Session>>;

    /// Insert or update both fields as a single write.
    async fn save_session(&self, user_id: UserId, tags: &[String], current: u32)
        -> StoreResult<()>;

    /// Delete the session. Absent sessions are not an error.
    async fn clear_session(&self, user_id: UserId) -> StoreResult<()>;

    /// Insert a career unless `(name, age_bracket)` already exists.
    ///
    /// Returns `true` when a row was inserted.
    async fn insert_career_if_absent(&self, record: &CareerRecord) -> StoreResult<bool>;

    /// All careers whose bracket is one of `brackets`, in insertion order.
    async fn careers_in_brackets(&self, brackets: &[AgeBracket]) -> StoreResult<Vec<Career>>;

    /// Number of careers in the catalog.
    async fn career_count(&self) -> StoreResult<u64>;
}
