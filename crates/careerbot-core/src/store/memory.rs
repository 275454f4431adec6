//! In-memory [`Store`] implementation for testing.
//!
//! Uses a `HashMap` and a `Vec` behind `std::sync::RwLock` for thread
//! safety. Careers are kept in insertion order with sequential ids, the
//! same ordering the SQLite store gets from its autoincrement key.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::error::{StoreError, StoreResult};
use crate::models::{AgeBracket, Career, CareerRecord, Session, UserId};

use super::Store;

/// In-memory store for tests and embedding in other tools.
pub struct InMemoryStore {
    sessions: RwLock<HashMap<UserId, Session>>,
    careers: RwLock<Vec<Career>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            careers: RwLock::new(Vec::new()),
        }
    }

    /// Number of stored sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn read<T>(lock: &RwLock<T>) -> StoreResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|_| StoreError::corrupt("in-memory store lock poisoned"))
}

fn write<T>(lock: &RwLock<T>) -> StoreResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|_| StoreError::corrupt("in-memory store lock poisoned"))
}

#[async_trait]
impl Store for InMemoryStore {
    async fn get_session(&self, user_id: UserId) -> StoreResult<Option<Session>> {
        Ok(read(&self.sessions)?.get(&user_id).cloned())
    }

    async fn save_session(
        &self,
        user_id: UserId,
        tags: &[String],
        current: u32,
    ) -> StoreResult<()> {
        write(&self.sessions)?.insert(
            user_id,
            Session {
                user_id,
                tags: tags.to_vec(),
                current,
            },
        );
        Ok(())
    }

    async fn clear_session(&self, user_id: UserId) -> StoreResult<()> {
        write(&self.sessions)?.remove(&user_id);
        Ok(())
    }

    async fn insert_career_if_absent(&self, record: &CareerRecord) -> StoreResult<bool> {
        let mut careers = write(&self.careers)?;
        let exists = careers
            .iter()
            .any(|c| c.name == record.name && c.age_bracket == record.age_bracket);
        if exists {
            return Ok(false);
        }
        let id = careers.len() as i64 + 1;
        careers.push(Career {
            id,
            age_bracket: record.age_bracket,
            name: record.name.clone(),
            description: record.description.clone(),
            tags: record.tags.clone(),
        });
        Ok(true)
    }

    async fn careers_in_brackets(&self, brackets: &[AgeBracket]) -> StoreResult<Vec<Career>> {
        Ok(read(&self.careers)?
            .iter()
            .filter(|c| brackets.contains(&c.age_bracket))
            .cloned()
            .collect())
    }

    async fn career_count(&self) -> StoreResult<u64> {
        Ok(read(&self.careers)?.len() as u64)
    }
}
