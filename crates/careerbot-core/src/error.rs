//! Storage error type shared by every [`Store`](crate::store::Store) backend.

use thiserror::Error;

/// Fatal storage failure. Never retried inside the core.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not be reached or rejected an operation.
    #[error("storage backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A persisted row could not be decoded into a typed record.
    #[error("corrupt stored data: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        StoreError::Backend(Box::new(err))
    }

    pub fn corrupt(msg: impl Into<String>) -> Self {
        StoreError::Corrupt(msg.into())
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
