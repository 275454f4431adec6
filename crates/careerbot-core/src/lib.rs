//! # Career Bot Core
//!
//! Storage-agnostic logic for Career Bot: session and career models, the
//! tag serialization contract, the [`store::Store`] abstraction, and the
//! career matching algorithm.
//!
//! This crate contains no tokio runtime, sqlx, or filesystem I/O. The
//! SQLite-backed store and the quiz flow live in the `careerbot` app crate.

pub mod error;
pub mod matcher;
pub mod models;
pub mod store;
pub mod tags;
