//! # Career Bot
//!
//! A conversational career quiz: users answer a fixed sequence of
//! multiple-choice questions, each answer contributes tags, and at the end
//! the bot recommends the careers whose tags overlap most with the user's,
//! restricted to the user's age bracket.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ Transport  │──▶│ QuizContext  │──▶│   SQLite     │
//! │ CLI / chat │   │ start/answer │   │ sessions +   │
//! └────────────┘   └──────┬───────┘   │ careers      │
//!                         │           └──────▲───────┘
//!                         ▼                  │
//!                  ┌──────────────┐          │
//!                  │   Matcher    │──────────┘
//!                  │ (core crate) │
//!                  └──────────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`dataset`] | Question and career dataset |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema migrations |
//! | [`sqlite_store`] | SQLite [`Store`](careerbot_core::store::Store) backend |
//! | [`quiz`] | Start/answer/present operations and the transport trait |
//! | [`console`] | Terminal transport |
//! | [`stats`] | Database statistics |

pub mod config;
pub mod console;
pub mod dataset;
pub mod db;
pub mod migrate;
pub mod quiz;
pub mod sqlite_store;
pub mod stats;

pub use careerbot_core::{error, matcher, models, store, tags};
