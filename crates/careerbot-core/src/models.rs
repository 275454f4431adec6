//! Core data models used throughout Career Bot.
//!
//! These types represent quiz sessions, catalog careers, and the ranked
//! matches that flow between the store, the matcher, and the quiz flow.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StoreError;

/// External user identifier assigned by the chat transport.
pub type UserId = i64;

/// Per-user quiz progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub user_id: UserId,
    /// Tags accumulated from chosen answers, in answer order. Duplicates are kept.
    pub tags: Vec<String>,
    /// Index of the next question to present.
    pub current: u32,
}

impl Session {
    /// A session that has not answered anything yet.
    pub fn fresh(user_id: UserId) -> Self {
        Self {
            user_id,
            tags: Vec::new(),
            current: 0,
        }
    }
}

/// Age classification of a career, and the resolved bracket of a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeBracket {
    #[serde(rename = "under_18")]
    Under18,
    #[serde(rename = "over_18")]
    Over18,
    /// Eligible for every user regardless of age.
    #[default]
    #[serde(rename = "all")]
    All,
}

impl AgeBracket {
    pub const ALL_BRACKETS: [AgeBracket; 3] =
        [AgeBracket::Under18, AgeBracket::Over18, AgeBracket::All];

    pub fn as_str(self) -> &'static str {
        match self {
            AgeBracket::Under18 => "under_18",
            AgeBracket::Over18 => "over_18",
            AgeBracket::All => "all",
        }
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgeBracket {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "under_18" => Ok(AgeBracket::Under18),
            "over_18" => Ok(AgeBracket::Over18),
            "all" => Ok(AgeBracket::All),
            other => Err(StoreError::corrupt(format!(
                "unknown age bracket '{}'",
                other
            ))),
        }
    }
}

/// Career as supplied by the static dataset, before ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CareerRecord {
    pub name: String,
    pub description: String,
    #[serde(default, rename = "age")]
    pub age_bracket: AgeBracket,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CareerRecord {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        age_bracket: AgeBracket,
        tags: &[&str],
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            age_bracket,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// A catalog career as stored. `id` reflects insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Career {
    pub id: i64,
    pub age_bracket: AgeBracket,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
}

/// A ranked recommendation returned by [`best_matches`](crate::matcher::best_matches).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CareerMatch {
    pub name: String,
    pub description: String,
    /// Size of the multiset intersection between user and career tags.
    pub score: usize,
}

/// Outcome counters for a catalog ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    pub inserted: u64,
    pub skipped: u64,
}
