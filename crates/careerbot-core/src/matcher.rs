//! Career matching and catalog ingestion.
//!
//! The matcher operates entirely through the [`Store`] trait. The calling
//! application builds [`MatchParams`] from its configuration and passes the
//! store implementation it uses.
//!
//! # Ranking Algorithm
//!
//! 1. Load the user's session tags. No session or no tags → no result.
//! 2. Resolve the user's age bracket from the under-18 / over-18 marker
//!    tags (under-18 wins when both are present).
//! 3. Fetch careers in the resolved bracket plus the universal `all`
//!    bracket. With no marker tag, only `all` careers are considered.
//! 4. Score each career by multiset intersection: for every distinct tag,
//!    `min(count in user tags, count in career tags)`, summed.
//! 5. Stable sort by score (desc), so ties keep catalog order.
//! 6. Truncate to `top_n`.

use std::collections::HashMap;

use crate::error::StoreResult;
use crate::models::{AgeBracket, Career, CareerMatch, CareerRecord, IngestStats, UserId};
use crate::store::Store;

/// Ranking parameters, decoupled from application config.
#[derive(Debug, Clone)]
pub struct MatchParams {
    /// Maximum number of recommendations returned.
    pub top_n: usize,
    /// Tag that places a user in the under-18 bracket.
    pub under_18_tag: String,
    /// Tag that places a user in the over-18 bracket.
    pub over_18_tag: String,
}

impl Default for MatchParams {
    fn default() -> Self {
        Self {
            top_n: 3,
            under_18_tag: "under_18".to_string(),
            over_18_tag: "over_18".to_string(),
        }
    }
}

/// Resolve a user's age bracket from their tags.
///
/// Returns `None` when neither marker tag is present.
pub fn resolve_bracket(user_tags: &[String], params: &MatchParams) -> Option<AgeBracket> {
    if user_tags.iter().any(|t| *t == params.under_18_tag) {
        Some(AgeBracket::Under18)
    } else if user_tags.iter().any(|t| *t == params.over_18_tag) {
        Some(AgeBracket::Over18)
    } else {
        None
    }
}

/// Career brackets eligible for a resolved user bracket.
pub fn eligible_brackets(resolved: Option<AgeBracket>) -> Vec<AgeBracket> {
    match resolved {
        Some(AgeBracket::All) | None => vec![AgeBracket::All],
        Some(bracket) => vec![bracket, AgeBracket::All],
    }
}

fn counts(tags: &[String]) -> HashMap<&str, usize> {
    let mut map = HashMap::new();
    for tag in tags {
        *map.entry(tag.as_str()).or_insert(0) += 1;
    }
    map
}

/// Size of the multiset intersection of two tag lists.
pub fn intersection_score(user_tags: &[String], career_tags: &[String]) -> usize {
    let user = counts(user_tags);
    counts(career_tags)
        .into_iter()
        .map(|(tag, n)| user.get(tag).map_or(0, |&m| m.min(n)))
        .sum()
}

/// Score and rank `careers` (already in catalog order) for `user_tags`.
pub fn rank_careers(user_tags: &[String], careers: Vec<Career>, top_n: usize) -> Vec<CareerMatch> {
    let mut scored: Vec<CareerMatch> = careers
        .into_iter()
        .map(|c| CareerMatch {
            score: intersection_score(user_tags, &c.tags),
            name: c.name,
            description: c.description,
        })
        .collect();

    // `sort_by` is stable: equal scores keep catalog order.
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(top_n);
    scored
}

/// Recommend up to `params.top_n` careers for `user_id`.
///
/// An empty result means "could not recommend" and is not an error.
pub async fn best_matches(
    store: &dyn Store,
    user_id: UserId,
    params: &MatchParams,
) -> StoreResult<Vec<CareerMatch>> {
    let session = match store.get_session(user_id).await? {
        Some(s) if !s.tags.is_empty() => s,
        _ => {
            tracing::debug!(user_id, "no session tags, nothing to match");
            return Ok(Vec::new());
        }
    };

    let resolved = resolve_bracket(&session.tags, params);
    let careers = store
        .careers_in_brackets(&eligible_brackets(resolved))
        .await?;
    let candidates = careers.len();

    let matches = rank_careers(&session.tags, careers, params.top_n);
    tracing::debug!(
        user_id,
        bracket = resolved.map(AgeBracket::as_str).unwrap_or("unspecified"),
        candidates,
        returned = matches.len(),
        "ranked careers"
    );
    Ok(matches)
}

/// Load catalog records, skipping any `(name, age_bracket)` already present.
///
/// Safe to call on every process start.
pub async fn ingest_catalog(store: &dyn Store, records: &[CareerRecord]) -> StoreResult<IngestStats> {
    let mut stats = IngestStats::default();
    for record in records {
        if store.insert_career_if_absent(record).await? {
            stats.inserted += 1;
        } else {
            stats.skipped += 1;
        }
    }
    tracing::info!(
        inserted = stats.inserted,
        skipped = stats.skipped,
        "catalog ingested"
    );
    Ok(stats)
}
