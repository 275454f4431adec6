//! Database statistics.
//!
//! Summarizes what is stored: sessions in progress and careers per age
//! bracket. Used by `careerbot stats`.

use anyhow::Result;
use careerbot_core::models::AgeBracket;
use serde::Serialize;
use sqlx::{Connection, Row};

use crate::config::Config;
use crate::db;

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub sessions: i64,
    pub careers: i64,
    /// `(bracket, count)` for every bracket, zero counts included.
    pub careers_by_bracket: Vec<(String, i64)>,
}

pub async fn collect_stats(config: &Config) -> Result<Stats> {
    let mut conn = db::connect(config).await?;

    let sessions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
        .fetch_one(&mut conn)
        .await?;

    let rows = sqlx::query(
        "SELECT age_bracket, COUNT(*) AS n FROM careers GROUP BY age_bracket",
    )
    .fetch_all(&mut conn)
    .await?;
    conn.close().await?;

    let mut careers_by_bracket: Vec<(String, i64)> = AgeBracket::ALL_BRACKETS
        .iter()
        .map(|b| (b.as_str().to_string(), 0))
        .collect();
    for row in &rows {
        let bracket: String = row.get("age_bracket");
        let n: i64 = row.get("n");
        match careers_by_bracket.iter_mut().find(|(b, _)| *b == bracket) {
            Some(entry) => entry.1 = n,
            None => careers_by_bracket.push((bracket, n)),
        }
    }

    Ok(Stats {
        sessions,
        careers: careers_by_bracket.iter().map(|(_, n)| n).sum(),
        careers_by_bracket,
    })
}

pub async fn run_stats(config: &Config) -> Result<()> {
    let stats = collect_stats(config).await?;

    println!("Career Bot — Database Stats");
    println!("===========================");
    println!();
    println!("  Database:    {}", config.db.path.display());
    println!("  Sessions:    {}", stats.sessions);
    println!("  Careers:     {}", stats.careers);
    for (bracket, n) in &stats.careers_by_bracket {
        println!("    {:<10} {}", bracket, n);
    }

    Ok(())
}
