//! TOML configuration parsing and validation.
//!
//! ```toml
//! [db]
//! path = "./data/careerbot.sqlite"
//!
//! [quiz]
//! dataset = "./config/quiz.toml"
//!
//! [matching]
//! top_n = 3
//! under_18_tag = "under_18"
//! over_18_tag = "over_18"
//! ```

use anyhow::{Context, Result};
use careerbot_core::matcher::MatchParams;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    #[serde(default)]
    pub quiz: QuizConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct QuizConfig {
    /// Question and career dataset (TOML).
    #[serde(default = "default_dataset")]
    pub dataset: PathBuf,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            dataset: default_dataset(),
        }
    }
}

fn default_dataset() -> PathBuf {
    PathBuf::from("./config/quiz.toml")
}

#[derive(Debug, Deserialize, Clone)]
pub struct MatchingConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default = "default_under_18_tag")]
    pub under_18_tag: String,
    #[serde(default = "default_over_18_tag")]
    pub over_18_tag: String,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            under_18_tag: default_under_18_tag(),
            over_18_tag: default_over_18_tag(),
        }
    }
}

fn default_top_n() -> usize {
    3
}
fn default_under_18_tag() -> String {
    "under_18".to_string()
}
fn default_over_18_tag() -> String {
    "over_18".to_string()
}

impl MatchingConfig {
    pub fn params(&self) -> MatchParams {
        MatchParams {
            top_n: self.top_n,
            under_18_tag: self.under_18_tag.clone(),
            over_18_tag: self.over_18_tag.clone(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;

    Ok(config)
}

pub fn validate(config: &Config) -> Result<()> {
    if config.matching.top_n < 1 {
        anyhow::bail!("matching.top_n must be >= 1");
    }

    if config.matching.under_18_tag.trim().is_empty() {
        anyhow::bail!("matching.under_18_tag must not be empty");
    }
    if config.matching.over_18_tag.trim().is_empty() {
        anyhow::bail!("matching.over_18_tag must not be empty");
    }
    if config.matching.under_18_tag == config.matching.over_18_tag {
        anyhow::bail!(
            "matching.under_18_tag and matching.over_18_tag must differ (both '{}')",
            config.matching.under_18_tag
        );
    }

    Ok(())
}
