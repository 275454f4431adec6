//! Static quiz dataset: the question sequence and the career catalog.
//!
//! Loaded once at startup from a TOML file:
//!
//! ```toml
//! [[questions]]
//! text = "How old are you?"
//!
//! [[questions.options]]
//! text = "Under 18"
//! tags = ["under_18"]
//!
//! [[careers]]
//! name = "Accountant"
//! description = "Keeps the books balanced."
//! age = "under_18"              # optional, defaults to "all"
//! tags = ["analytical"]         # optional
//! ```

use anyhow::{bail, Context, Result};
use careerbot_core::models::CareerRecord;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Dataset {
    pub questions: Vec<Question>,
    #[serde(default)]
    pub careers: Vec<CareerRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    pub text: String,
    pub options: Vec<AnswerOption>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerOption {
    pub text: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Dataset {
    /// The question at `index`, or `None` once the sequence is exhausted.
    pub fn question(&self, index: u32) -> Option<&Question> {
        self.questions.get(index as usize)
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

impl Question {
    /// Tags of every option whose text equals `option_text`, in option order.
    pub fn tags_for(&self, option_text: &str) -> Vec<String> {
        self.options
            .iter()
            .filter(|o| o.text == option_text)
            .flat_map(|o| o.tags.iter().cloned())
            .collect()
    }

    pub fn has_option(&self, option_text: &str) -> bool {
        self.options.iter().any(|o| o.text == option_text)
    }
}

pub fn parse_dataset(content: &str) -> Result<Dataset> {
    let dataset: Dataset = toml::from_str(content).with_context(|| "Failed to parse dataset")?;
    validate(&dataset)?;
    Ok(dataset)
}

pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset file: {}", path.display()))?;
    let dataset = parse_dataset(&content)
        .with_context(|| format!("Invalid dataset: {}", path.display()))?;

    tracing::debug!(
        questions = dataset.questions.len(),
        careers = dataset.careers.len(),
        "dataset loaded"
    );
    Ok(dataset)
}

fn validate(dataset: &Dataset) -> Result<()> {
    if dataset.questions.is_empty() {
        bail!("dataset must contain at least one question");
    }

    for (i, q) in dataset.questions.iter().enumerate() {
        if q.text.trim().is_empty() {
            bail!("questions[{}].text must not be empty", i);
        }
        if q.options.is_empty() {
            bail!("questions[{}] has no options", i);
        }
        if let Some(j) = q.options.iter().position(|o| o.text.trim().is_empty()) {
            bail!("questions[{}].options[{}].text must not be empty", i, j);
        }
    }

    if let Some(i) = dataset.careers.iter().position(|c| c.name.trim().is_empty()) {
        bail!("careers[{}].name must not be empty", i);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use careerbot_core::models::AgeBracket;

    const SAMPLE: &str = r#"
[[questions]]
text = "Pick one"

[[questions.options]]
text = "Numbers"
tags = ["analytical"]

[[questions.options]]
text = "Numbers"
tags = ["detail_oriented"]

[[questions.options]]
text = "Paint"

[[careers]]
name = "Accountant"
description = "Books"
age = "under_18"
tags = ["analytical"]

[[careers]]
name = "Artist"
description = "Paints"
"#;

    #[test]
    fn test_parse_applies_career_defaults() {
        let ds = parse_dataset(SAMPLE).unwrap();
        assert_eq!(ds.question_count(), 1);
        assert_eq!(ds.careers[0].age_bracket, AgeBracket::Under18);
        assert_eq!(ds.careers[1].age_bracket, AgeBracket::All);
        assert!(ds.careers[1].tags.is_empty());
    }

    #[test]
    fn test_tags_for_collects_every_matching_option() {
        let ds = parse_dataset(SAMPLE).unwrap();
        let q = ds.question(0).unwrap();
        assert_eq!(q.tags_for("Numbers"), vec!["analytical", "detail_oriented"]);
        assert!(q.tags_for("Paint").is_empty());
        assert!(q.tags_for("Unknown").is_empty());
        assert!(ds.question(1).is_none());
    }

    #[test]
    fn test_unknown_age_bracket_rejected() {
        let bad = r#"
[[questions]]
text = "Q"
[[questions.options]]
text = "A"

[[careers]]
name = "X"
description = "Y"
age = "toddler"
"#;
        assert!(parse_dataset(bad).is_err());
    }

    #[test]
    fn test_question_without_options_rejected() {
        let bad = "[[questions]]\ntext = \"Q\"\noptions = []\n";
        let err = parse_dataset(bad).unwrap_err();
        assert!(format!("{:#}", err).contains("no options"));
    }

    #[test]
    fn test_empty_question_list_rejected() {
        assert!(parse_dataset("questions = []\n").is_err());
    }
}
