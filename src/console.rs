//! Terminal transport used by the `careerbot` CLI.
//!
//! Renders questions as numbered option lists on stdout. Input handling
//! (reading the user's choice) lives in the CLI; [`resolve_choice`] turns a
//! typed line into the option text the quiz flow expects.

use anyhow::Result;
use async_trait::async_trait;

use careerbot_core::models::{CareerMatch, UserId};

use crate::dataset::Question;
use crate::quiz::{Notice, Transport};

pub struct ConsoleTransport;

pub fn notice_text(notice: Notice) -> &'static str {
    match notice {
        Notice::Welcome => {
            "Hi! Answer a few quick questions and find out which careers might suit you."
        }
        Notice::NotStarted => "No quiz in progress. Run `careerbot start` first.",
        Notice::AlreadyFinished => "This quiz is already finished.",
        Notice::AnswerAccepted => "Answer recorded.",
        Notice::NoRecommendation => {
            "Could not find a matching career. Try again later or change your answers."
        }
    }
}

/// Map a typed line to an option text.
///
/// Accepts a 1-based option number or the option text itself.
pub fn resolve_choice(question: &Question, input: &str) -> Option<String> {
    let input = input.trim();
    if let Ok(n) = input.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| question.options.get(i))
            .map(|o| o.text.clone());
    }
    question
        .options
        .iter()
        .find(|o| o.text == input)
        .map(|o| o.text.clone())
}

#[async_trait]
impl Transport for ConsoleTransport {
    async fn send_question(&self, _user_id: UserId, index: u32, question: &Question) -> Result<()> {
        println!();
        println!("Q{}. {}", index + 1, question.text);
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}) {}", i + 1, option.text);
        }
        Ok(())
    }

    async fn send_results(&self, _user_id: UserId, matches: &[CareerMatch]) -> Result<()> {
        println!();
        println!("Careers that might suit you:");
        for m in matches {
            println!();
            println!("  * {} (score {})", m.name, m.score);
            println!("    {}", m.description);
        }
        Ok(())
    }

    async fn notify(&self, _user_id: UserId, notice: Notice) -> Result<()> {
        println!("{}", notice_text(notice));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::AnswerOption;

    fn question() -> Question {
        Question {
            text: "Pick".to_string(),
            options: vec![
                AnswerOption {
                    text: "Numbers".to_string(),
                    tags: vec![],
                },
                AnswerOption {
                    text: "Paint".to_string(),
                    tags: vec![],
                },
            ],
        }
    }

    #[test]
    fn test_resolve_by_number_and_text() {
        let q = question();
        assert_eq!(resolve_choice(&q, "2"), Some("Paint".to_string()));
        assert_eq!(resolve_choice(&q, " Numbers \n"), Some("Numbers".to_string()));
    }

    #[test]
    fn test_resolve_out_of_range() {
        let q = question();
        assert_eq!(resolve_choice(&q, "0"), None);
        assert_eq!(resolve_choice(&q, "3"), None);
        assert_eq!(resolve_choice(&q, "Dance"), None);
    }
}
