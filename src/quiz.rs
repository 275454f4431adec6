//! Quiz flow: the operations a chat transport drives.
//!
//! A [`QuizContext`] is built once at startup and shared by every handler.
//! The transport (Telegram, terminal, tests) delivers events to
//! [`QuizContext::on_start`] and [`QuizContext::on_answer`], and receives
//! output through its [`Transport`] implementation.
//!
//! Calls for different users are independent. Calls for the same user are
//! not serialized here: two concurrent answers may interleave and the last
//! `save` wins.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use careerbot_core::matcher::{self, MatchParams};
use careerbot_core::models::{CareerMatch, IngestStats, UserId};
use careerbot_core::store::Store;

use crate::config::Config;
use crate::dataset::{self, Dataset, Question};
use crate::db;
use crate::migrate;
use crate::sqlite_store::SqliteStore;

/// Fixed messages a transport renders in its own words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Sent before the first question of a new session.
    Welcome,
    /// An answer arrived for a user with no session.
    NotStarted,
    /// An answer arrived after the last question.
    AlreadyFinished,
    /// An answer was recorded.
    AnswerAccepted,
    /// The quiz ended but no career could be recommended.
    NoRecommendation,
}

/// Outbound side of a chat transport.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send_question(&self, user_id: UserId, index: u32, question: &Question) -> Result<()>;

    /// Only called with a non-empty list; empty results become
    /// [`Notice::NoRecommendation`].
    async fn send_results(&self, user_id: UserId, matches: &[CareerMatch]) -> Result<()>;

    async fn notify(&self, user_id: UserId, notice: Notice) -> Result<()>;
}

/// What [`QuizContext::present_question`] delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presented {
    /// The question at this index was sent.
    Question(u32),
    /// The quiz is over; the session has been cleared.
    Finished(Vec<CareerMatch>),
}

/// Result of handling an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    Accepted(Presented),
    NotStarted,
    AlreadyFinished,
}

/// Application context shared by all handlers.
#[derive(Clone)]
pub struct QuizContext {
    pub store: Arc<dyn Store>,
    pub dataset: Arc<Dataset>,
    pub params: MatchParams,
}

impl QuizContext {
    pub fn new(store: Arc<dyn Store>, dataset: Arc<Dataset>, params: MatchParams) -> Self {
        Self {
            store,
            dataset,
            params,
        }
    }

    /// Load the dataset's careers into the catalog.
    pub async fn ingest_catalog(&self) -> Result<IngestStats> {
        let stats = matcher::ingest_catalog(self.store.as_ref(), &self.dataset.careers).await?;
        Ok(stats)
    }

    /// Start (or restart) the quiz for `user_id`.
    pub async fn on_start(&self, transport: &dyn Transport, user_id: UserId) -> Result<Presented> {
        self.store.create_or_reset_session(user_id).await?;
        tracing::info!(user_id, "quiz started");

        transport.notify(user_id, Notice::Welcome).await?;
        self.present_question(transport, user_id).await
    }

    /// Record the option the user chose for their current question.
    ///
    /// Every option whose text equals `option_text` contributes its tags.
    /// An unrecognised option still advances the quiz, contributing nothing.
    pub async fn on_answer(
        &self,
        transport: &dyn Transport,
        user_id: UserId,
        option_text: &str,
    ) -> Result<AnswerOutcome> {
        let mut session = match self.store.get_session(user_id).await? {
            Some(s) => s,
            None => {
                tracing::warn!(user_id, "answer without an active session");
                transport.notify(user_id, Notice::NotStarted).await?;
                return Ok(AnswerOutcome::NotStarted);
            }
        };

        let question = match self.dataset.question(session.current) {
            Some(q) => q,
            None => {
                transport.notify(user_id, Notice::AlreadyFinished).await?;
                return Ok(AnswerOutcome::AlreadyFinished);
            }
        };

        if !question.has_option(option_text) {
            tracing::debug!(user_id, option_text, "answer matches no option");
        }
        session.tags.extend(question.tags_for(option_text));
        session.current += 1;
        self.store
            .save_session(user_id, &session.tags, session.current)
            .await?;

        transport.notify(user_id, Notice::AnswerAccepted).await?;
        let presented = self.present_question(transport, user_id).await?;
        Ok(AnswerOutcome::Accepted(presented))
    }

    /// Send the user's current question, or their results once the
    /// sequence is exhausted.
    ///
    /// A missing session is recreated empty. Finishing clears the session.
    pub async fn present_question(
        &self,
        transport: &dyn Transport,
        user_id: UserId,
    ) -> Result<Presented> {
        let session = match self.store.get_session(user_id).await? {
            Some(s) => s,
            None => self.store.create_or_reset_session(user_id).await?,
        };

        if let Some(question) = self.dataset.question(session.current) {
            transport
                .send_question(user_id, session.current, question)
                .await?;
            return Ok(Presented::Question(session.current));
        }

        self.store
            .save_session(user_id, &session.tags, session.current)
            .await?;
        let matches = matcher::best_matches(self.store.as_ref(), user_id, &self.params).await?;

        if matches.is_empty() {
            transport.notify(user_id, Notice::NoRecommendation).await?;
        } else {
            transport.send_results(user_id, &matches).await?;
        }

        self.store.clear_session(user_id).await?;
        tracing::info!(user_id, recommended = matches.len(), "quiz finished");
        Ok(Presented::Finished(matches))
    }
}

/// Build the application context from configuration: migrate the
/// database, load the dataset, and ingest its careers.
pub async fn bootstrap(config: &Config) -> Result<QuizContext> {
    migrate::run_migrations(config).await?;

    let dataset = dataset::load_dataset(&config.quiz.dataset)?;
    let store = SqliteStore::new(db::connect_options(config)?);

    let ctx = QuizContext::new(
        Arc::new(store),
        Arc::new(dataset),
        config.matching.params(),
    );
    ctx.ingest_catalog().await?;
    Ok(ctx)
}
