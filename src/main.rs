//! # Career Bot CLI (`careerbot`)
//!
//! Drives the career quiz from a terminal and exposes the store for
//! inspection.
//!
//! ## Usage
//!
//! ```bash
//! careerbot --config ./config/careerbot.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `careerbot init` | Create the SQLite database and run schema migrations |
//! | `careerbot load` | Ingest the dataset's careers into the catalog |
//! | `careerbot play --user <id>` | Take the quiz interactively |
//! | `careerbot start --user <id>` | Start or restart a quiz, print the first question |
//! | `careerbot answer --user <id> <option>` | Answer the current question |
//! | `careerbot match --user <id>` | Show recommendations without ending the quiz |
//! | `careerbot session show\|clear --user <id>` | Inspect or delete a session |
//! | `careerbot stats` | Sessions and careers per age bracket |
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `info`).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use careerbot::config;
use careerbot::console::{resolve_choice, ConsoleTransport};
use careerbot::dataset;
use careerbot::db;
use careerbot::matcher;
use careerbot::migrate;
use careerbot::models::UserId;
use careerbot::quiz::{self, AnswerOutcome, Presented};
use careerbot::sqlite_store::SqliteStore;
use careerbot::stats;
use careerbot::store::Store;

/// Career Bot — a multiple-choice career quiz with age-aware matching.
#[derive(Parser)]
#[command(
    name = "careerbot",
    about = "Career Bot — a multiple-choice career quiz with age-aware career matching",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/careerbot.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file and the sessions and careers
    /// tables. Running it multiple times is safe.
    Init,

    /// Ingest the dataset's careers.
    ///
    /// Careers already present (same name and age bracket) are skipped.
    Load,

    /// Take the quiz interactively on this terminal.
    ///
    /// Answer with an option number or the option text. End of input
    /// leaves the session in place so the quiz can be resumed.
    Play {
        #[arg(long)]
        user: UserId,
    },

    /// Start (or restart) a quiz and print the first question.
    Start {
        #[arg(long)]
        user: UserId,
    },

    /// Answer the current question with the exact option text.
    Answer {
        #[arg(long)]
        user: UserId,
        option: String,
    },

    /// Show career recommendations for a session without ending it.
    Match {
        #[arg(long)]
        user: UserId,

        /// Override `matching.top_n` from config.
        #[arg(long)]
        top_n: Option<usize>,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Inspect or delete a stored session.
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Show database statistics.
    Stats,
}

#[derive(Subcommand)]
enum SessionAction {
    /// Print a user's tags and current question index.
    Show {
        #[arg(long)]
        user: UserId,
        #[arg(long)]
        json: bool,
    },
    /// Delete a user's session. Does nothing if there is none.
    Clear {
        #[arg(long)]
        user: UserId,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized at {}", cfg.db.path.display());
        }
        Commands::Load => {
            migrate::run_migrations(&cfg).await?;
            let data = dataset::load_dataset(&cfg.quiz.dataset)?;
            let store = SqliteStore::new(db::connect_options(&cfg)?);
            let result = matcher::ingest_catalog(&store, &data.careers).await?;
            println!("load {}", cfg.quiz.dataset.display());
            println!("  inserted: {}", result.inserted);
            println!("  skipped: {}", result.skipped);
        }
        Commands::Play { user } => {
            let ctx = quiz::bootstrap(&cfg).await?;
            play(&ctx, user).await?;
        }
        Commands::Start { user } => {
            let ctx = quiz::bootstrap(&cfg).await?;
            ctx.on_start(&ConsoleTransport, user).await?;
        }
        Commands::Answer { user, option } => {
            let ctx = quiz::bootstrap(&cfg).await?;
            ctx.on_answer(&ConsoleTransport, user, &option).await?;
        }
        Commands::Match { user, top_n, json } => {
            let ctx = quiz::bootstrap(&cfg).await?;
            let mut params = ctx.params.clone();
            if let Some(n) = top_n {
                params.top_n = n;
            }
            let matches = matcher::best_matches(ctx.store.as_ref(), user, &params).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&matches)?);
            } else if matches.is_empty() {
                println!("No recommendation for user {}.", user);
            } else {
                for (i, m) in matches.iter().enumerate() {
                    println!("{}. {} (score {})", i + 1, m.name, m.score);
                    println!("   {}", m.description);
                }
            }
        }
        Commands::Session { action } => {
            let ctx = quiz::bootstrap(&cfg).await?;
            match action {
                SessionAction::Show { user, json } => {
                    let session = ctx.store.get_session(user).await?;
                    if json {
                        println!("{}", serde_json::to_string_pretty(&session)?);
                    } else {
                        match session {
                            Some(s) => {
                                println!("user:    {}", s.user_id);
                                println!("current: {}", s.current);
                                println!("tags:    {}", s.tags.join(", "));
                            }
                            None => println!("No session for user {}.", user),
                        }
                    }
                }
                SessionAction::Clear { user } => {
                    ctx.store.clear_session(user).await?;
                    println!("Session cleared for user {}.", user);
                }
            }
        }
        Commands::Stats => {
            migrate::run_migrations(&cfg).await?;
            stats::run_stats(&cfg).await?;
        }
    }

    Ok(())
}

async fn play(ctx: &quiz::QuizContext, user: UserId) -> Result<()> {
    let transport = ConsoleTransport;
    let mut presented = ctx.on_start(&transport, user).await?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Presented::Question(index) = presented {
        let question = ctx
            .dataset
            .question(index)
            .context("question index out of range")?;

        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            println!();
            println!("Input closed; progress saved.");
            return Ok(());
        };

        let Some(choice) = resolve_choice(question, &line) else {
            println!("Pick an option from 1 to {}.", question.options.len());
            continue;
        };

        presented = match ctx.on_answer(&transport, user, &choice).await? {
            AnswerOutcome::Accepted(next) => next,
            AnswerOutcome::NotStarted | AnswerOutcome::AlreadyFinished => return Ok(()),
        };
    }

    Ok(())
}
