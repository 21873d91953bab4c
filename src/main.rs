//! flagquiz - flag-to-capital trivia
//!
//! `play` runs the terminal game; `generate` prints one game's questions
//! as JSON for scripting and debugging.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, QuizArgs};
use flagquiz::{QuizConfig, start_quiz};
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play(args) => {
            let config = load_config(&args)?;
            flagquiz::run_tui(config).await
        }
        Command::Generate { quiz, pretty } => {
            initialize_tracing();
            let config = load_config(&quiz)?;
            run_generate(config, pretty).await
        }
    }
}

/// Reads the config file, then lets command-line flags override it.
#[instrument(skip_all, fields(config_path = %args.config.display()))]
fn load_config(args: &QuizArgs) -> Result<QuizConfig> {
    let mut config = QuizConfig::load_or_default(Some(args.config.as_path()))?;

    if let Some(count) = args.count {
        config = config.with_question_count(count);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(api_url) = &args.api_url {
        config = config.with_api_url(api_url.as_str());
    }
    if let Some(dataset) = &args.dataset {
        config = config.with_dataset_path(dataset.as_path());
    }
    if let Some(timeout) = args.timeout_secs {
        config = config.with_timeout_secs(timeout);
    }

    config.validate()?;
    debug!(?config, "Effective configuration");
    Ok(config)
}

/// Builds one game and prints its questions.
#[instrument(skip(config))]
async fn run_generate(config: QuizConfig, pretty: bool) -> Result<()> {
    let session = start_quiz(&config).await?;
    let questions = session.state().questions();
    info!(count = questions.len(), "Generated questions");

    let json = if pretty {
        serde_json::to_string_pretty(questions)?
    } else {
        serde_json::to_string(questions)?
    };
    println!("{json}");
    Ok(())
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,flagquiz=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Tracing initialized");
}
