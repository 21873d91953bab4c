//! Dataset-to-session pipeline for non-interactive hosts.

use crate::config::QuizConfig;
use crate::error::QuizError;
use crate::quiz::QuizSession;
use tracing::{info, instrument};

/// Loads the configured dataset and generates the first game.
///
/// The two steps stay separate: `dataset_provider().load()` yields the
/// pool, then [`QuizSession::with_seed`] derives questions from it.
#[instrument(skip_all, fields(question_count = config.question_count()))]
pub async fn start_quiz(config: &QuizConfig) -> Result<QuizSession, QuizError> {
    config.validate()?;
    let provider = config.dataset_provider()?;
    info!(source = %provider.describe(), "Loading dataset");

    let pool = provider.load().await?;
    let session = QuizSession::with_seed(pool, *config.question_count(), *config.seed())?;
    Ok(session)
}
