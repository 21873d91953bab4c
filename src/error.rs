//! Crate-level error type.

use crate::config::ConfigError;
use crate::countries::FetchError;
use crate::quiz::InsufficientData;
use derive_more::{Display, From};

/// Any failure a quiz host can run into.
#[derive(Debug, Clone, Display, From)]
pub enum QuizError {
    /// The dataset could not be loaded.
    #[display("{_0}")]
    Fetch(FetchError),
    /// The dataset cannot supply a full question.
    #[display("{_0}")]
    InsufficientData(InsufficientData),
    /// The configuration is unusable.
    #[display("{_0}")]
    Config(ConfigError),
}

impl std::error::Error for QuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuizError::Fetch(e) => Some(e),
            QuizError::InsufficientData(e) => Some(e),
            QuizError::Config(e) => Some(e),
        }
    }
}
