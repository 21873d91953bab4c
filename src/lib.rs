//! flagquiz library - match country flags to their capitals
//!
//! A trivia game built on the REST Countries dataset: the dataset is
//! fetched once, questions are sampled client-side, and a small state
//! machine drives each game from the first question to the final score.
//!
//! # Architecture
//!
//! - **Countries**: dataset providers (HTTP, JSON file, in-memory) and the
//!   validated [`CountryRecord`]
//! - **Quiz**: the question generator and the session state machine
//! - **Config**: TOML settings shared by every host
//! - **TUI**: terminal front end
//!
//! # Example
//!
//! ```
//! use flagquiz::{CountryRecord, QuizSession, TransitionOutcome};
//!
//! let pool: Vec<CountryRecord> = [
//!     ("France", "Paris"),
//!     ("Italy", "Rome"),
//!     ("Norway", "Oslo"),
//!     ("Peru", "Lima"),
//! ]
//! .into_iter()
//! .filter_map(|(name, capital)| CountryRecord::new(name, [capital], format!("{name}.svg")))
//! .collect();
//!
//! let mut session = QuizSession::with_seed(pool, 10, Some(42))?;
//! assert_eq!(session.state().total_questions(), 4);
//!
//! let correct = session.state().current_question().unwrap().correct_answer().clone();
//! assert_eq!(session.answer(&correct), TransitionOutcome::Applied);
//! assert_eq!(session.answer(&correct), TransitionOutcome::Ignored);
//! assert_eq!(session.state().score(), 1);
//! # Ok::<(), flagquiz::InsufficientData>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod countries;
mod error;
mod pipeline;
mod quiz;
mod tui;

// Crate-level exports - Configuration
pub use config::{ConfigError, QuizConfig};

// Crate-level exports - Dataset
pub use countries::{
    COUNTRY_FIELDS, CountryRecord, DEFAULT_API_URL, DatasetProvider, FetchError, JsonFileDataset,
    RawCountry, RawFlags, RawName, RestCountriesClient, StaticDataset, usable_records,
};

// Crate-level exports - Errors
pub use error::QuizError;

// Crate-level exports - Quiz core
pub use quiz::{
    AnswerOffered, DistinctOptions, Feedback, IndexInRange, InsufficientData, Invariant,
    InvariantSet, InvariantViolation, NamedQuestion, OPTIONS_COUNT, OptionStatus,
    QuestionInvariants, QuizQuestion, QuizSession, ScoreBounded, SessionInvariants, SessionState,
    TOTAL_QUESTIONS, TransitionOutcome, generate,
};

// Crate-level exports - Hosts
pub use pipeline::start_quiz;
pub use tui::run_tui;
