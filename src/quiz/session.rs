//! Quiz session state machine.
//!
//! [`SessionState`] is an immutable value: `answer` and `advance` consume it
//! and return the next state. [`QuizSession`] is the single writer that owns
//! the pool, the RNG and the current state, and applies user intents.

use super::generator::{InsufficientData, generate};
use super::invariants::{InvariantSet, SessionInvariants};
use super::question::QuizQuestion;
use crate::countries::CountryRecord;
use derive_getters::Getters;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Message shown after an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum Feedback {
    /// The chosen capital was right.
    #[display("Correct! {capital} is the capital of {country}.")]
    Correct {
        /// The chosen capital.
        capital: String,
        /// Country of the question.
        country: String,
    },
    /// The chosen capital was wrong.
    #[display("Incorrect. The correct answer was {correct} for {country}.")]
    Incorrect {
        /// The right capital.
        correct: String,
        /// Country of the question.
        country: String,
    },
}

impl Feedback {
    /// Whether the answer was correct.
    pub fn is_correct(&self) -> bool {
        matches!(self, Feedback::Correct { .. })
    }
}

/// Highlight for one option of the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionStatus {
    /// Not selected, or nothing selected yet.
    Neutral,
    /// Selected and correct.
    Correct,
    /// Selected and wrong.
    Incorrect,
}

/// Whether an intent changed the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum TransitionOutcome {
    /// The transition was applied.
    Applied,
    /// The intent was not valid in the current state and was absorbed.
    Ignored,
}

/// Phase of the current question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
enum Phase {
    /// Waiting for the player to pick an option.
    AwaitingAnswer,
    /// An option was picked; waiting for the player to move on.
    Answered {
        selected: String,
        feedback: Feedback,
    },
    /// Every question has been answered.
    GameOver,
}

/// Snapshot of a quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    questions: Vec<QuizQuestion>,
    current_index: usize,
    score: usize,
    phase: Phase,
}

impl SessionState {
    /// Starts a session over `questions`.
    ///
    /// An empty question list yields a session that is already over.
    #[instrument(skip_all, fields(questions = questions.len()))]
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        let phase = if questions.is_empty() {
            Phase::GameOver
        } else {
            Phase::AwaitingAnswer
        };
        Self {
            questions,
            current_index: 0,
            score: 0,
            phase,
        }
    }

    /// Whether `answer` would be applied.
    pub fn can_answer(&self) -> bool {
        matches!(self.phase, Phase::AwaitingAnswer)
    }

    /// Whether `advance` would be applied.
    pub fn can_advance(&self) -> bool {
        matches!(self.phase, Phase::Answered { .. })
    }

    /// Registers `choice` for the current question.
    ///
    /// No-op unless the current question is still unanswered.
    #[must_use]
    #[instrument(skip(self), fields(index = self.current_index))]
    pub fn answer(mut self, choice: &str) -> Self {
        if !self.can_answer() {
            debug!("Answer ignored");
            return self;
        }
        let Some(question) = self.questions.get(self.current_index) else {
            return self;
        };

        let feedback = if question.is_correct(choice) {
            Feedback::Correct {
                capital: choice.to_string(),
                country: question.country_name().clone(),
            }
        } else {
            Feedback::Incorrect {
                correct: question.correct_answer().clone(),
                country: question.country_name().clone(),
            }
        };

        if feedback.is_correct() {
            self.score += 1;
        }
        debug!(correct = feedback.is_correct(), score = self.score, "Answer registered");

        self.phase = Phase::Answered {
            selected: choice.to_string(),
            feedback,
        };
        self.checked()
    }

    /// Moves past an answered question.
    ///
    /// No-op until the current question has been answered.
    #[must_use]
    #[instrument(skip(self), fields(index = self.current_index))]
    pub fn advance(mut self) -> Self {
        if !self.can_advance() {
            debug!("Advance ignored");
            return self;
        }

        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            self.phase = Phase::AwaitingAnswer;
        } else {
            self.current_index = self.questions.len();
            self.phase = Phase::GameOver;
            info!(score = self.score, total = self.questions.len(), "Quiz completed");
        }
        self.checked()
    }

    fn checked(self) -> Self {
        debug_assert!(
            SessionInvariants::check_all(&self).is_ok(),
            "session invariants violated: {:?}",
            SessionInvariants::check_all(&self)
        );
        self
    }

    /// Questions of this session.
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    /// 0-based index of the current question; equals the question count once over.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Correct answers so far.
    pub fn score(&self) -> usize {
        self.score
    }

    /// The option picked for the current question, if any.
    pub fn selected_answer(&self) -> Option<&str> {
        match &self.phase {
            Phase::Answered { selected, .. } => Some(selected.as_str()),
            _ => None,
        }
    }

    /// Feedback for the current answer, if any.
    pub fn feedback(&self) -> Option<&Feedback> {
        match &self.phase {
            Phase::Answered { feedback, .. } => Some(feedback),
            _ => None,
        }
    }

    /// Feedback as display text; empty when there is none.
    pub fn feedback_text(&self) -> String {
        self.feedback().map(ToString::to_string).unwrap_or_default()
    }

    /// Whether every question has been answered.
    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver)
    }

    /// 1-based number of the question on screen.
    pub fn question_number(&self) -> usize {
        (self.current_index + 1).min(self.questions.len())
    }

    /// Number of questions in the session.
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// The question on screen; `None` once over.
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        if self.is_over() {
            None
        } else {
            self.questions.get(self.current_index)
        }
    }

    /// Highlight for `option`: only the selected option is marked.
    pub fn option_status(&self, option: &str) -> OptionStatus {
        match (self.selected_answer(), self.current_question()) {
            (Some(selected), Some(question)) if selected == option => {
                if question.is_correct(option) {
                    OptionStatus::Correct
                } else {
                    OptionStatus::Incorrect
                }
            }
            _ => OptionStatus::Neutral,
        }
    }

    /// Final score line, e.g. `7 / 10`.
    pub fn summary(&self) -> String {
        format!("{} / {}", self.score, self.questions.len())
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Owner of a running quiz: pool, RNG and current state.
///
/// All intents go through `&mut self`, so there is exactly one writer.
#[derive(Debug, Clone, Getters)]
pub struct QuizSession {
    /// Countries questions are drawn from.
    #[getter(skip)]
    pool: Vec<CountryRecord>,
    /// Questions requested per game.
    question_count: usize,
    #[getter(skip)]
    rng: ChaCha8Rng,
    #[getter(skip)]
    state: SessionState,
}

impl QuizSession {
    /// Generates the first game from `pool`.
    ///
    /// # Errors
    ///
    /// Returns [`InsufficientData`] if the pool cannot supply a question.
    #[instrument(skip(pool, rng), fields(pool = pool.len()))]
    pub fn new(
        pool: Vec<CountryRecord>,
        question_count: usize,
        mut rng: ChaCha8Rng,
    ) -> Result<Self, InsufficientData> {
        let questions = generate(&pool, question_count, &mut rng)?;
        info!(questions = questions.len(), "Quiz session started");
        Ok(Self {
            pool,
            question_count,
            rng,
            state: SessionState::new(questions),
        })
    }

    /// Starts a session with a reproducible RNG when `seed` is given, entropy otherwise.
    pub fn with_seed(
        pool: Vec<CountryRecord>,
        question_count: usize,
        seed: Option<u64>,
    ) -> Result<Self, InsufficientData> {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::new(pool, question_count, rng)
    }

    /// Current state snapshot.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Countries questions are drawn from.
    pub fn pool(&self) -> &[CountryRecord] {
        &self.pool
    }

    /// Answer intent.
    #[instrument(skip(self))]
    pub fn answer(&mut self, choice: &str) -> TransitionOutcome {
        if !self.state.can_answer() {
            debug!("Ignoring answer intent");
            return TransitionOutcome::Ignored;
        }
        self.state = std::mem::take(&mut self.state).answer(choice);
        TransitionOutcome::Applied
    }

    /// Next-question intent.
    #[instrument(skip(self))]
    pub fn advance(&mut self) -> TransitionOutcome {
        if !self.state.can_advance() {
            debug!("Ignoring advance intent");
            return TransitionOutcome::Ignored;
        }
        self.state = std::mem::take(&mut self.state).advance();
        TransitionOutcome::Applied
    }

    /// Regenerates questions from the held pool and resets score and progress.
    ///
    /// On error the current state is left untouched.
    #[instrument(skip(self))]
    pub fn restart(&mut self) -> Result<(), InsufficientData> {
        let questions = generate(&self.pool, self.question_count, &mut self.rng).map_err(|e| {
            warn!(error = %e, "Restart failed");
            e
        })?;
        info!(questions = questions.len(), "Quiz restarted");
        self.state = SessionState::new(questions);
        Ok(())
    }
}
