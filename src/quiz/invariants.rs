//! First-class invariants for generated questions and sessions.
//!
//! Each invariant is a logical property that must hold for every value the
//! generator or the state machine hands out. They are checked in debug
//! builds and can be tested independently.

use super::question::{OPTIONS_COUNT, QuizQuestion};
use super::session::SessionState;
use std::collections::HashSet;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = match <(I1, I2) as InvariantSet<S>>::check_all(state) {
            Ok(()) => Vec::new(),
            Err(v) => v,
        };
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }
        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }
}

// ─────────────────────────────────────────────────────────────
//  Question invariants
// ─────────────────────────────────────────────────────────────

/// Exactly `OPTIONS_COUNT` pairwise-distinct options.
pub struct DistinctOptions;

impl Invariant<QuizQuestion> for DistinctOptions {
    fn holds(question: &QuizQuestion) -> bool {
        let unique: HashSet<&str> = question.options().iter().map(String::as_str).collect();
        question.options().len() == OPTIONS_COUNT && unique.len() == OPTIONS_COUNT
    }

    fn description() -> &'static str {
        "Question must offer exactly OPTIONS_COUNT distinct options"
    }
}

/// The correct answer is one of the options.
pub struct AnswerOffered;

impl Invariant<QuizQuestion> for AnswerOffered {
    fn holds(question: &QuizQuestion) -> bool {
        question.options().contains(question.correct_answer())
    }

    fn description() -> &'static str {
        "Correct answer must be among the options"
    }
}

/// Country name and correct answer are non-empty.
pub struct NamedQuestion;

impl Invariant<QuizQuestion> for NamedQuestion {
    fn holds(question: &QuizQuestion) -> bool {
        !question.country_name().is_empty() && !question.correct_answer().is_empty()
    }

    fn description() -> &'static str {
        "Country name and correct answer must be non-empty"
    }
}

/// All invariants a generated question satisfies.
pub type QuestionInvariants = (DistinctOptions, AnswerOffered, NamedQuestion);

// ─────────────────────────────────────────────────────────────
//  Session invariants
// ─────────────────────────────────────────────────────────────

/// `current_index` never passes the question count, and only reaches it once over.
pub struct IndexInRange;

impl Invariant<SessionState> for IndexInRange {
    fn holds(state: &SessionState) -> bool {
        let total = state.questions().len();
        if state.is_over() {
            state.current_index() == total
        } else {
            state.current_index() < total
        }
    }

    fn description() -> &'static str {
        "Current index must be in range, and equal the question count only when over"
    }
}

/// The score never exceeds the number of questions answered so far.
pub struct ScoreBounded;

impl Invariant<SessionState> for ScoreBounded {
    fn holds(state: &SessionState) -> bool {
        let answered = state.current_index() + usize::from(state.selected_answer().is_some());
        state.score() <= answered
    }

    fn description() -> &'static str {
        "Score must not exceed the number of answered questions"
    }
}

/// All invariants a session state satisfies between transitions.
pub type SessionInvariants = (IndexInRange, ScoreBounded);
