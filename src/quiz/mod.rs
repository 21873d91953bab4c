//! Question generation and the quiz session state machine.

mod generator;
mod invariants;
mod question;
mod session;

pub use generator::{InsufficientData, generate};
pub use invariants::{
    AnswerOffered, DistinctOptions, IndexInRange, Invariant, InvariantSet, InvariantViolation,
    NamedQuestion, QuestionInvariants, ScoreBounded, SessionInvariants,
};
pub use question::{OPTIONS_COUNT, QuizQuestion, TOTAL_QUESTIONS};
pub use session::{Feedback, OptionStatus, QuizSession, SessionState, TransitionOutcome};
