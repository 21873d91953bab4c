//! Tests for the quiz state machine.

use flagquiz::{
    CountryRecord, Feedback, InvariantSet, OptionStatus, QuizQuestion, QuizSession,
    SessionInvariants, SessionState, TransitionOutcome, generate,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn pool() -> Vec<CountryRecord> {
    [
        ("France", "Paris"),
        ("Italy", "Rome"),
        ("Norway", "Oslo"),
        ("Peru", "Lima"),
        ("Japan", "Tokyo"),
        ("Kenya", "Nairobi"),
    ]
    .into_iter()
    .map(|(name, capital)| {
        CountryRecord::new(name, [capital], format!("https://flags.example/{name}.svg")).unwrap()
    })
    .collect()
}

fn questions(count: usize) -> Vec<QuizQuestion> {
    generate(&pool(), count, &mut ChaCha8Rng::seed_from_u64(17)).unwrap()
}

fn wrong_answer(question: &QuizQuestion) -> String {
    question
        .options()
        .iter()
        .find(|o| *o != question.correct_answer())
        .cloned()
        .expect("question has distractors")
}

#[test]
fn test_fresh_state() {
    let state = SessionState::new(questions(3));
    assert_eq!(state.current_index(), 0);
    assert_eq!(state.score(), 0);
    assert_eq!(state.selected_answer(), None);
    assert_eq!(state.feedback_text(), "");
    assert!(!state.is_over());
    assert!(state.can_answer());
    assert!(!state.can_advance());
    assert_eq!(state.question_number(), 1);
    assert_eq!(state.total_questions(), 3);
}

#[test]
fn test_correct_answer_then_advance() {
    let state = SessionState::new(questions(3));
    let correct = state.current_question().unwrap().correct_answer().clone();
    let country = state.current_question().unwrap().country_name().clone();

    let state = state.answer(&correct);
    assert_eq!(state.score(), 1);
    assert_eq!(state.selected_answer(), Some(correct.as_str()));
    assert_eq!(
        state.feedback_text(),
        format!("Correct! {correct} is the capital of {country}.")
    );
    assert!(state.feedback().unwrap().is_correct());

    let state = state.advance();
    assert_eq!(state.current_index(), 1);
    assert_eq!(state.selected_answer(), None);
    assert_eq!(state.feedback(), None);
    assert_eq!(state.score(), 1);
    assert!(SessionInvariants::check_all(&state).is_ok());
}

#[test]
fn test_wrong_answer_on_last_question_ends_game() {
    let state = SessionState::new(questions(1));
    let question = state.current_question().unwrap().clone();
    let wrong = wrong_answer(&question);

    let state = state.answer(&wrong);
    assert_eq!(state.score(), 0);
    assert_eq!(
        state.feedback(),
        Some(&Feedback::Incorrect {
            correct: question.correct_answer().clone(),
            country: question.country_name().clone(),
        })
    );
    assert_eq!(
        state.feedback_text(),
        format!(
            "Incorrect. The correct answer was {} for {}.",
            question.correct_answer(),
            question.country_name()
        )
    );

    let state = state.advance();
    assert!(state.is_over());
    assert_eq!(state.score(), 0);
    assert_eq!(state.current_question(), None);
    assert_eq!(state.summary(), "0 / 1");
}

#[test]
fn test_second_answer_is_ignored() {
    let state = SessionState::new(questions(2));
    let question = state.current_question().unwrap().clone();
    let wrong = wrong_answer(&question);

    let state = state.answer(&wrong);
    let score = state.score();
    let feedback = state.feedback_text();

    let state = state.answer(question.correct_answer());
    assert_eq!(state.score(), score);
    assert_eq!(state.feedback_text(), feedback);
    assert_eq!(state.selected_answer(), Some(wrong.as_str()));
}

#[test]
fn test_advance_before_answer_is_ignored() {
    let state = SessionState::new(questions(2));
    let before = state.clone();
    let state = state.advance();
    assert_eq!(state, before);
}

#[test]
fn test_option_status_after_wrong_answer() {
    let state = SessionState::new(questions(1));
    let question = state.current_question().unwrap().clone();
    let wrong = wrong_answer(&question);

    for option in question.options() {
        assert_eq!(state.option_status(option), OptionStatus::Neutral);
    }

    // Only the selected option is highlighted.
    let state = state.answer(&wrong);
    assert_eq!(state.option_status(&wrong), OptionStatus::Incorrect);
    for option in question.options().iter().filter(|o| **o != wrong) {
        assert_eq!(state.option_status(option), OptionStatus::Neutral);
    }
}

#[test]
fn test_option_status_after_correct_answer() {
    let state = SessionState::new(questions(1));
    let correct = state.current_question().unwrap().correct_answer().clone();
    let state = state.answer(&correct);
    assert_eq!(state.option_status(&correct), OptionStatus::Correct);
}

#[test]
fn test_perfect_game() {
    let mut state = SessionState::new(questions(5));
    while !state.is_over() {
        let correct = state.current_question().unwrap().correct_answer().clone();
        state = state.answer(&correct).advance();
        assert!(SessionInvariants::check_all(&state).is_ok());
    }
    assert_eq!(state.score(), 5);
    assert_eq!(state.summary(), "5 / 5");
    assert_eq!(state.question_number(), 5);
}

#[test]
fn test_empty_state_is_over() {
    let state = SessionState::new(Vec::new());
    assert!(state.is_over());
    assert!(!state.can_answer());
    assert_eq!(state.summary(), "0 / 0");
}

#[test]
fn test_session_reports_outcomes() {
    let mut session = QuizSession::with_seed(pool(), 3, Some(3)).unwrap();
    assert_eq!(session.advance(), TransitionOutcome::Ignored);

    let correct = session
        .state()
        .current_question()
        .unwrap()
        .correct_answer()
        .clone();
    assert_eq!(session.answer(&correct), TransitionOutcome::Applied);
    assert_eq!(session.answer(&correct), TransitionOutcome::Ignored);
    assert_eq!(session.advance(), TransitionOutcome::Applied);
    assert_eq!(session.state().current_index(), 1);
}

#[test]
fn test_restart_after_game_over() {
    let mut session = QuizSession::with_seed(pool(), 2, Some(8)).unwrap();
    while !session.state().is_over() {
        let correct = session
            .state()
            .current_question()
            .unwrap()
            .correct_answer()
            .clone();
        session.answer(&correct);
        session.advance();
    }
    assert_eq!(session.state().score(), 2);

    session.restart().expect("pool still valid");
    let state = session.state();
    assert!(!state.is_over());
    assert_eq!(state.current_index(), 0);
    assert_eq!(state.score(), 0);
    assert_eq!(state.questions().len(), 2);
    assert_eq!(*session.question_count(), 2);
}

#[test]
fn test_restart_mid_game() {
    let mut session = QuizSession::with_seed(pool(), 3, Some(4)).unwrap();
    let correct = session
        .state()
        .current_question()
        .unwrap()
        .correct_answer()
        .clone();
    assert_eq!(session.answer(&correct), TransitionOutcome::Applied);
    assert_eq!(session.state().score(), 1);

    session.restart().expect("pool still valid");
    let state = session.state();
    assert_eq!(state.current_index(), 0);
    assert_eq!(state.score(), 0);
    assert_eq!(state.selected_answer(), None);
    assert_eq!(state.feedback_text(), "");
    assert!(!state.is_over());
    assert!(state.can_answer());
    assert_eq!(state.questions().len(), 3);
}

#[test]
fn test_seeded_sessions_match() {
    let first = QuizSession::with_seed(pool(), 4, Some(21)).unwrap();
    let second = QuizSession::with_seed(pool(), 4, Some(21)).unwrap();
    assert_eq!(first.state(), second.state());
}

#[test]
fn test_session_rejects_small_pool() {
    let small: Vec<CountryRecord> = pool().into_iter().take(3).collect();
    let err = QuizSession::with_seed(small, 10, None).unwrap_err();
    assert_eq!(err.available, 3);
}
