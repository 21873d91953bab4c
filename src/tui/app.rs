//! Application state and logic.

use super::input::{Command, step_cursor};
use crate::countries::{CountryRecord, FetchError};
use crate::quiz::{QuizSession, TransitionOutcome};
use tracing::{debug, error, info, instrument, warn};

/// Screen currently shown.
#[derive(Debug, strum::Display)]
pub enum Screen {
    /// Waiting for the dataset; nothing is interactive yet.
    Loading {
        /// Where the dataset is coming from.
        source: String,
    },
    /// The dataset could not be loaded.
    Unavailable {
        /// Error shown to the player.
        reason: String,
    },
    /// The dataset loaded but cannot supply a full question.
    CannotStart {
        /// Error shown to the player.
        reason: String,
    },
    /// A game is running or finished.
    Quiz(QuizSession),
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    screen: Screen,
    cursor: usize,
    should_quit: bool,
    question_count: usize,
    seed: Option<u64>,
}

impl App {
    /// Creates the app in the loading screen.
    pub fn new(source: impl Into<String>, question_count: usize, seed: Option<u64>) -> Self {
        Self {
            screen: Screen::Loading {
                source: source.into(),
            },
            cursor: 0,
            should_quit: false,
            question_count,
            seed,
        }
    }

    /// Current screen.
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Focused option index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the player asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Consumes the dataset fetch result and starts the first game.
    #[instrument(skip_all)]
    pub fn dataset_loaded(&mut self, result: Result<Vec<CountryRecord>, FetchError>) {
        let pool = match result {
            Ok(pool) => pool,
            Err(e) => {
                error!(error = %e, "Dataset unavailable");
                self.screen = Screen::Unavailable {
                    reason: e.to_string(),
                };
                return;
            }
        };

        info!(countries = pool.len(), "Dataset loaded");
        self.screen = match QuizSession::with_seed(pool, self.question_count, self.seed) {
            Ok(session) => Screen::Quiz(session),
            Err(e) => {
                warn!(error = %e, "Cannot start quiz");
                Screen::CannotStart {
                    reason: e.to_string(),
                }
            }
        };
        self.cursor = 0;
    }

    /// Applies a key command.
    #[instrument(skip(self), fields(screen = %self.screen))]
    pub fn handle(&mut self, command: Command) {
        if command == Command::Quit {
            info!("User quit");
            self.should_quit = true;
            return;
        }

        let Screen::Quiz(session) = &mut self.screen else {
            debug!("No game running, command ignored");
            return;
        };

        let option_count = session
            .state()
            .current_question()
            .map_or(0, |q| q.options().len());

        let outcome = match command {
            Command::Answer(idx) => answer_at(session, idx),
            Command::CursorUp => {
                self.cursor = step_cursor(self.cursor, option_count, false);
                TransitionOutcome::Applied
            }
            Command::CursorDown => {
                self.cursor = step_cursor(self.cursor, option_count, true);
                TransitionOutcome::Applied
            }
            Command::Advance => session.advance(),
            Command::Restart => restart(session),
            Command::Confirm => {
                let state = session.state();
                if state.is_over() {
                    restart(session)
                } else if state.can_answer() {
                    answer_at(session, self.cursor)
                } else {
                    session.advance()
                }
            }
            Command::Quit => TransitionOutcome::Ignored,
        };

        if matches!(command, Command::Advance | Command::Restart | Command::Confirm)
            && session.state().can_answer()
            && outcome == TransitionOutcome::Applied
        {
            self.cursor = 0;
        }
        debug!(?command, %outcome, "Command handled");
    }
}

fn answer_at(session: &mut QuizSession, idx: usize) -> TransitionOutcome {
    let choice = session
        .state()
        .current_question()
        .and_then(|q| q.options().get(idx).cloned());
    match choice {
        Some(choice) => session.answer(&choice),
        None => TransitionOutcome::Ignored,
    }
}

fn restart(session: &mut QuizSession) -> TransitionOutcome {
    match session.restart() {
        Ok(()) => TransitionOutcome::Applied,
        Err(e) => {
            warn!(error = %e, "Restart failed, keeping current game");
            TransitionOutcome::Ignored
        }
    }
}
