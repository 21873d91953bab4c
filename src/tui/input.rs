//! Key bindings.

use crossterm::event::KeyCode;

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Pick the option at this 0-based index.
    Answer(usize),
    /// Move the option cursor up.
    CursorUp,
    /// Move the option cursor down.
    CursorDown,
    /// Context action: answer the focused option, go to the next question, or play again.
    Confirm,
    /// Go to the next question.
    Advance,
    /// Start a new game.
    Restart,
    /// Leave the app.
    Quit,
}

/// Maps a key to a command. Number keys are 1-based.
pub fn command_for_key(key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('r') => Some(Command::Restart),
        KeyCode::Char('n') => Some(Command::Advance),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Command::Confirm),
        KeyCode::Up | KeyCode::Left | KeyCode::Char('k') => Some(Command::CursorUp),
        KeyCode::Down | KeyCode::Right | KeyCode::Char('j') => Some(Command::CursorDown),
        KeyCode::Char(c) => c
            .to_digit(10)
            .filter(|d| *d >= 1)
            .map(|d| Command::Answer(d as usize - 1)),
        _ => None,
    }
}

/// Moves a cursor over `len` items, wrapping at both ends.
pub fn step_cursor(cursor: usize, len: usize, down: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if down {
        (cursor + 1) % len
    } else {
        (cursor + len - 1) % len
    }
}
