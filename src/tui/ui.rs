//! Stateless UI rendering.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::app::{App, Screen};
use crate::quiz::{OptionStatus, SessionState};

const TITLE: &str = "Select the capital city of the country/territory with this flag";

/// Renders the whole app.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(10),   // Body
            Constraint::Length(3), // Help
        ])
        .split(area);

    match app.screen() {
        Screen::Loading { source } => {
            draw_title(frame, chunks[0], TITLE);
            draw_message(frame, chunks[1], &format!("Loading countries from {source}..."), Color::Gray);
            // Keys are not read until the dataset has loaded.
            draw_help(frame, chunks[2], "Please wait");
        }
        Screen::Unavailable { reason } => {
            draw_title(frame, chunks[0], TITLE);
            draw_message(frame, chunks[1], &format!("Could not load countries.\n\n{reason}"), Color::Red);
            draw_help(frame, chunks[2], "q: quit");
        }
        Screen::CannotStart { reason } => {
            draw_title(frame, chunks[0], TITLE);
            draw_message(frame, chunks[1], &format!("Cannot start a quiz.\n\n{reason}"), Color::Yellow);
            draw_help(frame, chunks[2], "q: quit");
        }
        Screen::Quiz(session) if session.state().is_over() => {
            draw_title(frame, chunks[0], "Quiz Completed!");
            draw_game_over(frame, chunks[1], session.state());
            draw_help(frame, chunks[2], "Enter/r: play again  q: quit");
        }
        Screen::Quiz(session) => {
            draw_title(frame, chunks[0], TITLE);
            draw_question(frame, chunks[1], session.state(), app.cursor());
            let help = if session.state().can_advance() {
                "Enter/n: next question  r: restart  q: quit"
            } else {
                "1-4 or ↑/↓ + Enter: answer  r: restart  q: quit"
            };
            draw_help(frame, chunks[2], help);
        }
    }
}

fn draw_title(frame: &mut Frame, area: Rect, title: &str) {
    let title = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(title, area);
}

fn draw_message(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let paragraph = Paragraph::new(message.to_string())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_help(frame: &mut Frame, area: Rect, help: &str) {
    let help = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(help, area);
}

fn draw_question(frame: &mut Frame, area: Rect, state: &SessionState, cursor: usize) {
    let Some(question) = state.current_question() else {
        return;
    };

    let mut lines = vec![
        Line::from(format!(
            "Question {} of {}",
            state.question_number(),
            state.total_questions()
        )),
        Line::from(""),
    ];

    let flag = match question.flag_emoji() {
        Some(emoji) => format!("{emoji}  {}", question.flag_ref()),
        None => question.flag_ref().clone(),
    };
    lines.push(Line::from(Span::styled(
        flag,
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    for (idx, option) in question.options().iter().enumerate() {
        let marker = if idx == cursor && state.can_answer() { ">" } else { " " };
        let style = match state.option_status(option) {
            OptionStatus::Correct => Style::default().fg(Color::Black).bg(Color::Green),
            OptionStatus::Incorrect => Style::default().fg(Color::White).bg(Color::Red),
            OptionStatus::Neutral if !state.can_answer() => Style::default().fg(Color::DarkGray),
            OptionStatus::Neutral if idx == cursor => {
                Style::default().fg(Color::Black).bg(Color::White)
            }
            OptionStatus::Neutral => Style::default(),
        };
        lines.push(Line::from(vec![
            Span::raw(format!("{marker} {}. ", idx + 1)),
            Span::styled(option.clone(), style),
        ]));
    }

    lines.push(Line::from(""));
    if let Some(feedback) = state.feedback() {
        let color = if feedback.is_correct() { Color::Green } else { Color::Red };
        lines.push(Line::from(Span::styled(
            feedback.to_string(),
            Style::default().fg(color),
        )));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        format!("Score: {}", state.score()),
        Style::default().fg(Color::Yellow),
    )));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_game_over(frame: &mut Frame, area: Rect, state: &SessionState) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Final Score: {}", state.summary()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countries::CountryRecord;
    use crate::tui::input::Command;
    use ratatui::{Terminal, backend::TestBackend};

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn loaded_app(count: usize) -> App {
        let pool = [
            ("France", "Paris"),
            ("Italy", "Rome"),
            ("Norway", "Oslo"),
            ("Peru", "Lima"),
        ]
        .into_iter()
        .map(|(n, c)| CountryRecord::new(n, [c], format!("https://flags/{n}.svg")).unwrap())
        .collect();
        let mut app = App::new("test", count, Some(5));
        app.dataset_loaded(Ok(pool));
        app
    }

    #[test]
    fn test_loading_screen() {
        let app = App::new("https://restcountries.com", 10, None);
        let screen = render(&app);
        assert!(screen.contains("Loading countries"));
        assert!(!screen.contains("quit"));
    }

    #[test]
    fn test_question_screen_shows_progress_and_score() {
        let app = loaded_app(2);
        let screen = render(&app);
        assert!(screen.contains("Question 1 of 2"));
        assert!(screen.contains("Score: 0"));
        assert!(screen.contains("https://flags/"));
    }

    #[test]
    fn test_game_over_screen() {
        let mut app = loaded_app(1);
        app.handle(Command::Answer(0));
        app.handle(Command::Advance);
        let screen = render(&app);
        assert!(screen.contains("Quiz Completed!"));
        assert!(screen.contains("Final Score:"));
        assert!(screen.contains("/ 1"));
    }
}
