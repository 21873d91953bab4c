//! Terminal UI for the flag quiz.

mod app;
mod input;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use std::io;
use tokio::time::Duration;
use tracing::{error, info, instrument};

use app::App;
use input::command_for_key;

use crate::config::QuizConfig;
use crate::countries::DatasetProvider;

const LOG_FILE: &str = "flagquiz.log";

/// Runs the quiz in the terminal until the player quits.
///
/// Shows a loading screen while the dataset is fetched, then hands every
/// key press to the quiz state machine.
#[instrument(skip_all)]
pub async fn run_tui(config: QuizConfig) -> Result<()> {
    // Log to a file so tracing output does not tear the alternate screen.
    let log_file = std::fs::File::create(LOG_FILE)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,flagquiz=debug")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!("Starting flagquiz TUI");

    let provider = config.dataset_provider()?;

    enable_raw_mode()?;
    let mut terminal = match setup_terminal() {
        Ok(terminal) => terminal,
        Err(e) => {
            error!(error = %e, "Failed to set up terminal");
            restore_terminal(&mut io::stdout())?;
            return Err(e);
        }
    };

    let app = App::new(provider.describe(), *config.question_count(), *config.seed());
    let res = run_app(&mut terminal, app, provider.as_ref()).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = ?err, "Quiz loop error");
        return Err(err);
    }

    Ok(())
}

/// Switches stdout to the alternate screen. Raw mode must already be on.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Leaves the alternate screen and raw mode after a failed setup.
fn restore_terminal<W: io::Write>(out: &mut W) -> io::Result<()> {
    execute!(out, LeaveAlternateScreen)?;
    disable_raw_mode()
}

async fn run_app<B>(
    terminal: &mut Terminal<B>,
    mut app: App,
    provider: &dyn DatasetProvider,
) -> Result<()>
where
    B: Backend,
    <B as Backend>::Error: Send + Sync + 'static,
{
    terminal.draw(|f| ui::draw(f, &app))?;

    app.dataset_loaded(provider.load().await);

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
        {
            // crossterm reports both press and release on some platforms.
            if key.kind == KeyEventKind::Release {
                continue;
            }
            if let Some(command) = command_for_key(key.code) {
                app.handle(command);
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
