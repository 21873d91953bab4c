//! Command-line interface for flagquiz.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// flagquiz - match country flags to their capital cities
#[derive(Parser, Debug)]
#[command(name = "flagquiz")]
#[command(about = "Flag-to-capital trivia in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play the quiz in the terminal UI
    Play(QuizArgs),

    /// Generate one game's questions and print them as JSON
    Generate {
        /// Shared quiz options
        #[command(flatten)]
        quiz: QuizArgs,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
}

/// Options shared by every command. Flags override the config file.
#[derive(Args, Debug, Clone)]
pub struct QuizArgs {
    /// Path to a TOML config file
    #[arg(short, long, default_value = "flagquiz.toml")]
    pub config: PathBuf,

    /// Questions per game
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// RNG seed for a reproducible game
    #[arg(long)]
    pub seed: Option<u64>,

    /// REST Countries base URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Read countries from a local REST Countries JSON file instead of the API
    #[arg(long)]
    pub dataset: Option<PathBuf>,

    /// Fetch timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}
