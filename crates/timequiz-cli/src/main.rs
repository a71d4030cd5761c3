//! timequiz CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "timequiz", version, about = "Timed multiple-choice quiz")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a quiz session
    Play {
        /// Question bank TOML file (defaults to the built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Seed for question selection and option order
        #[arg(long)]
        seed: Option<u64>,

        /// Write the finished session and result as JSON
        #[arg(long)]
        transcript: Option<PathBuf>,

        /// State file holding the high score and theme
        #[arg(long)]
        store: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate question bank TOML files
    Validate {
        /// Bank file or directory (defaults to the built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show or clear the high score
    HighScore {
        /// Forget the stored high score
        #[arg(long)]
        reset: bool,

        /// State file holding the high score and theme
        #[arg(long)]
        store: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show or change the colour theme
    Theme {
        #[arg(value_enum, default_value = "show")]
        action: ThemeAction,

        /// State file holding the high score and theme
        #[arg(long)]
        store: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and sample question bank
    Init,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeAction {
    Show,
    Toggle,
    Dark,
    Light,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("timequiz=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            bank,
            seed,
            transcript,
            store,
            config,
        } => commands::play::execute(bank, seed, transcript, store, config).await,
        Commands::Validate { bank, config } => commands::validate::execute(bank, config),
        Commands::HighScore {
            reset,
            store,
            config,
        } => commands::high_score::execute(reset, store, config),
        Commands::Theme {
            action,
            store,
            config,
        } => commands::theme::execute(action, store, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
