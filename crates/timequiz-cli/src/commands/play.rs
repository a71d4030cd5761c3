//! The `timequiz play` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use timequiz_core::results::{finalize, QuizResult};
use timequiz_core::timer::TokioTimer;
use timequiz_core::traits::HighScoreStore;
use timequiz_core::view::{parse_option, Frame, SessionSnapshot};
use timequiz_core::{bank, parser, Phase, QuestionBank, QuizSession};
use timequiz_store::Theme;

use crate::render::ConsoleRenderer;

/// What a line of input asks for.
enum Input {
    Handled(Option<Frame>),
    Invalid,
    Quit,
}

/// Finished session as written by `--transcript`.
#[derive(Serialize)]
struct Transcript<'a> {
    finished_at: DateTime<Utc>,
    result: &'a QuizResult,
    session: &'a SessionSnapshot,
}

pub async fn execute(
    bank_path: Option<PathBuf>,
    seed: Option<u64>,
    transcript: Option<PathBuf>,
    store_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (config, mut store) = super::open_store(store_path, config_path.as_deref())?;

    let bank = load_bank(bank_path.as_deref().or(config.bank.as_deref()))?;

    let theme = match store.theme() {
        Ok(stored) => Theme::resolve(stored),
        Err(e) => {
            tracing::warn!("theme unavailable: {e}");
            Theme::system_default()
        }
    };
    let renderer = ConsoleRenderer::new(theme);

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut session = QuizSession::new(config.session(), Box::new(TokioTimer::new(tx)));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    match store.load_high_score() {
        Ok(best) => renderer.high_score_banner(best, config.questions_per_session),
        Err(e) => tracing::warn!("high score unavailable: {e:#}"),
    }

    loop {
        if let Some(frame) = session.start_session(&bank, &mut rng)? {
            renderer.frame(&frame, &session);
        }

        let snapshot = loop {
            let frame = tokio::select! {
                Some(event) = rx.recv() => session.on_timer(event),
                line = lines.next_line() => {
                    let Some(line) = line.context("failed to read input")? else {
                        anyhow::bail!("input closed before the quiz finished");
                    };
                    match handle_line(&mut session, &line) {
                        Input::Handled(frame) => frame,
                        Input::Invalid => {
                            renderer.invalid_input();
                            None
                        }
                        Input::Quit => {
                            println!("Quiz abandoned.");
                            return Ok(());
                        }
                    }
                }
            };

            match frame {
                Some(Frame::Finished(snapshot)) => break snapshot,
                Some(frame) => renderer.frame(&frame, &session),
                None => {}
            }
        };

        let result = finalize(&snapshot, &mut store);
        renderer.result(&result, &snapshot);

        if let Some(path) = &transcript {
            write_transcript(path, &result, &snapshot)?;
            println!("Transcript saved to: {}", path.display());
        }

        println!("Press Enter to play again, or q to quit.");
        match lines.next_line().await.context("failed to read input")? {
            Some(line) if !is_quit(&line) => {
                session.reset();
            }
            _ => return Ok(()),
        }
    }
}

fn load_bank(path: Option<&Path>) -> Result<QuestionBank> {
    match path {
        Some(path) => {
            let file = parser::parse_bank(path)?;
            tracing::info!(name = %file.name, questions = file.bank.len(), "loaded question bank");
            Ok(file.bank)
        }
        None => Ok(bank::builtin()?),
    }
}

fn is_quit(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "q" | "quit")
}

fn handle_line(session: &mut QuizSession, line: &str) -> Input {
    if is_quit(line) {
        return Input::Quit;
    }

    match session.phase() {
        Phase::AwaitingAnswer { .. } => match parse_option(line) {
            Some(slot) => Input::Handled(session.submit_answer(slot)),
            None => Input::Invalid,
        },
        Phase::Answered { .. } => Input::Handled(session.advance()),
        Phase::Idle | Phase::Finished => Input::Handled(None),
    }
}

fn write_transcript(path: &Path, result: &QuizResult, session: &SessionSnapshot) -> Result<()> {
    let transcript = Transcript {
        finished_at: Utc::now(),
        result,
        session,
    };
    let json = serde_json::to_string_pretty(&transcript).context("failed to serialize transcript")?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write transcript to {}", path.display()))?;
    Ok(())
}
