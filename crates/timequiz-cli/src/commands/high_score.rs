//! The `timequiz high-score` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(reset: bool, store: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let (config, store) = super::open_store(store, config_path.as_deref())?;

    if reset {
        store.clear_high_score()?;
        println!("High score cleared.");
        return Ok(());
    }

    let state = store.load()?;
    match state.high_score {
        Some(best) => {
            let when = state
                .high_score_at
                .map(|at| format!(" (set {})", at.format("%Y-%m-%d %H:%M UTC")))
                .unwrap_or_default();
            println!(
                "High score: {best}/{}{when}",
                config.questions_per_session
            );
        }
        None => println!("No high score yet."),
    }

    Ok(())
}
