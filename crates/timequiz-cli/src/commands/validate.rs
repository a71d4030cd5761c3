//! The `timequiz validate` command.

use std::path::PathBuf;

use anyhow::Result;

use timequiz_core::{bank, parser};

pub fn execute(bank_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = timequiz_store::load_config_from(config_path.as_deref())?;

    let banks = match &bank_path {
        Some(path) if path.is_dir() => parser::load_bank_directory(path)?,
        Some(path) => vec![parser::parse_bank(path)?],
        None => vec![parser::BankFile {
            name: "Built-in".into(),
            description: String::new(),
            bank: bank::builtin()?,
        }],
    };

    if banks.is_empty() {
        anyhow::bail!("no question banks found");
    }

    let mut total_warnings = 0;

    for file in &banks {
        println!("Bank: {} ({} questions)", file.name, file.bank.len());

        let warnings = parser::validate_bank(file, config.questions_per_session);
        for w in &warnings {
            println!("  WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All banks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
