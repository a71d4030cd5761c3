//! TOML question bank parser.
//!
//! Loads banks from TOML files and directories. Every record is validated
//! on load so a malformed question never reaches the shuffler.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{QuestionBank, QuestionRecord};

/// Intermediate TOML structure for parsing bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    #[serde(default)]
    bank: TomlBankHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Default, Deserialize)]
struct TomlBankHeader {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    prompt: String,
    options: Vec<String>,
    correct: usize,
}

/// A bank loaded from disk, with its header.
#[derive(Debug, Clone)]
pub struct BankFile {
    /// Bank name, defaulting to the file stem.
    pub name: String,
    pub description: String,
    pub bank: QuestionBank,
}

/// Parse a single TOML file into a [`BankFile`].
pub fn parse_bank(path: &Path) -> Result<BankFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a TOML string into a [`BankFile`] (useful for testing).
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<BankFile> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let records = parsed
        .questions
        .into_iter()
        .map(|q| QuestionRecord {
            prompt: q.prompt.trim().to_string(),
            options: q.options,
            correct_index: q.correct,
        })
        .collect();

    let bank = QuestionBank::new(records)
        .with_context(|| format!("invalid question bank: {}", source_path.display()))?;

    let name = parsed.bank.name.unwrap_or_else(|| {
        source_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "questions".to_string())
    });

    Ok(BankFile {
        name,
        description: parsed.bank.description,
        bank,
    })
}

/// Recursively load all `.toml` bank files from a directory.
///
/// Files that fail to parse are skipped with a warning.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<BankFile>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}

/// A non-fatal finding about a bank.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub message: String,
}

/// Check a parsed bank against the session it will feed.
pub fn validate_bank(bank: &BankFile, questions_per_session: usize) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if bank.bank.len() < questions_per_session {
        warnings.push(ValidationWarning {
            message: format!(
                "only {} questions, a session needs {questions_per_session}",
                bank.bank.len()
            ),
        });
    }

    if bank.bank.len() == questions_per_session {
        warnings.push(ValidationWarning {
            message: "every session asks the whole bank".into(),
        });
    }

    warnings
}
