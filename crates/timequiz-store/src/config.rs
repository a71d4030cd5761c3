//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use timequiz_core::session::{DEFAULT_QUESTIONS_PER_SESSION, DEFAULT_QUESTION_SECS};
use timequiz_core::SessionConfig;

/// Top-level timequiz configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimequizConfig {
    /// Questions asked per session.
    #[serde(default = "default_questions_per_session")]
    pub questions_per_session: usize,
    /// Seconds allowed per question.
    #[serde(default = "default_question_secs")]
    pub question_secs: u32,
    /// Question bank TOML file. The built-in bank is used when unset.
    #[serde(default)]
    pub bank: Option<PathBuf>,
    /// Where the high score and theme are kept.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

fn default_questions_per_session() -> usize {
    DEFAULT_QUESTIONS_PER_SESSION
}
fn default_question_secs() -> u32 {
    DEFAULT_QUESTION_SECS
}
fn default_store_path() -> PathBuf {
    dirs_path()
        .map(|dir| dir.join("state.json"))
        .unwrap_or_else(|| PathBuf::from(".timequiz-state.json"))
}

impl Default for TimequizConfig {
    fn default() -> Self {
        Self {
            questions_per_session: default_questions_per_session(),
            question_secs: default_question_secs(),
            bank: None,
            store_path: default_store_path(),
        }
    }
}

impl TimequizConfig {
    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            questions_per_session: self.questions_per_session,
            question_secs: self.question_secs,
        }
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.questions_per_session >= 1,
            "questions_per_session must be at least 1"
        );
        anyhow::ensure!(self.question_secs >= 1, "question_secs must be at least 1");
        Ok(())
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `timequiz.toml` in the current directory
/// 2. `~/.config/timequiz/config.toml`
///
/// Environment variable overrides: `TIMEQUIZ_STORE`, `TIMEQUIZ_BANK`.
pub fn load_config() -> Result<TimequizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<TimequizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("timequiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<TimequizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => TimequizConfig::default(),
    };

    if let Ok(store) = std::env::var("TIMEQUIZ_STORE") {
        config.store_path = PathBuf::from(store);
    }
    if let Ok(bank) = std::env::var("TIMEQUIZ_BANK") {
        config.bank = Some(PathBuf::from(bank));
    }

    config.store_path = resolve_path(&config.store_path);
    config.bank = config.bank.as_deref().map(resolve_path);

    config.validate()?;
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("timequiz"))
}
