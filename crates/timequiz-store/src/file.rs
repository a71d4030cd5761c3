//! JSON-file key-value store for the high score and theme.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use timequiz_core::traits::HighScoreStore;

use crate::error::StoreError;
use crate::theme::Theme;

/// Contents of the state file. Absent keys mean "never set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_score: Option<u32>,
    /// When `high_score` was set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_score_at: Option<DateTime<Utc>>,
}

/// Preferences persisted as a JSON document at a fixed path.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole state. A missing file is an empty state.
    pub fn load(&self) -> Result<StoredState, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(StoredState::default());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(StoredState::default());
        }

        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the whole state, creating parent directories as needed.
    pub fn save(&self, state: &StoredState) -> Result<(), StoreError> {
        let io_err = |source: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(state).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        // Write beside the target and rename so a crash never leaves half a file.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)?;
        tracing::debug!(path = %self.path.display(), "state saved");
        Ok(())
    }

    fn update(&self, f: impl FnOnce(&mut StoredState)) -> Result<StoredState, StoreError> {
        let mut state = self.load()?;
        f(&mut state);
        self.save(&state)?;
        Ok(state)
    }

    pub fn theme(&self) -> Result<Option<Theme>, StoreError> {
        Ok(self.load()?.theme)
    }

    pub fn set_theme(&self, theme: Theme) -> Result<(), StoreError> {
        self.update(|state| state.theme = Some(theme)).map(|_| ())
    }

    /// Flip the effective theme (stored, else system default) and store it.
    pub fn toggle_theme(&self) -> Result<Theme, StoreError> {
        let state = self.update(|state| {
            state.theme = Some(Theme::resolve(state.theme).toggled());
        })?;
        Ok(Theme::resolve(state.theme))
    }

    pub fn clear_high_score(&self) -> Result<(), StoreError> {
        self.update(|state| {
            state.high_score = None;
            state.high_score_at = None;
        })
        .map(|_| ())
    }
}

impl HighScoreStore for FileStore {
    fn load_high_score(&self) -> anyhow::Result<Option<u32>> {
        Ok(self.load()?.high_score)
    }

    fn save_high_score(&mut self, score: u32) -> anyhow::Result<()> {
        self.update(|state| {
            state.high_score = Some(score);
            state.high_score_at = Some(Utc::now());
        })?;
        Ok(())
    }
}
