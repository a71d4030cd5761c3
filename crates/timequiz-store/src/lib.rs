//! timequiz-store — Configuration and persisted preferences.
//!
//! Loads `timequiz.toml` and keeps the high score and theme preference in a
//! small JSON file.

pub mod config;
pub mod error;
pub mod file;
pub mod theme;

pub use config::{load_config, load_config_from, TimequizConfig};
pub use error::StoreError;
pub use file::{FileStore, StoredState};
pub use theme::Theme;
