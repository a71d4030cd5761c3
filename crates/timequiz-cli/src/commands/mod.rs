pub mod high_score;
pub mod init;
pub mod play;
pub mod theme;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::Result;

use timequiz_store::{load_config_from, FileStore, TimequizConfig};

/// Load config and open the state file, `--store` taking precedence.
pub fn open_store(
    store: Option<PathBuf>,
    config_path: Option<&Path>,
) -> Result<(TimequizConfig, FileStore)> {
    let config = load_config_from(config_path)?;
    let store = FileStore::new(store.unwrap_or_else(|| config.store_path.clone()));
    Ok((config, store))
}
