mod config;
pub mod memory;
pub mod sqlite;

pub use config::{Config, LogConfig, StorageConfig, TrackerConfig};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::path::PathBuf;

use crate::error::{ConfigError, StoreError};

/// String key-value store the tracker persists into.
///
/// Implementations must treat `remove` of a missing key as success.
#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Returns the directory holding `config.toml` and the database.
///
/// `QUITGAMBLING_DATA_DIR` wins if set. Otherwise `~/.config/quitgambling`,
/// or `~/.config/quitgambling-dev` when `QUITGAMBLING_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("QUITGAMBLING_DATA_DIR") {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env =
                std::env::var("QUITGAMBLING_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("quitgambling-dev")
            } else {
                base_dir.join("quitgambling")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
