//! Store selection for the CLI.
//!
//! The SQLite database is preferred. If it cannot be opened the CLI keeps
//! working against an in-memory store, which behaves like a store whose
//! saved state is missing.

use quitgambling_core::{Config, KeyValueStore, MemoryStore, SqliteStore, StoreError};

pub enum CliStore {
    Sqlite(SqliteStore),
    Memory(MemoryStore),
}

impl CliStore {
    pub fn open(config: &Config) -> Self {
        match SqliteStore::open(&config.storage.database_file) {
            Ok(store) => CliStore::Sqlite(store),
            Err(e) => {
                tracing::warn!(error = %e, "database unavailable, state will not be saved");
                CliStore::Memory(MemoryStore::new())
            }
        }
    }
}

impl KeyValueStore for CliStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self {
            CliStore::Sqlite(s) => s.get(key).await,
            CliStore::Memory(s) => s.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        match self {
            CliStore::Sqlite(s) => s.set(key, value).await,
            CliStore::Memory(s) => s.set(key, value).await,
        }
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        match self {
            CliStore::Sqlite(s) => s.remove(key).await,
            CliStore::Memory(s) => s.remove(key).await,
        }
    }
}
