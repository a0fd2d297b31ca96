//! # QuitGambling Core Library
//!
//! This library provides the core logic of the QuitGambling recovery tracker.
//! Front ends (the bundled CLI, or any GUI shell) are thin renderers over the
//! same state machine.
//!
//! ## Architecture
//!
//! - **Recovery Tracker**: a two-state machine (`Idle` / `Active`) whose
//!   state is loaded once at startup and written back explicitly by the caller
//! - **Elapsed Ticker**: an owned one-second refresh task, cancelled on unmount
//! - **Storage**: string key-value stores (SQLite or in-memory) and
//!   TOML-based configuration
//!
//! ## Key Components
//!
//! - [`RecoveryTracker`]: recovery state machine and persistence contract
//! - [`ElapsedTicker`]: periodic display refresh
//! - [`KeyValueStore`]: persistence seam, implemented by [`SqliteStore`] and [`MemoryStore`]
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod storage;
pub mod tracker;
pub mod view;

pub use error::{ConfigError, CoreError, StoreError};
pub use events::Event;
pub use storage::{Config, KeyValueStore, MemoryStore, SqliteStore};
pub use tracker::{
    compute_elapsed, now_ms, ElapsedTicker, ElapsedTime, RecoveryState, RecoveryTracker,
    SharedTracker, IDLE_ELAPSED_TEXT,
};
pub use view::DisplayView;
