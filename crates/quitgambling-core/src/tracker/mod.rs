mod elapsed;
mod engine;
mod state;
mod ticker;

pub use elapsed::{compute_elapsed, ElapsedTime, IDLE_ELAPSED_TEXT};
pub use engine::{now_ms, RecoveryTracker, STORAGE_KEY_LAST_PRESSED, STORAGE_KEY_RECOVERY_STARTED};
pub use state::RecoveryState;
pub use ticker::{ElapsedTicker, SharedTracker, DEFAULT_TICK_INTERVAL};
