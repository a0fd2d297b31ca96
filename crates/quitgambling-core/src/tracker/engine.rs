//! Recovery tracker.
//!
//! Owns the recovery state and its persisted copy. The flow is explicit:
//!
//! ```ignore
//! let mut tracker = RecoveryTracker::new(store);
//! tracker.initialize().await;          // once, before the first render
//! let state = tracker.toggle()?;       // pure transition
//! tracker.persist(&state).await;       // caller-driven write-back
//! tracker.tick(now_ms());              // on every display refresh
//! ```
//!
//! Storage failures never escape: loads fall back to `Idle` and failed
//! writes leave the in-memory state authoritative.

use chrono::Utc;

use super::elapsed::{compute_elapsed, IDLE_ELAPSED_TEXT};
use super::state::RecoveryState;
use crate::error::{CoreError, StoreError};
use crate::events::Event;
use crate::storage::KeyValueStore;
use crate::view::DisplayView;

pub const STORAGE_KEY_RECOVERY_STARTED: &str = "quitgambling_recovery_started";
pub const STORAGE_KEY_LAST_PRESSED: &str = "quitgambling_last_pressed";

const STARTED_TRUE: &str = "true";
const STARTED_FALSE: &str = "false";

pub struct RecoveryTracker<S> {
    store: S,
    state: RecoveryState,
    /// Set once the startup load has finished, successfully or not.
    initialized: bool,
    elapsed_text: String,
}

impl<S: KeyValueStore> RecoveryTracker<S> {
    /// Create a tracker in the default `Idle` state. Nothing is read until
    /// [`initialize`](Self::initialize) runs.
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: RecoveryState::Idle,
            initialized: false,
            elapsed_text: IDLE_ELAPSED_TEXT.to_string(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> RecoveryState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Most recently computed elapsed text.
    pub fn elapsed_text(&self) -> &str {
        &self.elapsed_text
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Elapsed text for `now_ms` without touching the cached value.
    pub fn compute_elapsed(&self, now_ms: i64) -> String {
        match self.state {
            RecoveryState::Active { started_at_ms } => compute_elapsed(started_at_ms, now_ms),
            RecoveryState::Idle => IDLE_ELAPSED_TEXT.to_string(),
        }
    }

    /// What a renderer should show right now.
    pub fn view(&self) -> DisplayView {
        if !self.initialized {
            return DisplayView::loading();
        }
        DisplayView::for_state(&self.state, &self.elapsed_text)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self, now_ms: i64) -> Event {
        Event::StateSnapshot {
            state: self.state,
            time_elapsed: self.compute_elapsed(now_ms),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Load saved state from the store.
    ///
    /// Restores `Active` only when the flag reads `"true"` and the
    /// timestamp parses; every other outcome, read errors included, leaves
    /// the tracker `Idle`. Always marks the tracker initialized.
    pub async fn initialize(&mut self) -> RecoveryState {
        let restored = match self.load().await {
            Ok(Some(state)) => {
                tracing::info!(?state, "restored saved recovery state");
                state
            }
            Ok(None) => {
                tracing::debug!("no saved recovery state");
                RecoveryState::Idle
            }
            Err(e) => {
                tracing::warn!(error = %e, "error loading saved state, starting idle");
                RecoveryState::Idle
            }
        };

        self.state = restored;
        self.initialized = true;
        self.elapsed_text = IDLE_ELAPSED_TEXT.to_string();
        restored
    }

    /// Flip between `Idle` and `Active` using the current wall clock.
    ///
    /// # Errors
    /// Returns [`CoreError::NotInitialized`] if called before
    /// [`initialize`](Self::initialize).
    pub fn toggle(&mut self) -> Result<RecoveryState, CoreError> {
        self.toggle_at(now_ms())
    }

    /// Flip between `Idle` and `Active`, stamping `now_ms` when starting.
    pub fn toggle_at(&mut self, now_ms: i64) -> Result<RecoveryState, CoreError> {
        if !self.initialized {
            return Err(CoreError::NotInitialized);
        }
        self.state = self.state.toggled(now_ms);
        // A fresh start and a reset both show zero until the next tick.
        self.elapsed_text = IDLE_ELAPSED_TEXT.to_string();
        tracing::debug!(state = ?self.state, "recovery toggled");
        Ok(self.state)
    }

    /// Write `state` to the store.
    ///
    /// Returns `true` if every write succeeded. Failures are logged and
    /// otherwise ignored; nothing is written before initialization.
    pub async fn persist(&self, state: &RecoveryState) -> bool {
        if !self.initialized {
            tracing::debug!("skipping persist before saved state is loaded");
            return false;
        }
        match self.write(state).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "error saving state");
                false
            }
        }
    }

    /// Recompute the elapsed text while `Active`. `Idle` keeps the literal.
    pub fn tick(&mut self, now_ms: i64) -> &str {
        if let RecoveryState::Active { started_at_ms } = self.state {
            self.elapsed_text = compute_elapsed(started_at_ms, now_ms);
        }
        &self.elapsed_text
    }

    // ── Internal ─────────────────────────────────────────────────────

    async fn load(&self) -> Result<Option<RecoveryState>, StoreError> {
        let started = self.store.get(STORAGE_KEY_RECOVERY_STARTED).await?;
        let last_pressed = self.store.get(STORAGE_KEY_LAST_PRESSED).await?;

        if started.as_deref() != Some(STARTED_TRUE) {
            return Ok(None);
        }
        let Some(raw) = last_pressed else {
            tracing::warn!("recovery flagged as started without a timestamp");
            return Ok(None);
        };
        match raw.trim().parse::<i64>() {
            Ok(started_at_ms) => Ok(Some(RecoveryState::Active { started_at_ms })),
            Err(e) => {
                tracing::warn!(value = %raw, error = %e, "unparseable recovery timestamp");
                Ok(None)
            }
        }
    }

    async fn write(&self, state: &RecoveryState) -> Result<(), StoreError> {
        let flag = if state.is_started() {
            STARTED_TRUE
        } else {
            STARTED_FALSE
        };
        self.store.set(STORAGE_KEY_RECOVERY_STARTED, flag).await?;
        match state.started_at_ms() {
            Some(ts) => {
                self.store
                    .set(STORAGE_KEY_LAST_PRESSED, &ts.to_string())
                    .await?
            }
            None => self.store.remove(STORAGE_KEY_LAST_PRESSED).await?,
        }
        Ok(())
    }
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    const T: i64 = 1_700_000_000_000;

    async fn ready(store: MemoryStore) -> RecoveryTracker<MemoryStore> {
        let mut tracker = RecoveryTracker::new(store);
        tracker.initialize().await;
        tracker
    }

    #[tokio::test]
    async fn fresh_store_initializes_idle() {
        let tracker = ready(MemoryStore::new()).await;
        assert!(tracker.is_initialized());
        assert_eq!(tracker.state(), RecoveryState::Idle);
        assert_eq!(tracker.elapsed_text(), IDLE_ELAPSED_TEXT);
    }

    #[tokio::test]
    async fn double_toggle_returns_to_idle() {
        let mut tracker = ready(MemoryStore::new()).await;
        tracker.toggle_at(T).unwrap();
        let state = tracker.toggle_at(T + 86_400_000).unwrap();
        assert_eq!(state, RecoveryState::Idle);
        assert_eq!(state.started_at_ms(), None);
    }

    #[tokio::test]
    async fn toggle_before_initialize_is_rejected() {
        let mut tracker = RecoveryTracker::new(MemoryStore::new());
        assert!(matches!(tracker.toggle_at(T), Err(CoreError::NotInitialized)));
        assert_eq!(tracker.state(), RecoveryState::Idle);
    }

    #[tokio::test]
    async fn persist_then_reload_round_trips() {
        let store = MemoryStore::new();
        let mut tracker = ready(store.clone()).await;
        let state = tracker.toggle_at(T).unwrap();
        assert!(tracker.persist(&state).await);

        let entries = store.entries().await;
        assert_eq!(entries[STORAGE_KEY_RECOVERY_STARTED], "true");
        assert_eq!(entries[STORAGE_KEY_LAST_PRESSED], T.to_string());

        let mut reloaded = RecoveryTracker::new(store);
        let restored = reloaded.initialize().await;
        assert_eq!(restored, RecoveryState::Active { started_at_ms: T });
    }

    #[tokio::test]
    async fn reset_removes_timestamp_key() {
        let store = MemoryStore::new();
        let mut tracker = ready(store.clone()).await;
        let state = tracker.toggle_at(T).unwrap();
        tracker.persist(&state).await;
        let state = tracker.toggle_at(T + 5_000).unwrap();
        assert!(tracker.persist(&state).await);

        assert_eq!(
            store.get(STORAGE_KEY_RECOVERY_STARTED).await.unwrap().as_deref(),
            Some("false")
        );
        assert_eq!(store.get(STORAGE_KEY_LAST_PRESSED).await.unwrap(), None);
    }

    #[tokio::test]
    async fn read_failure_falls_back_to_idle() {
        let store = MemoryStore::new();
        store.set(STORAGE_KEY_RECOVERY_STARTED, "true").await.unwrap();
        store.set(STORAGE_KEY_LAST_PRESSED, &T.to_string()).await.unwrap();
        store.fail_reads(true);

        let mut tracker = RecoveryTracker::new(store);
        assert_eq!(tracker.initialize().await, RecoveryState::Idle);
        assert!(tracker.is_initialized());
    }

    #[tokio::test]
    async fn flag_without_valid_timestamp_stays_idle() {
        let store = MemoryStore::new();
        store.set(STORAGE_KEY_RECOVERY_STARTED, "true").await.unwrap();
        assert_eq!(ready(store.clone()).await.state(), RecoveryState::Idle);

        store.set(STORAGE_KEY_LAST_PRESSED, "yesterday").await.unwrap();
        assert_eq!(ready(store.clone()).await.state(), RecoveryState::Idle);

        store.set(STORAGE_KEY_RECOVERY_STARTED, "false").await.unwrap();
        store.set(STORAGE_KEY_LAST_PRESSED, &T.to_string()).await.unwrap();
        assert_eq!(ready(store).await.state(), RecoveryState::Idle);
    }

    #[tokio::test]
    async fn write_failure_keeps_in_memory_state() {
        let store = MemoryStore::new();
        let mut tracker = ready(store.clone()).await;
        store.fail_writes(true);
        let state = tracker.toggle_at(T).unwrap();
        assert!(!tracker.persist(&state).await);
        assert_eq!(tracker.state(), RecoveryState::Active { started_at_ms: T });
        assert!(store.entries().await.is_empty());
    }

    #[tokio::test]
    async fn persist_before_initialize_writes_nothing() {
        let store = MemoryStore::new();
        let tracker = RecoveryTracker::new(store.clone());
        assert!(!tracker.persist(&RecoveryState::Idle).await);
        assert!(store.entries().await.is_empty());
    }

    #[tokio::test]
    async fn ticks_while_idle_keep_literal() {
        let mut tracker = ready(MemoryStore::new()).await;
        for i in 0..5 {
            assert_eq!(tracker.tick(T + i * 1_000), IDLE_ELAPSED_TEXT);
        }
    }

    #[tokio::test]
    async fn ticks_while_active_recompute() {
        let mut tracker = ready(MemoryStore::new()).await;
        tracker.toggle_at(T).unwrap();
        assert_eq!(tracker.elapsed_text(), IDLE_ELAPSED_TEXT);
        assert_eq!(tracker.tick(T + 90_061_000), "1d 1hrs 1min 1s");

        tracker.toggle_at(T + 90_062_000).unwrap();
        assert_eq!(tracker.elapsed_text(), IDLE_ELAPSED_TEXT);
        assert_eq!(tracker.tick(T + 100_000_000), IDLE_ELAPSED_TEXT);
    }

    #[tokio::test]
    async fn view_reports_loading_until_initialized() {
        let mut tracker = RecoveryTracker::new(MemoryStore::new());
        assert!(tracker.view().loading);
        tracker.initialize().await;
        let view = tracker.view();
        assert!(!view.loading);
        assert!(!view.started);
    }

    #[tokio::test]
    async fn snapshot_carries_state_and_elapsed() {
        let mut tracker = ready(MemoryStore::new()).await;
        tracker.toggle_at(T).unwrap();
        match tracker.snapshot(T + 61_000) {
            Event::StateSnapshot {
                state,
                time_elapsed,
                ..
            } => {
                assert_eq!(state, RecoveryState::Active { started_at_ms: T });
                assert_eq!(time_elapsed, "0d 0hrs 1min 1s");
            }
            other => panic!("Expected StateSnapshot, got {other:?}"),
        }
    }
}
