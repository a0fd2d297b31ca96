//! Periodic elapsed-time refresh.
//!
//! [`ElapsedTicker`] owns the background task that ticks the tracker and
//! publishes a fresh [`DisplayView`]. The task lives exactly as long as the
//! handle: `unmount` or dropping the handle aborts it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::engine::{now_ms, RecoveryTracker};
use crate::storage::KeyValueStore;
use crate::view::DisplayView;

/// Tracker shared between the ticker and the code handling toggles.
pub type SharedTracker<S> = Arc<Mutex<RecoveryTracker<S>>>;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1000);

const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

pub struct ElapsedTicker {
    handle: Option<JoinHandle<()>>,
}

impl ElapsedTicker {
    /// Start refreshing every `period`.
    ///
    /// The receiver starts at [`DisplayView::loading`] and is notified once
    /// per period, even when the view is unchanged; an `Idle` tracker keeps
    /// publishing the same view. Renderers de-duplicate. A zero `period` is
    /// raised to one millisecond.
    pub fn mount<S>(
        tracker: SharedTracker<S>,
        period: Duration,
    ) -> (Self, watch::Receiver<DisplayView>)
    where
        S: KeyValueStore + Send + 'static,
    {
        let period = period.max(MIN_TICK_INTERVAL);
        let (tx, rx) = watch::channel(DisplayView::loading());

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            tracing::debug!(period_ms = period.as_millis() as u64, "elapsed ticker mounted");

            loop {
                interval.tick().await;
                if tx.is_closed() {
                    tracing::debug!("no display left, stopping elapsed ticker");
                    break;
                }
                let view = {
                    let mut tracker = tracker.lock().await;
                    tracker.tick(now_ms());
                    tracker.view()
                };
                tx.send_replace(view);
            }
        });

        (
            Self {
                handle: Some(handle),
            },
            rx,
        )
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancel the refresh task.
    pub fn unmount(mut self) {
        self.cancel();
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!("elapsed ticker unmounted");
        }
    }
}

impl Drop for ElapsedTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}
