use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tracker::RecoveryState;

/// Every state change in the tracker produces an Event.
/// Front ends print or forward them as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    RecoveryStarted {
        started_at_ms: i64,
        at: DateTime<Utc>,
    },
    RecoveryReset {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: RecoveryState,
        time_elapsed: String,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Event describing a toggle that ended in `state`.
    pub fn for_toggle(state: &RecoveryState) -> Self {
        match state {
            RecoveryState::Active { started_at_ms } => Event::RecoveryStarted {
                started_at_ms: *started_at_ms,
                at: Utc::now(),
            },
            RecoveryState::Idle => Event::RecoveryReset { at: Utc::now() },
        }
    }
}
