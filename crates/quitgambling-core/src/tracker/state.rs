use serde::{Deserialize, Serialize};

/// Recovery state of the tracker.
///
/// ```text
/// Idle --toggle(now)--> Active { started_at_ms: now }
/// Active --toggle--> Idle
/// ```
///
/// The start timestamp only exists while `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum RecoveryState {
    #[default]
    Idle,
    Active {
        /// Epoch milliseconds at which recovery was started.
        started_at_ms: i64,
    },
}

impl RecoveryState {
    pub fn is_started(&self) -> bool {
        matches!(self, RecoveryState::Active { .. })
    }

    pub fn started_at_ms(&self) -> Option<i64> {
        match self {
            RecoveryState::Active { started_at_ms } => Some(*started_at_ms),
            RecoveryState::Idle => None,
        }
    }

    /// The state a toggle at `now_ms` moves to.
    pub fn toggled(self, now_ms: i64) -> RecoveryState {
        match self {
            RecoveryState::Idle => RecoveryState::Active {
                started_at_ms: now_ms,
            },
            RecoveryState::Active { .. } => RecoveryState::Idle,
        }
    }
}
