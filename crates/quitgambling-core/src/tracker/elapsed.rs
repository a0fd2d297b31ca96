//! Elapsed-time decomposition and formatting.
//!
//! Durations are split with truncating integer division into whole days,
//! hours, minutes and seconds and printed as `"{d}d {h}hrs {m}min {s}s"`.
//! No unit is ever omitted and no field is zero-padded.

use std::fmt;

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;

/// Text shown while Idle and at the instant recovery starts.
pub const IDLE_ELAPSED_TEXT: &str = "0d 0hrs 0min 0s";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ElapsedTime {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl ElapsedTime {
    pub fn from_millis(diff_ms: u64) -> Self {
        Self {
            days: diff_ms / MS_PER_DAY,
            hours: (diff_ms % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (diff_ms % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (diff_ms % MS_PER_MINUTE) / MS_PER_SECOND,
        }
    }

    /// Time between `started_at_ms` and `now_ms`.
    ///
    /// A `now_ms` earlier than the start (wall clock moved backward) counts
    /// as zero elapsed time.
    pub fn between(started_at_ms: i64, now_ms: i64) -> Self {
        let diff = now_ms.saturating_sub(started_at_ms);
        if diff < 0 {
            tracing::debug!(started_at_ms, now_ms, "clock behind recovery start, clamping");
        }
        Self::from_millis(diff.max(0) as u64)
    }
}

impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {}hrs {}min {}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Formatted time elapsed since `started_at_ms`.
pub fn compute_elapsed(started_at_ms: i64, now_ms: i64) -> String {
    ElapsedTime::between(started_at_ms, now_ms).to_string()
}
