//! Render-ready view of the tracker.
//!
//! Renderers (the CLI, or any GUI shell) only read this; they never inspect
//! `RecoveryState` to pick copy themselves.

use serde::{Deserialize, Serialize};

use crate::tracker::RecoveryState;

pub const APP_TITLE: &str = "QuitGambling";
pub const LOADING_TEXT: &str = "Loading...";
pub const ACTIVE_HEADLINE: &str = "Living gambling-free for";
pub const IDLE_HEADLINE: &str = "Regain control of your life";
pub const IDLE_PROMPT: &str = "Tap above to quit gambling";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayView {
    /// Saved state is still loading; the toggle must not be offered.
    pub loading: bool,
    pub started: bool,
    pub headline: String,
    /// Elapsed text while started, the prompt otherwise.
    pub body: String,
    pub time_elapsed: String,
}

impl DisplayView {
    pub fn loading() -> Self {
        Self {
            loading: true,
            started: false,
            headline: APP_TITLE.to_string(),
            body: LOADING_TEXT.to_string(),
            time_elapsed: crate::tracker::IDLE_ELAPSED_TEXT.to_string(),
        }
    }

    pub fn for_state(state: &RecoveryState, time_elapsed: &str) -> Self {
        if state.is_started() {
            Self {
                loading: false,
                started: true,
                headline: ACTIVE_HEADLINE.to_string(),
                body: time_elapsed.to_string(),
                time_elapsed: time_elapsed.to_string(),
            }
        } else {
            Self {
                loading: false,
                started: false,
                headline: IDLE_HEADLINE.to_string(),
                body: IDLE_PROMPT.to_string(),
                time_elapsed: time_elapsed.to_string(),
            }
        }
    }
}
