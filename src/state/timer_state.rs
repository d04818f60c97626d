//! Timer state structure

use serde::{Deserialize, Serialize};

/// Countdown lifecycle phase
///
/// Completion is transient and never stored: the tick that reaches zero
/// fires the completion side effect and folds straight back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
}

/// Duration and remaining time of the countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub initial_duration_seconds: u64,
    pub remaining_seconds: u64,
    pub phase: TimerPhase,
}

impl TimerState {
    /// Create an idle timer at full duration
    pub fn new(duration_seconds: u64) -> Self {
        Self {
            initial_duration_seconds: duration_seconds,
            remaining_seconds: duration_seconds,
            phase: TimerPhase::Idle,
        }
    }

    /// Check if the countdown is running
    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    /// Check if the countdown is paused mid-duration
    pub fn is_paused(&self) -> bool {
        self.phase == TimerPhase::Paused
    }

    /// Set a new duration and rewind to it
    pub fn rewind_to(&mut self, duration_seconds: u64) {
        self.initial_duration_seconds = duration_seconds;
        self.remaining_seconds = duration_seconds;
        self.phase = TimerPhase::Idle;
    }
}
