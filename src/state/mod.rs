//! State management module
//!
//! Timer data and the shared handle the HTTP layer uses to reach the timer.

pub mod app_state;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, CommandOutcome, TimerCommand, TimerRequest, TimerSnapshot};
pub use timer_state::{TimerPhase, TimerState};
