//! Countdown timer module
//!
//! The state machine, its tick source, and time formatting.

pub mod countdown;
pub mod format;
pub mod tick;

pub use countdown::{Completion, CountdownTimer, TickOutcome, TimerOptions};
pub use format::{format_time, parse_duration, DEFAULT_DURATION_SECONDS};
pub use tick::{TickSource, TICK_PERIOD};
