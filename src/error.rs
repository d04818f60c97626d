//! Error types for the timer and its notifier

use thiserror::Error;

/// Errors raised by timer operations
///
/// None of these are fatal: every variant leaves the timer usable and the
/// requested transition aborted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// Duration input was not a positive whole number of seconds
    #[error("invalid duration {input:?}: enter a positive number of seconds")]
    InvalidDuration { input: String },

    /// Duration cannot be changed while the countdown is running
    #[error("duration cannot be changed while the timer is running")]
    DurationLocked,

    /// The countdown task has stopped accepting commands
    #[error("countdown task is not running")]
    Unavailable,
}

impl TimerError {
    pub fn invalid_duration(input: impl Into<String>) -> Self {
        Self::InvalidDuration { input: input.into() }
    }
}

/// Errors raised by a notifier
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// The environment cannot show notifications at all
    #[error("desktop notifications are not supported in this environment")]
    Unsupported,

    /// A notification or permission probe failed for another reason
    #[error("notification failed: {0}")]
    Delivery(String),
}
