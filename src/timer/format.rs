//! Time formatting and duration parsing

use crate::error::TimerError;

/// Duration used when the input cannot be parsed during reset or startup
pub const DEFAULT_DURATION_SECONDS: u64 = 60;

/// Render seconds as `MM:SS`
///
/// Negative values are clamped to zero. There is no hour field, so minutes
/// keep growing past 59 (3661 renders as `61:01`).
pub fn format_time(total_seconds: i64) -> String {
    let total = total_seconds.max(0);
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// `format_time` for the unsigned counters the timer keeps
pub(crate) fn format_seconds(seconds: u64) -> String {
    format_time(i64::try_from(seconds).unwrap_or(i64::MAX))
}

/// Parse a duration input into a positive number of seconds
pub fn parse_duration(input: &str) -> Result<u64, TimerError> {
    match input.trim().parse::<i64>() {
        Ok(seconds) if seconds > 0 => Ok(seconds as u64),
        _ => Err(TimerError::invalid_duration(input)),
    }
}
