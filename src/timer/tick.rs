//! The repeating one-second tick source

use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Period between countdown ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A single repeating tick source
///
/// The source is either armed with one pending deadline or disarmed. Arming
/// an armed source keeps the existing deadline, so there is never more than
/// one tick in flight.
#[derive(Debug)]
pub struct TickSource {
    period: Duration,
    next_deadline: Option<Instant>,
}

impl TickSource {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_deadline: None,
        }
    }

    /// Start ticking one period from now, unless already armed
    pub fn arm(&mut self) {
        if self.next_deadline.is_none() {
            self.next_deadline = Some(Instant::now() + self.period);
        }
    }

    /// Drop any pending tick
    pub fn cancel(&mut self) {
        self.next_deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_deadline.is_some()
    }

    /// Wait for the next tick
    ///
    /// Never resolves while disarmed. Cancel safe: the deadline only advances
    /// once the sleep has completed.
    pub async fn next_tick(&mut self) {
        match self.next_deadline {
            Some(deadline) => {
                sleep_until(deadline).await;
                self.next_deadline = Some(deadline + self.period);
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl Default for TickSource {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}
