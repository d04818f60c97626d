//! Shared application state for the HTTP layer

use std::{sync::Mutex, time::Instant};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tracing::warn;

use super::TimerState;
use crate::{display::DisplayView, error::TimerError, timer::CountdownTimer};

/// Commands accepted by the countdown task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerCommand {
    Start,
    Stop,
    Reset,
    /// New text typed into the duration input
    EditDuration(String),
    RequestPermission,
    /// Read-only query for the current snapshot
    Snapshot,
}

impl TimerCommand {
    /// Name recorded as the last action
    pub fn action_name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Reset => "reset",
            Self::EditDuration(_) => "duration",
            Self::RequestPermission => "permission",
            Self::Snapshot => "status",
        }
    }
}

/// Point-in-time copy of the timer for responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub display: DisplayView,
    pub notifications: String,
}

impl TimerSnapshot {
    pub fn capture(timer: &CountdownTimer) -> Self {
        Self {
            state: timer.state().clone(),
            display: timer.view(),
            notifications: timer.capability().as_str().to_string(),
        }
    }
}

/// Result of a command together with the state it left behind
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    pub result: Result<(), TimerError>,
    pub snapshot: TimerSnapshot,
}

/// A command and the channel its outcome is sent back on
#[derive(Debug)]
pub struct TimerRequest {
    pub command: TimerCommand,
    pub reply: oneshot::Sender<CommandOutcome>,
}

/// Main application state shared by the HTTP handlers
#[derive(Debug)]
pub struct AppState {
    /// Channel into the countdown task
    commands: mpsc::Sender<TimerRequest>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    pub fn new(commands: mpsc::Sender<TimerRequest>, port: u16, host: String) -> Self {
        Self {
            commands,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
        }
    }

    /// Send a command to the countdown task and wait for its outcome
    pub async fn dispatch(&self, command: TimerCommand) -> Result<CommandOutcome, TimerError> {
        let action = command.action_name();
        let (reply, outcome) = oneshot::channel();

        self.commands
            .send(TimerRequest { command, reply })
            .await
            .map_err(|_| TimerError::Unavailable)?;
        let outcome = outcome.await.map_err(|_| TimerError::Unavailable)?;

        if action != "status" {
            self.record_action(action);
        }
        Ok(outcome)
    }

    /// Current snapshot of the timer
    pub async fn snapshot(&self) -> Result<TimerSnapshot, TimerError> {
        self.dispatch(TimerCommand::Snapshot).await.map(|outcome| outcome.snapshot)
    }

    fn record_action(&self, action: &str) {
        match self.last_action.lock() {
            Ok(mut last_action) => *last_action = Some(action.to_string()),
            Err(e) => warn!("Failed to record last action: {}", e),
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
