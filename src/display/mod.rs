//! Display surface module
//!
//! The timer renders a `DisplayView` after every transition. Surfaces decide
//! where that view goes: a watch channel for other tasks, or the terminal.

pub mod terminal;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

pub use terminal::terminal_render_task;

/// Severity of the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warn,
    Error,
}

/// Status line shown under the clock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub text: String,
    pub severity: Severity,
}

impl Status {
    pub fn info(text: impl Into<String>) -> Self {
        Self { text: text.into(), severity: Severity::Info }
    }

    pub fn warn(text: impl Into<String>) -> Self {
        Self { text: text.into(), severity: Severity::Warn }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), severity: Severity::Error }
    }
}

/// Everything a surface needs to draw the widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayView {
    pub time_text: String,
    pub running: bool,
    pub paused: bool,
    pub status_text: String,
    pub status_severity: Severity,
    pub start_enabled: bool,
    pub stop_enabled: bool,
    /// Whether asking for notification permission makes sense
    pub permission_enabled: bool,
    pub duration_input: String,
}

/// Rendering target for the timer
pub trait DisplaySurface: Send {
    fn render(&mut self, view: &DisplayView);
}

/// Surface that publishes every view on a watch channel
#[derive(Debug)]
pub struct WatchDisplay {
    tx: watch::Sender<Option<DisplayView>>,
}

impl WatchDisplay {
    /// Create the surface and a receiver that sees every rendered view
    pub fn channel() -> (Self, watch::Receiver<Option<DisplayView>>) {
        let (tx, rx) = watch::channel(None);
        (Self { tx }, rx)
    }
}

impl DisplaySurface for WatchDisplay {
    fn render(&mut self, view: &DisplayView) {
        // send_replace keeps publishing even with no receiver attached
        self.tx.send_replace(Some(view.clone()));
    }
}
