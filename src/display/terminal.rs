//! Terminal rendering of the display surface

use std::io::Write;
use tokio::sync::watch;
use tracing::{debug, warn};

use super::{DisplayView, Severity};

/// Render a view as a single terminal line
pub fn render_line(view: &DisplayView) -> String {
    let marker = if view.running {
        ">"
    } else if view.paused {
        "||"
    } else {
        "-"
    };
    let level = match view.status_severity {
        Severity::Info => "info",
        Severity::Warn => "warn",
        Severity::Error => "error",
    };

    if view.status_text.is_empty() {
        format!("[{}] {}", marker, view.time_text)
    } else {
        format!("[{}] {}  {}: {}", marker, view.time_text, level, view.status_text)
    }
}

/// Background task that redraws the terminal line whenever the view changes
pub async fn terminal_render_task(mut views: watch::Receiver<Option<DisplayView>>) {
    debug!("Starting terminal render task");

    let mut last_line = String::new();
    loop {
        let line = views.borrow_and_update().as_ref().map(render_line);

        if let Some(line) = line {
            let mut stdout = std::io::stdout().lock();
            // Pad with spaces so a shorter line fully overwrites the last one
            let width = last_line.chars().count().max(line.chars().count());
            if let Err(e) = write!(stdout, "\r{:<width$}", line, width = width)
                .and_then(|_| stdout.flush())
            {
                warn!("Failed to write to terminal: {}", e);
            }
            last_line = line;
        }

        if views.changed().await.is_err() {
            debug!("Display channel closed, stopping terminal render task");
            break;
        }
    }

    println!();
}
