//! Countdown state machine

use std::sync::Arc;
use futures::future::BoxFuture;
use tracing::{debug, info, warn};

use super::{
    format::{format_seconds, parse_duration, DEFAULT_DURATION_SECONDS},
    tick::TickSource,
};
use crate::{
    display::{DisplaySurface, DisplayView, Status},
    error::{NotifyError, TimerError},
    notify::{NotificationCapability, Notifier, PermissionState, COMPLETION_BODY, COMPLETION_TITLE},
    state::{TimerPhase, TimerState},
};

const INVALID_DURATION_STATUS: &str = "Please enter a positive number of seconds to start.";
const COMPLETION_FALLBACK_STATUS: &str = "TIME'S UP! (Notification blocked or unavailable)";

/// Behaviour switches for the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerOptions {
    /// Resume a paused countdown instead of restarting from the input
    pub resume_from_pause: bool,
    /// Duration used when the input is invalid during reset
    pub default_duration_seconds: u64,
}

impl Default for TimerOptions {
    fn default() -> Self {
        Self {
            resume_from_pause: true,
            default_duration_seconds: DEFAULT_DURATION_SECONDS,
        }
    }
}

/// How a completed countdown was announced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// A system notification was handed to the notifier
    Notified,
    /// The status line carried the announcement
    StatusFallback,
}

/// Result of delivering one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Countdown continues with this many seconds left
    Counting(u64),
    /// Countdown reached zero and folded back to idle
    Completed(Completion),
    /// Timer was not running; the tick was dropped
    Ignored,
}

/// Countdown timer with a single tick source
///
/// All mutation goes through the methods below, which re-render the display
/// before returning.
pub struct CountdownTimer {
    state: TimerState,
    duration_input: String,
    options: TimerOptions,
    ticks: TickSource,
    capability: NotificationCapability,
    status: Status,
    permission_pending: bool,
    pending_delivery: Option<BoxFuture<'static, Result<(), NotifyError>>>,
    display: Box<dyn DisplaySurface>,
    notifier: Arc<dyn Notifier>,
}

impl CountdownTimer {
    /// Create an idle timer from the initial duration input
    ///
    /// Invalid input falls back to the default duration and the input is
    /// corrected to match.
    pub fn new(
        options: TimerOptions,
        duration_input: impl Into<String>,
        display: Box<dyn DisplaySurface>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let capability = NotificationCapability::default();
        let mut timer = Self {
            state: TimerState::new(options.default_duration_seconds),
            duration_input: duration_input.into(),
            options,
            ticks: TickSource::default(),
            capability,
            status: permission_status(capability),
            permission_pending: false,
            pending_delivery: None,
            display,
            notifier,
        };
        timer.reload_duration_or_default();
        timer.render();
        timer
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn duration_input(&self) -> &str {
        &self.duration_input
    }

    pub fn capability(&self) -> NotificationCapability {
        self.capability
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Check if a tick source is armed
    pub fn has_tick_source(&self) -> bool {
        self.ticks.is_armed()
    }

    /// Set the duration, rewinding the countdown to it
    ///
    /// Only valid while not running. An invalid input leaves the state
    /// untouched and shows an error status.
    pub fn set_duration(&mut self, input: &str) -> Result<u64, TimerError> {
        if self.state.is_running() {
            debug!("Ignoring duration {:?} while running", input);
            return Err(TimerError::DurationLocked);
        }

        let seconds = match parse_duration(input) {
            Ok(seconds) => seconds,
            Err(e) => {
                warn!("Rejected duration input: {}", e);
                self.status = Status::error(INVALID_DURATION_STATUS);
                self.render();
                return Err(e);
            }
        };

        self.state.rewind_to(seconds);
        self.status = permission_status(self.capability);
        debug!("Duration set to {}s", seconds);
        self.render();
        Ok(seconds)
    }

    /// Record new text in the duration input
    ///
    /// While running the text is only stored and applies on the next start
    /// from idle. Otherwise it is applied immediately.
    pub fn edit_duration_input(&mut self, input: impl Into<String>) -> Result<(), TimerError> {
        self.duration_input = input.into();
        if self.state.is_running() {
            debug!("Duration input {:?} deferred until next start", self.duration_input);
            self.render();
            return Ok(());
        }

        let input = self.duration_input.clone();
        self.set_duration(&input).map(|_| ())
    }

    /// Start or resume the countdown
    ///
    /// A no-op while already running. From idle, or from paused when resuming
    /// is disabled, the duration is re-read from the input first.
    pub fn start(&mut self) -> Result<(), TimerError> {
        match self.state.phase {
            TimerPhase::Running => {
                debug!("Start requested while running, ignoring");
                return Ok(());
            }
            TimerPhase::Paused if self.options.resume_from_pause => {
                info!("Resuming countdown at {}", format_seconds(self.state.remaining_seconds));
            }
            TimerPhase::Paused | TimerPhase::Idle => {
                let input = self.duration_input.clone();
                self.set_duration(&input)?;
                info!("Starting countdown for {}s", self.state.initial_duration_seconds);
            }
        }

        self.state.phase = TimerPhase::Running;
        self.ticks.arm();
        self.status = permission_status(self.capability);
        self.render();
        Ok(())
    }

    /// Pause a running countdown, keeping the remaining time
    pub fn stop(&mut self) {
        if !self.state.is_running() {
            debug!("Stop requested while {:?}, ignoring", self.state.phase);
            return;
        }

        self.ticks.cancel();
        self.state.phase = TimerPhase::Paused;
        let remaining = format_seconds(self.state.remaining_seconds);
        info!("Countdown paused at {}", remaining);
        self.status = Status::info(format!("Paused at {}.", remaining));
        self.render();
    }

    /// Cancel any countdown and rewind to the input duration
    pub fn reset(&mut self) {
        self.ticks.cancel();
        self.status = permission_status(self.capability);
        self.reload_duration_or_default();
        info!("Countdown reset to {}s", self.state.initial_duration_seconds);
        self.render();
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_running() {
            debug!("Dropping tick while {:?}", self.state.phase);
            return TickOutcome::Ignored;
        }

        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        self.render();

        if self.state.remaining_seconds > 0 {
            return TickOutcome::Counting(self.state.remaining_seconds);
        }

        self.ticks.cancel();
        info!("Countdown complete");
        let completion = self.announce_completion();
        self.state.rewind_to(self.state.initial_duration_seconds);
        self.render();
        TickOutcome::Completed(completion)
    }

    /// Wait for the next tick; pending forever while not running
    pub async fn next_tick(&mut self) {
        self.ticks.next_tick().await
    }

    /// Start a permission request
    ///
    /// The returned future resolves independently of the timer. Feed its
    /// result back through `permission_resolved`.
    pub fn request_permission(&mut self) -> BoxFuture<'static, Result<PermissionState, NotifyError>> {
        info!("Requesting notification permission");
        self.permission_pending = true;
        self.status = Status::info("Requesting notification permission...");
        self.render();
        self.notifier.request_permission()
    }

    /// Record the answer to a permission request
    pub fn permission_resolved(&mut self, result: Result<PermissionState, NotifyError>) {
        if let Err(e) = &result {
            warn!("Notification permission request failed: {}", e);
        }
        self.permission_pending = false;
        self.capability = NotificationCapability::from_request(&result);
        info!("Notification capability is now {}", self.capability.as_str());
        self.status = permission_status(self.capability);
        self.render();
    }

    /// Take the completion notification waiting to be delivered
    ///
    /// The caller drives the future off the event loop and reports back
    /// through `notification_delivered`.
    pub fn take_pending_delivery(&mut self) -> Option<BoxFuture<'static, Result<(), NotifyError>>> {
        self.pending_delivery.take()
    }

    /// Record how a completion notification delivery went
    pub fn notification_delivered(&mut self, result: Result<(), NotifyError>) {
        match result {
            Ok(()) => debug!("Completion notification delivered"),
            Err(e) => {
                warn!("Completion notification failed, using status line: {}", e);
                self.status = Status::error(COMPLETION_FALLBACK_STATUS);
                self.render();
            }
        }
    }

    /// Current view of the widget
    pub fn view(&self) -> DisplayView {
        let running = self.state.is_running();
        DisplayView {
            time_text: format_seconds(self.state.remaining_seconds),
            running,
            paused: self.state.is_paused(),
            status_text: self.status.text.clone(),
            status_severity: self.status.severity,
            start_enabled: !running,
            stop_enabled: running,
            permission_enabled: !self.permission_pending && !self.capability.can_notify(),
            duration_input: self.duration_input.clone(),
        }
    }

    fn render(&mut self) {
        debug_assert!(self.state.remaining_seconds <= self.state.initial_duration_seconds);
        debug_assert_eq!(self.state.is_running(), self.ticks.is_armed());
        let view = self.view();
        self.display.render(&view);
    }

    /// Apply the input as the duration, correcting it to the default if invalid
    fn reload_duration_or_default(&mut self) {
        let seconds = match parse_duration(&self.duration_input) {
            Ok(seconds) => seconds,
            Err(e) => {
                let fallback = self.options.default_duration_seconds;
                warn!("{}; falling back to {}s", e, fallback);
                self.duration_input = fallback.to_string();
                self.status = Status::warn(format!("Invalid duration, reset to {} seconds.", fallback));
                fallback
            }
        };
        self.state.rewind_to(seconds);
    }

    fn announce_completion(&mut self) -> Completion {
        if self.capability.can_notify() {
            self.pending_delivery = Some(self.notifier.notify(COMPLETION_TITLE, COMPLETION_BODY));
            self.status = Status::info("Timer complete!");
            return Completion::Notified;
        }

        debug!("Notifications {}, using status line", self.capability.as_str());
        self.status = Status::error(COMPLETION_FALLBACK_STATUS);
        Completion::StatusFallback
    }
}

/// Status line describing the notification capability
fn permission_status(capability: NotificationCapability) -> Status {
    match capability {
        NotificationCapability::Permission(PermissionState::Granted) => {
            Status::info("Notifications are granted. Ready to start!")
        }
        NotificationCapability::Permission(PermissionState::Denied) => Status::warn(
            "Notifications are denied. Timer will still run, but no pop-up alerts will appear.",
        ),
        NotificationCapability::Permission(PermissionState::Default) => Status::info(
            "Notification permission not requested yet. Completion will be shown here.",
        ),
        NotificationCapability::Unsupported => {
            Status::warn("Desktop notifications are not supported. Timer will still run.")
        }
    }
}
