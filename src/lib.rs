//! Countdown Timer - a countdown widget with desktop notifications
//!
//! The countdown state machine lives in `timer`; the display, notifier, HTTP
//! control surface and event loop are adapters around it.

pub mod api;
pub mod config;
pub mod display;
pub mod error;
pub mod notify;
pub mod state;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::{NotifyError, TimerError};
pub use state::AppState;
pub use timer::{format_time, CountdownTimer, TimerOptions};
pub use utils::signals::shutdown_signal;
