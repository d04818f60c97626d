//! Configuration and CLI argument handling

use clap::Parser;

use crate::{
    notify::NotificationPolicy,
    timer::{TimerOptions, DEFAULT_DURATION_SECONDS},
};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "countdown-timer")]
#[command(about = "A countdown timer with an HTTP control surface and desktop notifications")]
#[command(version)]
pub struct Config {
    /// Port to bind the control server to
    #[arg(short, long, default_value = "20560")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Initial duration input in seconds (invalid input falls back to 60)
    #[arg(short, long, default_value = "60", allow_hyphen_values = true)]
    pub duration: String,

    /// Restart from the full duration instead of resuming after a stop
    #[arg(long)]
    pub no_resume: bool,

    /// How desktop notification permission is answered
    #[arg(long, value_enum, default_value = "allow")]
    pub notifications: NotificationPolicy,

    /// Request notification permission at startup
    #[arg(long)]
    pub request_permission: bool,

    /// Start the countdown as soon as the server is up
    #[arg(long)]
    pub autostart: bool,

    /// Do not draw the timer on the terminal
    #[arg(long)]
    pub no_terminal: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Timer behaviour selected on the command line
    pub fn timer_options(&self) -> TimerOptions {
        TimerOptions {
            resume_from_pause: !self.no_resume,
            default_duration_seconds: DEFAULT_DURATION_SECONDS,
        }
    }
}
