//! Notification module
//!
//! The timer only ever talks to the `Notifier` trait. Permission is requested
//! asynchronously and the last known answer decides whether completion uses a
//! system notification or falls back to the status line.

pub mod desktop;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::error::NotifyError;

pub use desktop::{DesktopNotifier, NotificationPolicy};

/// Title of the completion notification
pub const COMPLETION_TITLE: &str = "Timer Complete!";

/// Body of the completion notification
pub const COMPLETION_BODY: &str = "Your countdown has finished. Time for your next task!";

/// Answer to a permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    Granted,
    Denied,
    Default,
}

/// What the timer last learned about notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationCapability {
    Unsupported,
    Permission(PermissionState),
}

impl NotificationCapability {
    /// Fold a permission request result into a capability
    ///
    /// Failures other than `Unsupported` leave the permission undecided.
    pub fn from_request(result: &Result<PermissionState, NotifyError>) -> Self {
        match result {
            Ok(permission) => Self::Permission(*permission),
            Err(NotifyError::Unsupported) => Self::Unsupported,
            Err(NotifyError::Delivery(_)) => Self::Permission(PermissionState::Default),
        }
    }

    /// Check if `notify` may be called
    pub fn can_notify(&self) -> bool {
        matches!(self, Self::Permission(PermissionState::Granted))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unsupported => "unsupported",
            Self::Permission(PermissionState::Granted) => "granted",
            Self::Permission(PermissionState::Denied) => "denied",
            Self::Permission(PermissionState::Default) => "default",
        }
    }
}

impl Default for NotificationCapability {
    fn default() -> Self {
        Self::Permission(PermissionState::Default)
    }
}

/// Source of system notifications
pub trait Notifier: Send + Sync {
    /// Ask for permission to show notifications
    ///
    /// The returned future is independent of the notifier so it can be
    /// spawned while the timer keeps ticking.
    fn request_permission(&self) -> BoxFuture<'static, Result<PermissionState, NotifyError>>;

    /// Show a notification. Only called after permission was granted.
    ///
    /// Delivery happens in the returned future, so a slow notification
    /// daemon never stalls the caller.
    fn notify(&self, title: &str, body: &str) -> BoxFuture<'static, Result<(), NotifyError>>;
}
