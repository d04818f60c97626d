//! Desktop notifications through notify-rust

use clap::ValueEnum;
use futures::future::{self, BoxFuture, FutureExt};
use notify_rust::{Notification, Timeout};
use tracing::{debug, info, warn};

use super::{Notifier, PermissionState};
use crate::error::NotifyError;

/// How the desktop notifier answers permission requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NotificationPolicy {
    /// Grant when a notification server is reachable
    Allow,
    /// Always deny; completion uses the status line
    Deny,
    /// Report notifications as unsupported
    Off,
}

/// Notifier that shows native desktop notifications
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    policy: NotificationPolicy,
    app_name: String,
}

impl DesktopNotifier {
    pub fn new(policy: NotificationPolicy) -> Self {
        Self {
            policy,
            app_name: env!("CARGO_PKG_NAME").to_string(),
        }
    }
}

/// Check that a notification server is available
#[cfg(all(unix, not(target_os = "macos")))]
fn probe_notification_server() -> Result<(), NotifyError> {
    let server = notify_rust::get_server_information().map_err(|e| {
        debug!("Notification server probe failed: {}", e);
        NotifyError::Unsupported
    })?;
    debug!("Notification server: {} {}", server.name, server.version);
    Ok(())
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn probe_notification_server() -> Result<(), NotifyError> {
    Ok(())
}

impl Notifier for DesktopNotifier {
    fn request_permission(&self) -> BoxFuture<'static, Result<PermissionState, NotifyError>> {
        match self.policy {
            NotificationPolicy::Deny => future::ready(Ok(PermissionState::Denied)).boxed(),
            NotificationPolicy::Off => future::ready(Err(NotifyError::Unsupported)).boxed(),
            NotificationPolicy::Allow => async {
                tokio::task::spawn_blocking(probe_notification_server)
                    .await
                    .map_err(|e| NotifyError::Delivery(format!("permission probe aborted: {}", e)))??;
                info!("Desktop notifications available");
                Ok::<_, NotifyError>(PermissionState::Granted)
            }
            .boxed(),
        }
    }

    fn notify(&self, title: &str, body: &str) -> BoxFuture<'static, Result<(), NotifyError>> {
        let mut notification = Notification::new();
        notification
            .summary(title)
            .body(body)
            .appname(&self.app_name)
            .timeout(Timeout::Milliseconds(10000));

        async move {
            // show() is a blocking round trip to the notification daemon
            tokio::task::spawn_blocking(move || notification.show().map(|_| ()))
                .await
                .map_err(|e| NotifyError::Delivery(format!("notification task aborted: {}", e)))?
                .map_err(|e| {
                    warn!("Failed to show desktop notification: {}", e);
                    NotifyError::Delivery(e.to_string())
                })
        }
        .boxed()
    }
}
