#![allow(dead_code)]

use countdown_timer::{
    display::{DisplaySurface, DisplayView},
    notify::{Notifier, PermissionState},
    CountdownTimer, NotifyError, TimerOptions,
};
use futures::future::{self, BoxFuture, FutureExt};
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

/// Display that keeps every rendered view
#[derive(Clone, Default)]
pub struct RecordingDisplay {
    views: Arc<Mutex<Vec<DisplayView>>>,
}

impl RecordingDisplay {
    pub fn views(&self) -> Vec<DisplayView> {
        self.views.lock().unwrap().clone()
    }

    pub fn last(&self) -> DisplayView {
        self.views.lock().unwrap().last().cloned().expect("nothing rendered")
    }

    pub fn count(&self) -> usize {
        self.views.lock().unwrap().len()
    }
}

impl DisplaySurface for RecordingDisplay {
    fn render(&mut self, view: &DisplayView) {
        self.views.lock().unwrap().push(view.clone());
    }
}

/// Notifier with a scripted permission answer
pub struct FakeNotifier {
    permission: Result<PermissionState, NotifyError>,
    fail_delivery: bool,
    delivery_delay: Option<Duration>,
    sent: Mutex<Vec<(String, String)>>,
}

impl FakeNotifier {
    pub fn new(permission: Result<PermissionState, NotifyError>) -> Arc<Self> {
        Arc::new(Self {
            permission,
            fail_delivery: false,
            delivery_delay: None,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn failing_delivery() -> Arc<Self> {
        Arc::new(Self {
            permission: Ok(PermissionState::Granted),
            fail_delivery: true,
            delivery_delay: None,
            sent: Mutex::new(Vec::new()),
        })
    }

    /// Granted notifier whose deliveries take `delay` and then succeed or fail
    pub fn slow(delay: Duration, fail_delivery: bool) -> Arc<Self> {
        Arc::new(Self {
            permission: Ok(PermissionState::Granted),
            fail_delivery,
            delivery_delay: Some(delay),
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn permission(&self) -> Result<PermissionState, NotifyError> {
        self.permission.clone()
    }
}

impl Notifier for FakeNotifier {
    fn request_permission(&self) -> BoxFuture<'static, Result<PermissionState, NotifyError>> {
        future::ready(self.permission.clone()).boxed()
    }

    fn notify(&self, title: &str, body: &str) -> BoxFuture<'static, Result<(), NotifyError>> {
        self.sent
            .lock()
            .unwrap()
            .push((title.to_string(), body.to_string()));
        let result = if self.fail_delivery {
            Err(NotifyError::Delivery("no notification daemon".to_string()))
        } else {
            Ok(())
        };

        match self.delivery_delay {
            Some(delay) => async move {
                tokio::time::sleep(delay).await;
                result
            }
            .boxed(),
            None => future::ready(result).boxed(),
        }
    }
}

/// Build a timer and resolve its permission with the notifier's answer
pub fn timer_with(
    options: TimerOptions,
    input: &str,
    notifier: Arc<FakeNotifier>,
) -> (CountdownTimer, RecordingDisplay) {
    let display = RecordingDisplay::default();
    let mut timer = CountdownTimer::new(options, input, Box::new(display.clone()), notifier.clone());
    timer.permission_resolved(notifier.permission());
    (timer, display)
}

pub fn granted() -> Arc<FakeNotifier> {
    FakeNotifier::new(Ok(PermissionState::Granted))
}
