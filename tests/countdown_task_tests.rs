mod common;

use common::{granted, FakeNotifier, RecordingDisplay};
use countdown_timer::{
    notify::PermissionState,
    state::{AppState, TimerCommand, TimerPhase, TimerSnapshot},
    tasks::countdown_task,
    CountdownTimer, TimerError, TimerOptions,
};
use std::{sync::Arc, time::Duration};
use tokio::{sync::mpsc, time::sleep};

fn spawn_timer(input: &str, notifier: Arc<FakeNotifier>) -> AppState {
    let timer = CountdownTimer::new(
        TimerOptions::default(),
        input,
        Box::new(RecordingDisplay::default()),
        notifier,
    );
    let (tx, rx) = mpsc::channel(8);
    tokio::spawn(countdown_task(timer, rx));
    AppState::new(tx, 0, "127.0.0.1".to_string())
}

async fn wait_for_notifications(state: &AppState, expected: &str) -> TimerSnapshot {
    for _ in 0..50 {
        let snapshot = state.snapshot().await.unwrap();
        if snapshot.notifications == expected {
            return snapshot;
        }
        sleep(Duration::from_millis(10)).await;
    }
    panic!("notifications never became {}", expected);
}

#[tokio::test(start_paused = true)]
async fn test_ticks_once_per_second() {
    let state = spawn_timer("10", granted());
    state.dispatch(TimerCommand::Start).await.unwrap().result.unwrap();

    sleep(Duration::from_millis(3500)).await;
    let snapshot = state.snapshot().await.unwrap();
    assert_eq!(snapshot.state.phase, TimerPhase::Running);
    assert_eq!(snapshot.state.remaining_seconds, 7);
    assert_eq!(snapshot.display.time_text, "00:07");
}

#[tokio::test(start_paused = true)]
async fn test_stop_cancels_pending_ticks() {
    let state = spawn_timer("10", granted());
    state.dispatch(TimerCommand::Start).await.unwrap();
    sleep(Duration::from_millis(2500)).await;

    let outcome = state.dispatch(TimerCommand::Stop).await.unwrap();
    assert_eq!(outcome.snapshot.state.phase, TimerPhase::Paused);
    assert_eq!(outcome.snapshot.state.remaining_seconds, 8);

    sleep(Duration::from_secs(5)).await;
    let snapshot = state.snapshot().await.unwrap();
    assert_eq!(snapshot.state.remaining_seconds, 8);
}

#[tokio::test(start_paused = true)]
async fn test_double_start_does_not_double_tick() {
    let state = spawn_timer("10", granted());
    state.dispatch(TimerCommand::Start).await.unwrap();
    sleep(Duration::from_millis(500)).await;
    state.dispatch(TimerCommand::Start).await.unwrap();

    sleep(Duration::from_millis(2700)).await;
    let snapshot = state.snapshot().await.unwrap();
    assert_eq!(snapshot.state.remaining_seconds, 7);
}

#[tokio::test(start_paused = true)]
async fn test_completion_through_the_task() {
    let notifier = FakeNotifier::new(Ok(PermissionState::Granted));
    let state = spawn_timer("2", notifier.clone());

    state.dispatch(TimerCommand::RequestPermission).await.unwrap();
    wait_for_notifications(&state, "granted").await;

    state.dispatch(TimerCommand::Start).await.unwrap();
    sleep(Duration::from_millis(2500)).await;

    let snapshot = state.snapshot().await.unwrap();
    assert_eq!(snapshot.state.phase, TimerPhase::Idle);
    assert_eq!(snapshot.state.remaining_seconds, 2);
    assert_eq!(notifier.sent().len(), 1);
    assert_eq!(snapshot.display.status_text, "Timer complete!");
}

#[tokio::test(start_paused = true)]
async fn test_denied_permission_through_the_task() {
    let notifier = FakeNotifier::new(Ok(PermissionState::Denied));
    let state = spawn_timer("1", notifier.clone());

    state.dispatch(TimerCommand::RequestPermission).await.unwrap();
    wait_for_notifications(&state, "denied").await;

    state.dispatch(TimerCommand::Start).await.unwrap();
    sleep(Duration::from_millis(1500)).await;

    let snapshot = state.snapshot().await.unwrap();
    assert!(notifier.sent().is_empty());
    assert!(snapshot.display.status_text.starts_with("TIME'S UP!"));
}

#[tokio::test(start_paused = true)]
async fn test_invalid_duration_is_reported_without_state_change() {
    let state = spawn_timer("10", granted());

    let outcome = state
        .dispatch(TimerCommand::EditDuration("abc".to_string()))
        .await
        .unwrap();
    assert!(matches!(outcome.result, Err(TimerError::InvalidDuration { .. })));

    let outcome = state.dispatch(TimerCommand::Start).await.unwrap();
    assert!(matches!(outcome.result, Err(TimerError::InvalidDuration { .. })));
    assert_eq!(outcome.snapshot.state.phase, TimerPhase::Idle);
    assert_eq!(outcome.snapshot.state.remaining_seconds, 10);
}

#[tokio::test(start_paused = true)]
async fn test_last_action_is_recorded() {
    let state = spawn_timer("10", granted());
    assert_eq!(state.get_last_action().0, None);

    state.dispatch(TimerCommand::Reset).await.unwrap();
    state.snapshot().await.unwrap();
    assert_eq!(state.get_last_action().0.as_deref(), Some("reset"));
}

#[tokio::test(start_paused = true)]
async fn test_slow_notification_does_not_block_commands() {
    let notifier = FakeNotifier::slow(Duration::from_secs(10), true);
    let state = spawn_timer("1", notifier.clone());

    state.dispatch(TimerCommand::RequestPermission).await.unwrap();
    wait_for_notifications(&state, "granted").await;

    state.dispatch(TimerCommand::Start).await.unwrap();
    sleep(Duration::from_millis(1500)).await;

    // Delivery is still in flight, the loop keeps serving commands
    let snapshot = state.snapshot().await.unwrap();
    assert_eq!(notifier.sent().len(), 1);
    assert_eq!(snapshot.state.phase, TimerPhase::Idle);
    assert_eq!(snapshot.display.status_text, "Timer complete!");

    let outcome = state.dispatch(TimerCommand::Start).await.unwrap();
    assert_eq!(outcome.snapshot.state.phase, TimerPhase::Running);
    let outcome = state.dispatch(TimerCommand::Stop).await.unwrap();
    assert_eq!(outcome.snapshot.state.phase, TimerPhase::Paused);

    // The failed delivery lands later and falls back to the status line
    sleep(Duration::from_secs(10)).await;
    let snapshot = state.snapshot().await.unwrap();
    assert!(snapshot.display.status_text.starts_with("TIME'S UP!"));
    assert_eq!(notifier.sent().len(), 1);
}
