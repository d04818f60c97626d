//! Countdown event loop
//!
//! One task owns the timer. Commands, ticks, permission answers and
//! notification results are handled here one at a time, so no two of them
//! ever interleave. Notifier futures run in their own tasks.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    error::NotifyError,
    notify::PermissionState,
    state::{CommandOutcome, TimerCommand, TimerRequest, TimerSnapshot},
    timer::{CountdownTimer, TickOutcome},
};

/// Run the countdown until every command sender is dropped
pub async fn countdown_task(mut timer: CountdownTimer, mut commands: mpsc::Receiver<TimerRequest>) {
    info!("Starting countdown task");

    let (permission_tx, mut permission_rx) =
        mpsc::channel::<Result<PermissionState, NotifyError>>(4);
    let (delivery_tx, mut delivery_rx) = mpsc::channel::<Result<(), NotifyError>>(4);

    loop {
        tokio::select! {
            request = commands.recv() => {
                let Some(TimerRequest { command, reply }) = request else {
                    debug!("Command channel closed");
                    break;
                };

                debug!("Countdown task received command: {:?}", command);
                let result = match command {
                    TimerCommand::Start => timer.start(),
                    TimerCommand::Stop => {
                        timer.stop();
                        Ok(())
                    }
                    TimerCommand::Reset => {
                        timer.reset();
                        Ok(())
                    }
                    TimerCommand::EditDuration(input) => timer.edit_duration_input(input),
                    TimerCommand::RequestPermission => {
                        let request = timer.request_permission();
                        let permission_tx = permission_tx.clone();
                        tokio::spawn(async move {
                            let result = request.await;
                            if permission_tx.send(result).await.is_err() {
                                debug!("Countdown task gone before permission resolved");
                            }
                        });
                        Ok(())
                    }
                    TimerCommand::Snapshot => Ok(()),
                };

                let outcome = CommandOutcome {
                    result,
                    snapshot: TimerSnapshot::capture(&timer),
                };
                if reply.send(outcome).is_err() {
                    warn!("Command caller went away before the reply");
                }
            }

            Some(result) = permission_rx.recv() => {
                timer.permission_resolved(result);
            }

            Some(result) = delivery_rx.recv() => {
                timer.notification_delivered(result);
            }

            _ = timer.next_tick() => {
                match timer.tick() {
                    TickOutcome::Counting(remaining) => debug!("Tick, {}s remaining", remaining),
                    TickOutcome::Completed(completion) => {
                        info!("Countdown completed via {:?}", completion);
                        if let Some(delivery) = timer.take_pending_delivery() {
                            let delivery_tx = delivery_tx.clone();
                            tokio::spawn(async move {
                                if delivery_tx.send(delivery.await).await.is_err() {
                                    debug!("Countdown task gone before notification was delivered");
                                }
                            });
                        }
                    }
                    TickOutcome::Ignored => {}
                }
            }
        }
    }

    timer.reset();
    info!("Countdown task stopped");
}
