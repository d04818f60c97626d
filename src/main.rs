//! Countdown Timer - a countdown widget with desktop notifications
//!
//! This is the main entry point for the countdown-timer application.

use std::sync::Arc;
use tokio::{net::TcpListener, sync::mpsc};
use tracing::{info, warn};

use countdown_timer::{
    api::create_router,
    config::Config,
    display::{terminal_render_task, WatchDisplay},
    notify::DesktopNotifier,
    state::{AppState, TimerCommand},
    tasks::countdown_task,
    timer::CountdownTimer,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr; stdout belongs to the terminal renderer
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_timer={},tower_http=info", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting countdown-timer v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, duration={:?}, resume={}, notifications={:?}",
        config.host,
        config.port,
        config.duration,
        !config.no_resume,
        config.notifications
    );

    let (display, views) = WatchDisplay::channel();
    let notifier = Arc::new(DesktopNotifier::new(config.notifications));
    let timer = CountdownTimer::new(
        config.timer_options(),
        config.duration.clone(),
        Box::new(display),
        notifier,
    );

    let terminal_handle = (!config.no_terminal).then(|| tokio::spawn(terminal_render_task(views)));

    // Start the countdown event loop
    let (command_tx, command_rx) = mpsc::channel(32);
    let countdown_handle = tokio::spawn(countdown_task(timer, command_rx));

    let state = Arc::new(AppState::new(command_tx, config.port, config.host.clone()));

    if config.request_permission {
        state.dispatch(TimerCommand::RequestPermission).await?;
    }
    if config.autostart {
        if let Err(e) = state.dispatch(TimerCommand::Start).await?.result {
            warn!("Autostart failed: {}", e);
        }
    }

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Control server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start                    - Start or resume the countdown");
    info!("  POST /stop                     - Pause the countdown");
    info!("  POST /reset                    - Rewind to the duration input");
    info!("  PUT  /duration                 - Set the duration input");
    info!("  POST /notifications/permission - Request notification permission");
    info!("  GET  /status                   - Current timer status");
    info!("  GET  /health                   - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    let signal = tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
            Ok(())
        }
        signal = shutdown_signal() => {
            if signal.is_ok() {
                info!("Shutdown signal received");
            }
            signal.map(|_| ())
        }
    };

    // Dropping the timer closes the display channel, which lets the
    // terminal renderer finish its line before the process exits
    countdown_handle.abort();
    let _ = countdown_handle.await;
    if let Some(handle) = terminal_handle {
        if let Err(e) = handle.await {
            warn!("Terminal render task failed: {}", e);
        }
    }

    info!("Server shutdown complete");
    signal?;
    Ok(())
}
