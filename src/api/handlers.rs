//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    error::TimerError,
    state::{AppState, CommandOutcome, TimerCommand},
};
use super::responses::{ApiResponse, DurationRequest, HealthResponse, StatusResponse};

type HandlerResult = Result<(StatusCode, Json<ApiResponse>), StatusCode>;

/// Dispatch a command and turn its outcome into a response
async fn run_command(state: &AppState, command: TimerCommand, success: &str) -> HandlerResult {
    let CommandOutcome { result, snapshot } = match state.dispatch(command).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Failed to reach countdown task: {}", e);
            return Err(StatusCode::SERVICE_UNAVAILABLE);
        }
    };

    match result {
        Ok(()) => {
            info!("{}", success);
            Ok((StatusCode::OK, Json(ApiResponse::phase(success.to_string(), snapshot))))
        }
        Err(e) => {
            warn!("Timer command rejected: {}", e);
            let status = match e {
                TimerError::InvalidDuration { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                TimerError::DurationLocked => StatusCode::CONFLICT,
                TimerError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            };
            Ok((status, Json(ApiResponse::error(e.to_string(), snapshot))))
        }
    }
}

/// Handle POST /start - Start or resume the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> HandlerResult {
    run_command(&state, TimerCommand::Start, "Timer running").await
}

/// Handle POST /stop - Pause the countdown
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> HandlerResult {
    run_command(&state, TimerCommand::Stop, "Timer stopped").await
}

/// Handle POST /reset - Rewind to the input duration
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> HandlerResult {
    run_command(&state, TimerCommand::Reset, "Timer reset").await
}

/// Handle PUT /duration - Update the duration input
pub async fn duration_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DurationRequest>,
) -> HandlerResult {
    let input = request.input_text();
    run_command(&state, TimerCommand::EditDuration(input), "Duration input updated").await
}

/// Handle POST /notifications/permission - Ask for notification permission
pub async fn permission_handler(State(state): State<Arc<AppState>>) -> HandlerResult {
    run_command(&state, TimerCommand::RequestPermission, "Notification permission requested").await
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.snapshot().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("Failed to get timer snapshot: {}", e);
            return Err(StatusCode::SERVICE_UNAVAILABLE);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
