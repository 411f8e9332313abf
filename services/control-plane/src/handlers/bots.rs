//! Bot control handlers
//!
//! Start/stop translate into parameter writes on the Bot_Control tab; status
//! reads the whole table back.

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use sheet_store::control::{
    self, LAST_STARTED, LAST_STOPPED, MARKET_HOURS, STATUS, STATUS_RUNNING, STATUS_STOPPED,
};
use sheet_store::ist;

use crate::{ApiError, AppState};

/// GET /api/bot-status - Flattened control table plus server time
pub async fn get_bot_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    let rows = state.control().parameters().await?;
    if rows.is_empty() {
        return Err(ApiError::NotFound("No data found in Bot_Control sheet".to_string()));
    }

    let is_running = rows
        .iter()
        .find(|r| r.parameter == STATUS)
        .is_some_and(|r| control::status_is_running(&r.value));

    let mut body = control::flatten(&rows);
    body.entry(STATUS)
        .or_insert_with(|| Value::from("unknown"));
    body.insert("is_running".to_string(), Value::Bool(is_running));
    body.insert(
        "timestamp".to_string(),
        Value::from(ist::api_timestamp(&ist::now_ist())),
    );

    Ok(Json(Value::Object(body)))
}

/// POST /api/start-bot
pub async fn start_bot(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BotActionResponse>, ApiError> {
    let now = ist::now_ist();

    state
        .control()
        .set_many(&[
            (STATUS, STATUS_RUNNING.to_string()),
            (LAST_STARTED, ist::clock_time(&now)),
            (MARKET_HOURS, "TRUE".to_string()),
        ])
        .await?;

    info!("Trading bot started at {}", ist::clock_time(&now));

    Ok(Json(BotActionResponse {
        message: "Bot started successfully".to_string(),
        status: STATUS_RUNNING.to_string(),
        started_at: Some(ist::api_timestamp(&now)),
        stopped_at: None,
    }))
}

/// POST /api/stop-bot
pub async fn stop_bot(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BotActionResponse>, ApiError> {
    let now = ist::now_ist();

    state
        .control()
        .set_many(&[
            (STATUS, STATUS_STOPPED.to_string()),
            (LAST_STOPPED, ist::clock_time(&now)),
            (MARKET_HOURS, "FALSE".to_string()),
        ])
        .await?;

    info!("Trading bot stopped at {}", ist::clock_time(&now));

    Ok(Json(BotActionResponse {
        message: "Bot stopped successfully".to_string(),
        status: STATUS_STOPPED.to_string(),
        started_at: None,
        stopped_at: Some(ist::api_timestamp(&now)),
    }))
}

#[derive(Debug, Serialize)]
pub struct BotActionResponse {
    pub message: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopped_at: Option<String>,
}
