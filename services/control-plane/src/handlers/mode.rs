//! System mode (emergency / full), stored as a control-table parameter

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use sheet_store::control::{MODE_CHANGED_AT, SYSTEM_MODE};
use sheet_store::ist;

use crate::{ApiError, AppState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemMode {
    /// Basic analysis only
    #[default]
    Emergency,
    Full,
}

impl SystemMode {
    pub const ALL: [SystemMode; 2] = [SystemMode::Emergency, SystemMode::Full];

    pub fn as_str(&self) -> &'static str {
        match self {
            SystemMode::Emergency => "emergency",
            SystemMode::Full => "full",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
    }

    pub fn details(&self) -> ModeDetails {
        match self {
            SystemMode::Emergency => ModeDetails {
                description: "Basic analysis only - capital preservation focus",
                risk_level: "Low",
                max_position_size: "2%",
                strategies: vec!["Basic Momentum", "Support/Resistance"],
            },
            SystemMode::Full => ModeDetails {
                description: "Full analysis with sentiment & advanced signals",
                risk_level: "Medium-High",
                max_position_size: "5%",
                strategies: vec!["Momentum", "Mean Reversion", "Sentiment", "Breakout"],
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ModeDetails {
    pub description: &'static str,
    pub risk_level: &'static str,
    pub max_position_size: &'static str,
    pub strategies: Vec<&'static str>,
}

/// GET /api/mode
pub async fn get_mode(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ModeResponse>, ApiError> {
    let rows = state.control().parameters().await?;
    let stored = |name: &str| {
        rows.iter()
            .find(|r| r.parameter == name)
            .map(|r| r.value.clone())
    };

    // Unset or unrecognised values fall back to the default mode
    let mode = stored(SYSTEM_MODE)
        .as_deref()
        .and_then(SystemMode::parse)
        .unwrap_or_default();

    Ok(Json(ModeResponse {
        mode,
        last_changed: stored(MODE_CHANGED_AT),
        details: mode.details(),
        available_modes: SystemMode::ALL.to_vec(),
    }))
}

/// POST /api/mode - `{"mode": "full"}`
pub async fn switch_mode(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SwitchModeRequest>, JsonRejection>,
) -> Result<Json<SwitchModeResponse>, ApiError> {
    let Json(req) = payload?;
    let requested = req
        .mode
        .as_deref()
        .and_then(SystemMode::parse)
        .ok_or_else(|| {
            ApiError::BadRequest(r#"Invalid mode. Must be "emergency" or "full""#.to_string())
        })?;

    let control = state.control();
    let previous = control
        .get(SYSTEM_MODE)
        .await?
        .as_deref()
        .and_then(SystemMode::parse)
        .unwrap_or_default();

    if previous == requested {
        return Err(ApiError::BadRequest(format!(
            "System is already in {} mode",
            requested.as_str()
        )));
    }

    let now = ist::now_ist();
    control
        .set_many(&[
            (SYSTEM_MODE, requested.as_str().to_string()),
            (MODE_CHANGED_AT, ist::clock_time(&now)),
        ])
        .await?;

    info!(
        "System mode switched from {} to {}",
        previous.as_str(),
        requested.as_str()
    );

    Ok(Json(SwitchModeResponse {
        message: format!(
            "System mode switched to {} successfully",
            requested.as_str().to_uppercase()
        ),
        mode: requested,
        previous_mode: previous,
        last_changed: ist::clock_time(&now),
    }))
}

#[derive(Debug, Deserialize)]
pub struct SwitchModeRequest {
    #[serde(default)]
    pub mode: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ModeResponse {
    pub mode: SystemMode,
    pub last_changed: Option<String>,
    pub details: ModeDetails,
    pub available_modes: Vec<SystemMode>,
}

#[derive(Debug, Serialize)]
pub struct SwitchModeResponse {
    pub message: String,
    pub mode: SystemMode,
    pub previous_mode: SystemMode,
    pub last_changed: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode() {
        assert_eq!(SystemMode::parse("full"), Some(SystemMode::Full));
        assert_eq!(SystemMode::parse(" Emergency "), Some(SystemMode::Emergency));
        assert_eq!(SystemMode::parse("turbo"), None);
    }

    #[test]
    fn test_mode_serializes_lowercase() {
        assert_eq!(serde_json::to_value(SystemMode::Full).unwrap(), "full");
        assert_eq!(SystemMode::default(), SystemMode::Emergency);
    }
}
