//! Health check endpoints

use axum::{http::StatusCode, Json};
use serde::Serialize;
use sheet_store::ist;

/// GET / - Service banner with the server's IST time; touches no spreadsheet
pub async fn home() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "running".to_string(),
        message: "Trading Bot Backend API".to_string(),
        timestamp: ist::api_timestamp(&ist::now_ist()),
    })
}

/// Basic health check for load balancers
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub timestamp: String,
}
