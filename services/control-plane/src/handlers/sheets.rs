//! Read-only views of the log tabs

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;

use sheet_store::{ADVISOR_OUTPUT_TAB, PRICE_DATA_TAB};

use crate::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct RecordsQuery {
    /// Only the most recent N rows
    pub limit: Option<usize>,
}

/// GET /api/advisor-output
pub async fn get_advisor_output(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RecordsQuery>, QueryRejection>,
) -> Result<Json<Vec<Map<String, Value>>>, ApiError> {
    let Query(query) = query?;
    let records = state.ledger().records(ADVISOR_OUTPUT_TAB, query.limit).await?;
    Ok(Json(records))
}

/// GET /api/price-data
pub async fn get_price_data(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RecordsQuery>, QueryRejection>,
) -> Result<Json<Vec<Map<String, Value>>>, ApiError> {
    let Query(query) = query?;
    let records = state.ledger().records(PRICE_DATA_TAB, query.limit).await?;
    Ok(Json(records))
}
