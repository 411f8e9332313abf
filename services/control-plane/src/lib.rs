pub mod error;
pub mod health;
pub mod settings;
pub mod handlers {
    pub mod bots;
    pub mod mode;
    pub mod sheets;
}

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use sheet_store::{BotControl, SheetLedger, SpreadsheetBackend};

pub use error::ApiError;
pub use settings::ServerSettings;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sheets: Arc<dyn SpreadsheetBackend>,
}

impl AppState {
    pub fn new(sheets: Arc<dyn SpreadsheetBackend>) -> Self {
        Self { sheets }
    }

    pub fn control(&self) -> BotControl {
        BotControl::new(self.sheets.clone())
    }

    pub fn ledger(&self) -> SheetLedger {
        SheetLedger::new(self.sheets.clone())
    }
}

/// Build the API router
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/bot-status", get(handlers::bots::get_bot_status))
        .route("/start-bot", post(handlers::bots::start_bot))
        .route("/stop-bot", post(handlers::bots::stop_bot))
        .route("/mode", get(handlers::mode::get_mode).post(handlers::mode::switch_mode))
        .route("/advisor-output", get(handlers::sheets::get_advisor_output))
        .route("/price-data", get(handlers::sheets::get_price_data));

    Router::new()
        .route("/", get(health::home))
        .route("/healthz", get(health::healthz))
        .nest("/api", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
