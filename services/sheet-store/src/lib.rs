//! Spreadsheet-backed state for the trading bot control panel
//!
//! One Google spreadsheet holds everything: a parameter table (`Bot_Control`)
//! used as a key-value store, and two append-only logs (`Price_Data`,
//! `Advisor_Output`).

pub mod auth;
pub mod coerce;
pub mod control;
pub mod google;
pub mod ist;
pub mod ledger;
pub mod memory;
pub mod settings;
pub mod types;

pub use types::*;
pub use auth::{AccessTokenSource, ServiceAccountAuth, ServiceAccountKey, StaticToken};
pub use settings::{SheetConfig, SheetSettings};
pub use control::BotControl;
pub use google::GoogleSheetsClient;
pub use ledger::SheetLedger;
pub use memory::InMemorySheets;

use std::sync::Arc;
use tracing::info;

/// Connect to the configured spreadsheet.
///
/// Fails before any network traffic when credentials or the spreadsheet id
/// are missing.
pub fn connect_from_env() -> Result<Arc<dyn SpreadsheetBackend>> {
    connect(SheetSettings::from_env()?)
}

/// Connect with already-loaded settings
pub fn connect(settings: SheetSettings) -> Result<Arc<dyn SpreadsheetBackend>> {
    let config = settings.validate()?;
    let client = GoogleSheetsClient::connect(&config)?;
    info!("✓ Google Sheets client ready for {}", client.spreadsheet_id());
    Ok(Arc::new(client))
}
