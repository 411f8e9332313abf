use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tab holding the parameter -> value control table
pub const BOT_CONTROL_TAB: &str = "Bot_Control";
/// Append-only log of fabricated market samples
pub const PRICE_DATA_TAB: &str = "Price_Data";
/// Append-only log of derived trading signals
pub const ADVISOR_OUTPUT_TAB: &str = "Advisor_Output";

pub const BOT_CONTROL_HEADER: [&str; 2] = ["parameter", "value"];
pub const PRICE_DATA_HEADER: [&str; 5] = ["timestamp", "symbol", "price", "change", "change_percent"];
pub const ADVISOR_OUTPUT_HEADER: [&str; 5] = ["timestamp", "signal", "symbol", "reason", "confidence"];

/// One row of the control table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterRow {
    pub parameter: String,
    pub value: String,
}

/// One row of `Price_Data`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    pub timestamp: String,      // IST, "%Y-%m-%d %H:%M:%S"
    pub symbol: String,
    pub price: Decimal,
    pub change: Decimal,
    pub change_percent: Decimal,
}

impl PriceSample {
    pub fn to_cells(&self) -> Vec<String> {
        vec![
            self.timestamp.clone(),
            self.symbol.clone(),
            self.price.to_string(),
            self.change.to_string(),
            self.change_percent.to_string(),
        ]
    }
}

/// One row of `Advisor_Output`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalRow {
    pub timestamp: String,
    pub signal: String,
    pub symbol: String,
    pub reason: String,
    pub confidence: String,
}

impl SignalRow {
    pub fn to_cells(&self) -> Vec<String> {
        vec![
            self.timestamp.clone(),
            self.signal.clone(),
            self.symbol.clone(),
            self.reason.clone(),
            self.confidence.clone(),
        ]
    }
}

/// Error types for spreadsheet access
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("{0} environment variable not set")]
    MissingConfig(&'static str),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("{var} is not a usable URL: {reason}")]
    InvalidUrl { var: &'static str, reason: String },

    #[error("Invalid service account credentials: {0}")]
    Credentials(String),

    #[error("Token exchange failed: {0}")]
    Auth(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sheets API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Worksheet not found: {0}")]
    TabNotFound(String),
}

/// Result type for spreadsheet operations
pub type Result<T> = std::result::Result<T, SheetError>;

/// Row-level access to a single spreadsheet
#[async_trait::async_trait]
pub trait SpreadsheetBackend: Send + Sync {
    /// All rows of a tab starting at sheet row 1, cells rendered as strings
    async fn read_rows(&self, tab: &str) -> Result<Vec<Vec<String>>>;

    /// Overwrite the cells of a 1-based row, starting at column A
    async fn update_row(&self, tab: &str, row_number: usize, values: Vec<String>) -> Result<()>;

    /// Append a row after the last non-empty row of a tab
    async fn append_row(&self, tab: &str, values: Vec<String>) -> Result<()>;

    /// Backend name
    fn name(&self) -> &str;
}
