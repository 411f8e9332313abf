//! Spreadsheet connection settings
//!
//! Read from the process environment (optionally seeded from `.env`).
//! Credentials and the spreadsheet id are required; empty values count as
//! missing.

use reqwest::Url;
use serde::Deserialize;

use crate::types::{Result, SheetError};

pub const CREDENTIALS_VAR: &str = "GOOGLE_SHEETS_CREDENTIALS";
pub const SHEET_ID_VAR: &str = "GOOGLE_SHEET_ID";
pub const API_BASE_VAR: &str = "SHEETS_API_BASE";

pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com";

/// Raw settings as found in the environment
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetSettings {
    #[serde(default)]
    pub google_sheets_credentials: Option<String>,
    #[serde(default)]
    pub google_sheet_id: Option<String>,
    #[serde(default)]
    pub sheets_api_base: Option<String>,
}

/// Settings with every required value present
#[derive(Debug, Clone)]
pub struct SheetConfig {
    pub credentials_json: String,
    pub spreadsheet_id: String,
    pub api_base: String,
}

impl SheetSettings {
    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_environment(config::Environment::default())
    }

    /// Load from an explicit `config` environment source
    pub fn from_environment(env: config::Environment) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(env)
            .build()?
            .try_deserialize::<SheetSettings>()?;
        Ok(settings)
    }

    /// Check required values before any spreadsheet operation
    pub fn validate(self) -> Result<SheetConfig> {
        let credentials_json =
            non_empty(self.google_sheets_credentials).ok_or(SheetError::MissingConfig(CREDENTIALS_VAR))?;
        let spreadsheet_id =
            non_empty(self.google_sheet_id).ok_or(SheetError::MissingConfig(SHEET_ID_VAR))?;
        let api_base = non_empty(self.sheets_api_base)
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();
        check_base_url(&api_base)?;

        Ok(SheetConfig {
            credentials_json,
            spreadsheet_id,
            api_base,
        })
    }
}

fn check_base_url(base: &str) -> Result<()> {
    let invalid = |reason: String| SheetError::InvalidUrl {
        var: API_BASE_VAR,
        reason,
    };

    let url = Url::parse(base).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("{} is not an http(s) base URL", base)));
    }
    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Load `.env` if present; real environment variables win
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
    }
}
