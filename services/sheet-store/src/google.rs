//! Google Sheets v4 `values` API client

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::auth::{AccessTokenSource, ServiceAccountAuth, ServiceAccountKey};
use crate::settings::{SheetConfig, API_BASE_VAR};
use crate::types::*;

/// Google Sheets client bound to one spreadsheet
pub struct GoogleSheetsClient {
    client: Client,
    base_url: String,
    spreadsheet_id: String,
    tokens: Arc<dyn AccessTokenSource>,
}

impl GoogleSheetsClient {
    /// Connect with service account credentials from validated settings
    pub fn connect(config: &SheetConfig) -> Result<Self> {
        let client = Self::http_client()?;
        let key = ServiceAccountKey::from_json(&config.credentials_json)?;
        let auth = ServiceAccountAuth::new(client.clone(), key)?;

        debug!(
            "Sheets client for {} as {}",
            config.spreadsheet_id,
            auth.client_email()
        );

        Ok(Self::with_token_source(
            client,
            &config.api_base,
            &config.spreadsheet_id,
            Arc::new(auth),
        ))
    }

    pub fn with_token_source(
        client: Client,
        base_url: &str,
        spreadsheet_id: &str,
        tokens: Arc<dyn AccessTokenSource>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
            tokens,
        }
    }

    pub fn http_client() -> Result<Client> {
        Ok(Client::builder().timeout(Duration::from_secs(30)).build()?)
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    /// `{base}/v4/spreadsheets/{id}/values/{range}`
    fn values_url(&self, range: &str) -> Result<Url> {
        let invalid = |reason: String| SheetError::InvalidUrl {
            var: API_BASE_VAR,
            reason,
        };
        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;

        url.path_segments_mut()
            .map_err(|_| invalid("cannot be a base URL".into()))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str(), "values", range]);

        Ok(url)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(SheetError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

/// Quote a tab name for A1 notation unless it is a plain identifier
pub fn quote_tab(tab: &str) -> String {
    let plain = !tab.is_empty()
        && tab.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain {
        tab.to_string()
    } else {
        format!("'{}'", tab.replace('\'', "''"))
    }
}

fn cell_to_string(cell: Value) -> String {
    match cell {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRangeBody<'a> {
    range: &'a str,
    major_dimension: &'static str,
    values: [&'a [String]; 1],
}

#[async_trait::async_trait]
impl SpreadsheetBackend for GoogleSheetsClient {
    async fn read_rows(&self, tab: &str) -> Result<Vec<Vec<String>>> {
        let url = self.values_url(&quote_tab(tab))?;
        let token = self.tokens.access_token().await?;

        let response = self.client.get(url).bearer_auth(token).send().await?;
        let range: ValueRange = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| SheetError::InvalidResponse(e.to_string()))?;

        Ok(range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }

    async fn update_row(&self, tab: &str, row_number: usize, values: Vec<String>) -> Result<()> {
        let range = format!("{}!A{}", quote_tab(tab), row_number);
        let mut url = self.values_url(&range)?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED");
        let token = self.tokens.access_token().await?;

        let body = ValueRangeBody {
            range: &range,
            major_dimension: "ROWS",
            values: [values.as_slice()],
        };

        let response = self
            .client
            .put(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        Self::check(response).await?;

        debug!("Updated {} row {}", tab, row_number);
        Ok(())
    }

    async fn append_row(&self, tab: &str, values: Vec<String>) -> Result<()> {
        let range = quote_tab(tab);
        let mut url = self.values_url(&format!("{}:append", range))?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED")
            .append_pair("insertDataOption", "INSERT_ROWS");
        let token = self.tokens.access_token().await?;

        let body = ValueRangeBody {
            range: &range,
            major_dimension: "ROWS",
            values: [values.as_slice()],
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        Self::check(response).await?;

        debug!("Appended row to {}", tab);
        Ok(())
    }

    fn name(&self) -> &str {
        "google_sheets"
    }
}
