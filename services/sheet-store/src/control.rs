//! Bot_Control: a parameter -> value table kept as spreadsheet rows
//!
//! Row 1 is the header. Parameters are looked up by linear scan and the first
//! match wins; duplicates are not prevented. There is no locking, so
//! concurrent writers can interleave.

use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info};

use crate::coerce::coerce_value;
use crate::types::*;

pub const STATUS: &str = "status";
pub const LAST_STARTED: &str = "last_started";
pub const LAST_STOPPED: &str = "last_stopped";
pub const MARKET_HOURS: &str = "market_hours";
pub const SYSTEM_MODE: &str = "system_mode";
pub const MODE_CHANGED_AT: &str = "mode_changed_at";

pub const STATUS_RUNNING: &str = "running";
pub const STATUS_STOPPED: &str = "stopped";

/// State accessor over the control tab
#[derive(Clone)]
pub struct BotControl {
    sheets: Arc<dyn SpreadsheetBackend>,
    tab: String,
}

impl BotControl {
    pub fn new(sheets: Arc<dyn SpreadsheetBackend>) -> Self {
        Self::with_tab(sheets, BOT_CONTROL_TAB)
    }

    pub fn with_tab(sheets: Arc<dyn SpreadsheetBackend>, tab: &str) -> Self {
        Self {
            sheets,
            tab: tab.to_string(),
        }
    }

    /// All parameter rows in sheet order
    pub async fn parameters(&self) -> Result<Vec<ParameterRow>> {
        let rows = self.sheets.read_rows(&self.tab).await?;
        Ok(parse_rows(&rows).into_iter().map(|(_, row)| row).collect())
    }

    /// Value of the first row named `parameter`
    pub async fn get(&self, parameter: &str) -> Result<Option<String>> {
        let rows = self.sheets.read_rows(&self.tab).await?;
        Ok(parse_rows(&rows)
            .into_iter()
            .find(|(_, row)| row.parameter == parameter)
            .map(|(_, row)| row.value))
    }

    /// Update the parameter's row in place, or append it if absent
    pub async fn set(&self, parameter: &str, value: &str) -> Result<()> {
        let rows = self.sheets.read_rows(&self.tab).await?;
        let cells = vec![parameter.to_string(), value.to_string()];

        if let Some((row_number, _)) = parse_rows(&rows)
            .into_iter()
            .find(|(_, row)| row.parameter == parameter)
        {
            debug!("{}: {} = {} (row {})", self.tab, parameter, value, row_number);
            return self.sheets.update_row(&self.tab, row_number, cells).await;
        }

        if rows.is_empty() {
            info!("{} is empty, writing header", self.tab);
            self.sheets
                .append_row(&self.tab, BOT_CONTROL_HEADER.iter().map(|h| h.to_string()).collect())
                .await?;
        }

        debug!("{}: {} = {} (new row)", self.tab, parameter, value);
        self.sheets.append_row(&self.tab, cells).await
    }

    /// Sequential `set`s; earlier writes are not rolled back if a later one fails
    pub async fn set_many(&self, updates: &[(&str, String)]) -> Result<()> {
        for (parameter, value) in updates {
            self.set(parameter, value).await?;
        }
        Ok(())
    }

    /// Parameter table as a JSON object with values coerced
    pub async fn flattened(&self) -> Result<Map<String, Value>> {
        Ok(flatten(&self.parameters().await?))
    }

    /// True iff the stored status is "running" in any letter case
    pub async fn is_running(&self) -> Result<bool> {
        Ok(self
            .get(STATUS)
            .await?
            .as_deref()
            .is_some_and(status_is_running))
    }
}

pub fn status_is_running(status: &str) -> bool {
    status.trim().eq_ignore_ascii_case(STATUS_RUNNING)
}

/// Later duplicates do not override the first occurrence
pub fn flatten(rows: &[ParameterRow]) -> Map<String, Value> {
    let mut map = Map::new();
    for row in rows {
        if !map.contains_key(&row.parameter) {
            map.insert(row.parameter.clone(), coerce_value(&row.value));
        }
    }
    map
}

/// Data rows with their 1-based sheet row numbers
fn parse_rows(rows: &[Vec<String>]) -> Vec<(usize, ParameterRow)> {
    rows.iter()
        .enumerate()
        .skip(1)
        .filter_map(|(i, cells)| {
            let parameter = cells.first().map(|p| p.trim()).unwrap_or_default();
            if parameter.is_empty() {
                return None;
            }
            Some((
                i + 1,
                ParameterRow {
                    parameter: parameter.to_string(),
                    value: cells.get(1).cloned().unwrap_or_default(),
                },
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemorySheets;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn control_with(rows: Vec<Vec<String>>) -> (Arc<InMemorySheets>, BotControl) {
        let sheets = Arc::new(InMemorySheets::new().with_tab(BOT_CONTROL_TAB, rows));
        let control = BotControl::new(sheets.clone());
        (sheets, control)
    }

    #[tokio::test]
    async fn test_is_running_is_case_insensitive() {
        for stored in ["running", "Running", "RUNNING", " running "] {
            let (_, control) = control_with(vec![row(&["parameter", "value"]), row(&["status", stored])]);
            assert!(control.is_running().await.unwrap(), "status {:?}", stored);
        }
    }

    #[tokio::test]
    async fn test_not_running() {
        let (_, control) = control_with(vec![row(&["parameter", "value"]), row(&["status", "stopped"])]);
        assert!(!control.is_running().await.unwrap());

        let (_, control) = control_with(vec![row(&["parameter", "value"])]);
        assert!(!control.is_running().await.unwrap());
    }

    #[tokio::test]
    async fn test_set_updates_existing_row_in_place() {
        let (sheets, control) = control_with(vec![
            row(&["parameter", "value"]),
            row(&["status", "stopped"]),
            row(&["market_hours", "FALSE"]),
        ]);

        control.set("status", "running").await.unwrap();

        let rows = sheets.rows(BOT_CONTROL_TAB).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], row(&["status", "running"]));
        assert_eq!(rows[2], row(&["market_hours", "FALSE"]));
    }

    #[tokio::test]
    async fn test_set_appends_unknown_parameter() {
        let (sheets, control) = control_with(vec![row(&["parameter", "value"]), row(&["status", "stopped"])]);

        control.set("last_started", "09:15:00 AM").await.unwrap();

        let rows = sheets.rows(BOT_CONTROL_TAB).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], row(&["last_started", "09:15:00 AM"]));
    }

    #[tokio::test]
    async fn test_set_on_empty_tab_writes_header_first() {
        let (sheets, control) = control_with(vec![]);

        control.set("status", "running").await.unwrap();

        let rows = sheets.rows(BOT_CONTROL_TAB).await.unwrap();
        assert_eq!(rows, vec![row(&["parameter", "value"]), row(&["status", "running"])]);
    }

    #[tokio::test]
    async fn test_first_duplicate_wins() {
        let (sheets, control) = control_with(vec![
            row(&["parameter", "value"]),
            row(&["status", "running"]),
            row(&["status", "stopped"]),
        ]);

        assert_eq!(control.get("status").await.unwrap().as_deref(), Some("running"));
        assert_eq!(control.flattened().await.unwrap()["status"], Value::from("running"));

        control.set("status", "stopped").await.unwrap();
        let rows = sheets.rows(BOT_CONTROL_TAB).await.unwrap();
        assert_eq!(rows[1], row(&["status", "stopped"]));
    }

    #[tokio::test]
    async fn test_flattened_coerces_values() {
        let (_, control) = control_with(vec![
            row(&["parameter", "value"]),
            row(&["status", "running"]),
            row(&["market_hours", "TRUE"]),
            row(&["trades_executed", "12"]),
            row(&["last_started", "09:15:00 AM"]),
            row(&["", "orphan"]),
            row(&["uptime"]),
        ]);

        let map = control.flattened().await.unwrap();
        assert_eq!(map.len(), 5);
        assert_eq!(map["status"], Value::from("running"));
        assert_eq!(map["market_hours"], Value::Bool(true));
        assert_eq!(map["trades_executed"], Value::from(12));
        assert_eq!(map["last_started"], Value::from("09:15:00 AM"));
        assert_eq!(map["uptime"], Value::from(""));
    }

    #[tokio::test]
    async fn test_set_many_writes_in_order() {
        let (sheets, control) = control_with(vec![row(&["parameter", "value"])]);

        control
            .set_many(&[(STATUS, "running".to_string()), (MARKET_HOURS, "TRUE".to_string())])
            .await
            .unwrap();

        let rows = sheets.rows(BOT_CONTROL_TAB).await.unwrap();
        assert_eq!(rows[1], row(&["status", "running"]));
        assert_eq!(rows[2], row(&["market_hours", "TRUE"]));
    }

    #[tokio::test]
    async fn test_missing_tab_propagates() {
        let sheets = Arc::new(InMemorySheets::new());
        let control = BotControl::new(sheets);
        assert!(matches!(control.parameters().await, Err(SheetError::TabNotFound(_))));
    }
}
