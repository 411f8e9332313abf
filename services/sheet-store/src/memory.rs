//! In-process spreadsheet backend
//!
//! Behaves like a single spreadsheet with a fixed set of tabs. Used by the
//! test suites of every service and for local runs without credentials.

use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::types::*;

#[derive(Default)]
pub struct InMemorySheets {
    tabs: RwLock<HashMap<String, Vec<Vec<String>>>>,
}

impl InMemorySheets {
    pub fn new() -> Self {
        Self::default()
    }

    /// The three tabs this system uses, each holding only its header row
    pub fn with_default_tabs() -> Self {
        Self::new()
            .with_tab(BOT_CONTROL_TAB, vec![to_row(&BOT_CONTROL_HEADER)])
            .with_tab(PRICE_DATA_TAB, vec![to_row(&PRICE_DATA_HEADER)])
            .with_tab(ADVISOR_OUTPUT_TAB, vec![to_row(&ADVISOR_OUTPUT_HEADER)])
    }

    pub fn with_tab(mut self, tab: &str, rows: Vec<Vec<String>>) -> Self {
        self.tabs.get_mut().insert(tab.to_string(), rows);
        self
    }

    /// Snapshot of a tab, `None` if it does not exist
    pub async fn rows(&self, tab: &str) -> Option<Vec<Vec<String>>> {
        self.tabs.read().await.get(tab).cloned()
    }
}

fn to_row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

#[async_trait::async_trait]
impl SpreadsheetBackend for InMemorySheets {
    async fn read_rows(&self, tab: &str) -> Result<Vec<Vec<String>>> {
        let tabs = self.tabs.read().await;
        let rows = tabs
            .get(tab)
            .ok_or_else(|| SheetError::TabNotFound(tab.to_string()))?;

        // The remote API omits trailing empty rows
        let mut rows = rows.clone();
        while rows.last().is_some_and(|r| r.iter().all(|c| c.is_empty())) {
            rows.pop();
        }
        Ok(rows)
    }

    async fn update_row(&self, tab: &str, row_number: usize, values: Vec<String>) -> Result<()> {
        if row_number == 0 {
            return Err(SheetError::Api {
                status: 400,
                body: format!("Invalid row number 0 for {}", tab),
            });
        }

        let mut tabs = self.tabs.write().await;
        let rows = tabs
            .get_mut(tab)
            .ok_or_else(|| SheetError::TabNotFound(tab.to_string()))?;

        if rows.len() < row_number {
            rows.resize(row_number, Vec::new());
        }

        let row = &mut rows[row_number - 1];
        if row.len() < values.len() {
            row.resize(values.len(), String::new());
        }
        for (i, value) in values.into_iter().enumerate() {
            row[i] = value;
        }
        Ok(())
    }

    async fn append_row(&self, tab: &str, values: Vec<String>) -> Result<()> {
        let mut tabs = self.tabs.write().await;
        let rows = tabs
            .get_mut(tab)
            .ok_or_else(|| SheetError::TabNotFound(tab.to_string()))?;

        while rows.last().is_some_and(|r| r.iter().all(|c| c.is_empty())) {
            rows.pop();
        }
        rows.push(values);
        Ok(())
    }

    fn name(&self) -> &str {
        "in_memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        to_row(cells)
    }

    #[tokio::test]
    async fn test_unknown_tab() {
        let sheets = InMemorySheets::new();
        let err = sheets.read_rows("Nope").await.unwrap_err();
        assert!(matches!(err, SheetError::TabNotFound(t) if t == "Nope"));
        assert!(sheets.append_row("Nope", row(&["x"])).await.is_err());
    }

    #[tokio::test]
    async fn test_update_keeps_trailing_cells() {
        let sheets = InMemorySheets::new().with_tab("T", vec![row(&["a", "b", "c"])]);
        sheets.update_row("T", 1, row(&["x", "y"])).await.unwrap();
        assert_eq!(sheets.rows("T").await.unwrap(), vec![row(&["x", "y", "c"])]);
    }

    #[tokio::test]
    async fn test_update_past_end_grows_tab() {
        let sheets = InMemorySheets::new().with_tab("T", vec![]);
        sheets.update_row("T", 2, row(&["k", "v"])).await.unwrap();
        let rows = sheets.read_rows("T").await.unwrap();
        assert_eq!(rows, vec![Vec::<String>::new(), row(&["k", "v"])]);
    }

    #[tokio::test]
    async fn test_append_after_last_non_empty_row() {
        let sheets = InMemorySheets::new().with_tab("T", vec![row(&["h"]), row(&["", ""])]);
        sheets.append_row("T", row(&["1"])).await.unwrap();
        assert_eq!(sheets.rows("T").await.unwrap(), vec![row(&["h"]), row(&["1"])]);
    }

    #[tokio::test]
    async fn test_default_tabs_have_headers() {
        let sheets = InMemorySheets::with_default_tabs();
        let control = sheets.read_rows(BOT_CONTROL_TAB).await.unwrap();
        assert_eq!(control, vec![row(&["parameter", "value"])]);
        assert_eq!(sheets.read_rows(PRICE_DATA_TAB).await.unwrap()[0].len(), 5);
        assert_eq!(sheets.read_rows(ADVISOR_OUTPUT_TAB).await.unwrap()[0].len(), 5);
    }
}
