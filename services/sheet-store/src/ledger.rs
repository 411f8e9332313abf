//! Append-only log tabs: Price_Data and Advisor_Output

use serde_json::{Map, Value};
use std::sync::Arc;

use crate::types::*;

#[derive(Clone)]
pub struct SheetLedger {
    sheets: Arc<dyn SpreadsheetBackend>,
}

impl SheetLedger {
    pub fn new(sheets: Arc<dyn SpreadsheetBackend>) -> Self {
        Self { sheets }
    }

    pub async fn append_price_sample(&self, sample: &PriceSample) -> Result<()> {
        self.sheets.append_row(PRICE_DATA_TAB, sample.to_cells()).await
    }

    pub async fn append_signal(&self, signal: &SignalRow) -> Result<()> {
        self.sheets.append_row(ADVISOR_OUTPUT_TAB, signal.to_cells()).await
    }

    /// Rows of a tab as objects keyed by its header row, oldest first.
    /// With `limit`, only the most recent `limit` rows are returned.
    pub async fn records(&self, tab: &str, limit: Option<usize>) -> Result<Vec<Map<String, Value>>> {
        let rows = self.sheets.read_rows(tab).await?;
        Ok(to_records(&rows, limit))
    }
}

fn to_records(rows: &[Vec<String>], limit: Option<usize>) -> Vec<Map<String, Value>> {
    let Some((header, data)) = rows.split_first() else {
        return Vec::new();
    };

    let skip = limit.map_or(0, |n| data.len().saturating_sub(n));

    data.iter()
        .skip(skip)
        .map(|row| {
            header
                .iter()
                .enumerate()
                .filter(|(_, key)| !key.is_empty())
                .map(|(i, key)| {
                    let cell = row.get(i).cloned().unwrap_or_default();
                    (key.clone(), Value::String(cell))
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemorySheets;
    use rust_decimal::Decimal;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[tokio::test]
    async fn test_append_price_sample() {
        let sheets = Arc::new(InMemorySheets::with_default_tabs());
        let ledger = SheetLedger::new(sheets.clone());

        ledger
            .append_price_sample(&PriceSample {
                timestamp: "2025-09-05 15:15:00".into(),
                symbol: "NIFTY".into(),
                price: Decimal::new(248565, 1),
                change: Decimal::new(1253, 1),
                change_percent: Decimal::new(51, 2),
            })
            .await
            .unwrap();

        let rows = sheets.rows(PRICE_DATA_TAB).await.unwrap();
        assert_eq!(
            rows[1],
            row(&["2025-09-05 15:15:00", "NIFTY", "24856.5", "125.3", "0.51"])
        );
    }

    #[tokio::test]
    async fn test_append_signal() {
        let sheets = Arc::new(InMemorySheets::with_default_tabs());
        let ledger = SheetLedger::new(sheets.clone());

        ledger
            .append_signal(&SignalRow {
                timestamp: "2025-09-05 15:15:00".into(),
                signal: "HOLD".into(),
                symbol: "MARKET".into(),
                reason: "quiet".into(),
                confidence: "MEDIUM".into(),
            })
            .await
            .unwrap();

        let rows = sheets.rows(ADVISOR_OUTPUT_TAB).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][1], "HOLD");
    }

    #[test]
    fn test_records_keyed_by_header() {
        let rows = vec![
            row(&["timestamp", "signal", ""]),
            row(&["t1", "BUY", "ignored", "extra"]),
            row(&["t2"]),
        ];

        let records = to_records(&rows, None);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].len(), 2);
        assert_eq!(records[0]["signal"], Value::from("BUY"));
        assert_eq!(records[1]["signal"], Value::from(""));
    }

    #[test]
    fn test_records_limit_keeps_latest() {
        let rows = vec![row(&["n"]), row(&["1"]), row(&["2"]), row(&["3"])];

        let records = to_records(&rows, Some(2));
        let values: Vec<_> = records.iter().map(|r| r["n"].clone()).collect();
        assert_eq!(values, vec![Value::from("2"), Value::from("3")]);

        assert_eq!(to_records(&rows, Some(10)).len(), 3);
        assert!(to_records(&[], None).is_empty());
    }
}
