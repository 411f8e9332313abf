//! Bot Runner - one processing pass over the spreadsheet

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use sheet_store::{ist, BotControl, PriceSample, SheetLedger, SpreadsheetBackend};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::RunnerSettings;
use crate::market::{PlaceholderQuotes, QuoteSource};
use crate::signals::{derive_signals, SignalKind};

/// What a single run did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    /// Control table does not say `running`
    Skipped,
    /// Market-hours gate is on and the exchange is closed
    OutsideMarketHours,
    Completed {
        prices_written: usize,
        signals_written: usize,
        hold: bool,
    },
}

pub struct BatchRunner {
    control: BotControl,
    ledger: SheetLedger,
    quotes: Arc<dyn QuoteSource>,
    enforce_market_hours: bool,
}

impl BatchRunner {
    pub fn new(sheets: Arc<dyn SpreadsheetBackend>, quotes: Arc<dyn QuoteSource>) -> Self {
        Self {
            control: BotControl::new(sheets.clone()),
            ledger: SheetLedger::new(sheets),
            quotes,
            enforce_market_hours: false,
        }
    }

    /// Runner wired to placeholder quotes per settings
    pub fn from_settings(sheets: Arc<dyn SpreadsheetBackend>, settings: &RunnerSettings) -> Self {
        let quotes = Arc::new(PlaceholderQuotes::with_jitter(settings.jitter_pct));
        Self::new(sheets, quotes).enforce_market_hours(settings.enforce_market_hours)
    }

    pub fn enforce_market_hours(mut self, enforce: bool) -> Self {
        self.enforce_market_hours = enforce;
        self
    }

    /// Run against the current IST clock
    pub async fn run(&self) -> anyhow::Result<RunOutcome> {
        self.run_once(ist::now_ist()).await
    }

    /// One pass: gate on the control flag, log prices, log signals
    pub async fn run_once(&self, now: DateTime<FixedOffset>) -> anyhow::Result<RunOutcome> {
        let running = match self.control.is_running().await {
            Ok(running) => running,
            Err(e) => {
                warn!("Could not read bot status, treating as stopped: {}", e);
                false
            }
        };

        if !running {
            info!("Bot is not running, skipping");
            return Ok(RunOutcome::Skipped);
        }

        if self.enforce_market_hours && !ist::is_market_hours(&now) {
            info!("Outside market hours ({}), skipping", ist::clock_time(&now));
            return Ok(RunOutcome::OutsideMarketHours);
        }

        let quotes = self.quotes.fetch_quotes().await?;
        debug!("{} quotes from {}", quotes.len(), self.quotes.name());

        let timestamp = ist::sheet_timestamp(&now);

        for quote in &quotes {
            let sample = PriceSample {
                timestamp: timestamp.clone(),
                symbol: quote.symbol.clone(),
                price: quote.price,
                change: quote.change,
                change_percent: quote.change_percent,
            };
            self.ledger.append_price_sample(&sample).await?;
        }
        info!("✓ Logged {} price samples", quotes.len());

        let signals = derive_signals(&quotes);
        for signal in &signals {
            self.ledger.append_signal(&signal.to_row(&timestamp)).await?;
            info!(
                "{} {} [{}] {}",
                signal.kind.as_str(),
                signal.symbol,
                signal.confidence.as_str(),
                signal.reason
            );
        }

        let hold = signals.iter().any(|s| s.kind == SignalKind::Hold);

        Ok(RunOutcome::Completed {
            prices_written: quotes.len(),
            signals_written: signals.len(),
            hold,
        })
    }
}
