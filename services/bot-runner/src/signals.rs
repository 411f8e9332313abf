//! Threshold signal rule
//!
//! `change_percent > 1.0` is a BUY, `< -1.0` a SELL; both bounds are strict.
//! A run with no qualifying symbol yields a single HOLD for "MARKET".

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sheet_store::SignalRow;

use crate::market::MarketQuote;

pub const HOLD_SYMBOL: &str = "MARKET";
pub const HOLD_REASON: &str = "Market may be in consolidation - Wait for a clearer setup";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalKind {
    Buy,
    Sell,
    Hold,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Buy => "BUY",
            SignalKind::Sell => "SELL",
            SignalKind::Hold => "HOLD",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Medium => "MEDIUM",
            Confidence::High => "HIGH",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    pub kind: SignalKind,
    pub symbol: String,
    pub reason: String,
    pub confidence: Confidence,
}

impl Signal {
    pub fn hold() -> Self {
        Self {
            kind: SignalKind::Hold,
            symbol: HOLD_SYMBOL.to_string(),
            reason: HOLD_REASON.to_string(),
            confidence: Confidence::Medium,
        }
    }

    pub fn to_row(&self, timestamp: &str) -> SignalRow {
        SignalRow {
            timestamp: timestamp.to_string(),
            signal: self.kind.as_str().to_string(),
            symbol: self.symbol.clone(),
            reason: self.reason.clone(),
            confidence: self.confidence.as_str().to_string(),
        }
    }
}

/// Signal for a single quote, if it crosses a threshold
pub fn evaluate(quote: &MarketQuote) -> Option<Signal> {
    let threshold = Decimal::ONE;

    if quote.change_percent > threshold {
        Some(Signal {
            kind: SignalKind::Buy,
            symbol: quote.symbol.clone(),
            reason: format!("Strong upward momentum (+{:.2}%)", quote.change_percent),
            confidence: Confidence::High,
        })
    } else if quote.change_percent < -threshold {
        Some(Signal {
            kind: SignalKind::Sell,
            symbol: quote.symbol.clone(),
            reason: format!("Strong downward momentum ({:.2}%)", quote.change_percent),
            confidence: Confidence::High,
        })
    } else {
        None
    }
}

/// Signals for a whole run, in quote order; never empty
pub fn derive_signals(quotes: &[MarketQuote]) -> Vec<Signal> {
    let signals: Vec<Signal> = quotes.iter().filter_map(evaluate).collect();
    if signals.is_empty() {
        vec![Signal::hold()]
    } else {
        signals
    }
}
