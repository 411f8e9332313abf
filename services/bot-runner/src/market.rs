//! Market quotes
//!
//! There is no live feed: `PlaceholderQuotes` serves fixed figures for a
//! handful of NSE symbols, optionally jittered so the signal rule has
//! something to react to.

use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Latest figures for one symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketQuote {
    pub symbol: String,
    pub price: Decimal,
    pub change: Decimal,
    pub change_percent: Decimal,
}

impl MarketQuote {
    pub fn new(symbol: &str, price: Decimal, change: Decimal, change_percent: Decimal) -> Self {
        Self {
            symbol: symbol.to_string(),
            price,
            change,
            change_percent,
        }
    }
}

/// Trait for quote sources
#[async_trait::async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch_quotes(&self) -> anyhow::Result<Vec<MarketQuote>>;

    fn name(&self) -> &str;
}

/// Fixed NIFTY / HDFCBANK / RELIANCE figures
pub struct PlaceholderQuotes {
    /// Max absolute perturbation of `change_percent`, in percentage points
    jitter_pct: f64,
}

impl PlaceholderQuotes {
    pub fn new() -> Self {
        Self { jitter_pct: 0.0 }
    }

    pub fn with_jitter(jitter_pct: f64) -> Self {
        Self {
            jitter_pct: jitter_pct.abs(),
        }
    }

    pub fn baseline() -> Vec<MarketQuote> {
        vec![
            MarketQuote::new("NIFTY", Decimal::new(248565, 1), Decimal::new(1253, 1), Decimal::new(51, 2)),
            MarketQuote::new("HDFCBANK", Decimal::new(97045, 2), Decimal::new(-525, 2), Decimal::new(-54, 2)),
            MarketQuote::new("RELIANCE", Decimal::new(13827, 1), Decimal::new(128, 1), Decimal::new(93, 2)),
        ]
    }

    fn jitter(&self, quote: MarketQuote, rng: &mut impl Rng) -> anyhow::Result<MarketQuote> {
        let offset = rng.gen_range(-self.jitter_pct..=self.jitter_pct);
        let offset = Decimal::try_from(offset)
            .map_err(|e| anyhow::anyhow!("Invalid jitter offset {}: {}", offset, e))?;

        let change_percent = (quote.change_percent + offset).round_dp(2);
        let change = (quote.price * change_percent / Decimal::ONE_HUNDRED).round_dp(2);

        Ok(MarketQuote {
            change,
            change_percent,
            ..quote
        })
    }
}

impl Default for PlaceholderQuotes {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl QuoteSource for PlaceholderQuotes {
    async fn fetch_quotes(&self) -> anyhow::Result<Vec<MarketQuote>> {
        let quotes = Self::baseline();
        if !self.jitter_pct.is_finite() || self.jitter_pct <= 0.0 {
            return Ok(quotes);
        }

        let mut rng = rand::thread_rng();
        quotes
            .into_iter()
            .map(|q| self.jitter(q, &mut rng))
            .collect()
    }

    fn name(&self) -> &str {
        "placeholder"
    }
}
