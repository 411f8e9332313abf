//! Bot Runner Library
//!
//! Batch side of the trading bot: when the control table says `running`,
//! log a round of market quotes and the signals derived from them.

pub mod config;
pub mod market;
pub mod runner;
pub mod signals;

pub use config::RunnerSettings;
pub use market::{MarketQuote, PlaceholderQuotes, QuoteSource};
pub use runner::{BatchRunner, RunOutcome};
pub use signals::{derive_signals, evaluate, Confidence, Signal, SignalKind};
