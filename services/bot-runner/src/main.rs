//! Bot Runner - one processing pass per invocation
//!
//! Meant to be driven by cron or a scheduler:
//! 1. Checks the `status` parameter in Bot_Control
//! 2. Logs placeholder quotes to Price_Data
//! 3. Logs BUY/SELL/HOLD signals to Advisor_Output

use tracing::info;
use tracing_subscriber::EnvFilter;

use bot_runner::{BatchRunner, RunOutcome, RunnerSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    sheet_store::settings::load_dotenv();

    info!("Starting Bot Runner...");

    let settings = RunnerSettings::from_env()?;
    let sheets = sheet_store::connect_from_env()?;

    let runner = BatchRunner::from_settings(sheets, &settings);
    match runner.run().await? {
        RunOutcome::Completed {
            prices_written,
            signals_written,
            hold,
        } => info!(
            "✓ Run complete: {} prices, {} signals{}",
            prices_written,
            signals_written,
            if hold { " (hold)" } else { "" }
        ),
        outcome => info!("Run finished without writing: {:?}", outcome),
    }

    Ok(())
}
