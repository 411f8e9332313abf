//! Batch runner settings
//!
//! Read from `RUNNER_*` environment variables; spreadsheet access is
//! configured separately through `sheet_store::SheetSettings`.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunnerSettings {
    /// `RUNNER_JITTER_PCT`: max perturbation of placeholder `change_percent`
    #[serde(default)]
    pub jitter_pct: f64,

    /// `RUNNER_ENFORCE_MARKET_HOURS`: skip runs outside 09:15-15:30 IST on weekdays
    #[serde(default)]
    pub enforce_market_hours: bool,
}

impl RunnerSettings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_environment(config::Environment::with_prefix("RUNNER"))
    }

    pub fn from_environment(env: config::Environment) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(env)
            .build()?
            .try_deserialize::<RunnerSettings>()?;
        Ok(settings)
    }
}
